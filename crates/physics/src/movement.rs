use bevy::prelude::*;
use interfaces::scheduling::PhysicsSystemSet;
use serde::{Deserialize, Serialize};

//world space, units per second
#[derive(
    Component, Default, Deref, DerefMut, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Reflect,
)]
#[reflect(Component)]
pub struct Velocity(pub Vec3);

//world space, units per second squared
//optional - acceleration not due to gravity, cleared every tick after it's applied
#[derive(
    Component, Default, Deref, DerefMut, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Reflect,
)]
#[reflect(Component)]
pub struct Acceleration(pub Vec3);

#[derive(Resource, Deref, DerefMut, PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Gravity(pub Vec3);

impl Default for Gravity {
    fn default() -> Self {
        Self(Vec3::new(0.0, -9.81, 0.0))
    }
}

#[derive(Component, Deref, DerefMut, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct GravityMult(pub f32);

impl Default for GravityMult {
    fn default() -> Self {
        Self(1.0)
    }
}

impl GravityMult {
    pub fn new(val: f32) -> Self {
        Self(val)
    }
    pub fn get(self) -> f32 {
        self.0
    }
}

//fraction of velocity lost per second
#[derive(Component, Deref, DerefMut, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct Drag(pub f32);

impl Default for Drag {
    fn default() -> Self {
        Self(0.1)
    }
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity::default())
            .register_type::<Velocity>()
            .register_type::<Acceleration>()
            .register_type::<GravityMult>()
            .register_type::<Drag>()
            .add_systems(
                FixedUpdate,
                translate.in_set(PhysicsSystemSet::UpdatePosition),
            )
            .add_systems(
                FixedUpdate,
                (update_drag, update_derivatives)
                    .chain()
                    .in_set(PhysicsSystemSet::UpdateDerivatives),
            );
    }
}

//velocity after one tick of acceleration + gravity, separated out for tests
pub fn integrate_velocity(v: Vec3, a: Vec3, gravity: Vec3, dt: f32) -> Vec3 {
    const EPSILON: f32 = 0.0001;
    let v = v + (a + gravity) * dt;
    //min move speed to alleviate imprecision/jittering
    if v.length_squared() < EPSILON * EPSILON {
        Vec3::ZERO
    } else {
        v
    }
}

fn update_derivatives(
    mut query: Query<(&mut Velocity, Option<&mut Acceleration>, Option<&GravityMult>)>,
    gravity: Res<Gravity>,
    time: Res<Time<Fixed>>,
) {
    let dt = crate::tick_seconds(&time);
    for (mut v, opt_a, opt_g) in query.iter_mut() {
        let g = opt_g.copied().unwrap_or_default().get() * gravity.0;
        match opt_a {
            Some(mut a) => {
                v.0 = integrate_velocity(v.0, a.0, g, dt);
                //reset acceleration
                a.0 = Vec3::ZERO;
            }
            None => v.0 = integrate_velocity(v.0, Vec3::ZERO, g, dt),
        }
    }
}

fn update_drag(mut query: Query<(&mut Velocity, &Drag)>, time: Res<Time<Fixed>>) {
    let dt = crate::tick_seconds(&time);
    for (mut v, d) in query.iter_mut() {
        v.0 *= (1.0 - d.0 * dt).max(0.0);
    }
}

pub(crate) fn translate(mut query: Query<(&mut Transform, &Velocity)>, time: Res<Time<Fixed>>) {
    let dt = crate::tick_seconds(&time);
    for (mut tf, v) in query.iter_mut() {
        tf.translation += v.0 * dt;
    }
}
