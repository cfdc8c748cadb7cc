mod player_controller;
use leafwing_input_manager::prelude::*;
pub use player_controller::*;

mod input;
pub use input::*;

use bevy::prelude::*;
use interfaces::scheduling::{GrappleSystemSet, PhysicsSystemSet};
use physics::{
    collision::Grounded,
    movement::{Acceleration, Velocity},
};

pub struct ControllersPlugin;

impl Plugin for ControllersPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<Action>::default())
            .insert_resource(CursorLocked(false))
            .init_resource::<MouseSensitivity>()
            .add_systems(Update, (update_window_focused, grab_cursor).chain())
            //the scan has to see this frame's camera, and the controller this frame's clicks
            .add_systems(
                Update,
                (
                    rotate_mouse,
                    follow_local_player,
                    move_player,
                    read_grapple_input,
                )
                    .chain()
                    .after(update_window_focused)
                    .before(GrappleSystemSet::Scan),
            )
            .add_plugins(TickMovementPlugin);
    }
}

//applies TickMovement during the fixed tick, before the grapple pull samples velocity
pub struct TickMovementPlugin;

impl Plugin for TickMovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (do_jump, do_tick_movement).in_set(PhysicsSystemSet::Main),
        );
    }
}

//desired proportion of the movespeed to use, global space
//direction is overwritten every frame, jump is cleared by the tick that uses it
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct TickMovement {
    pub direction: Vec3,
    pub jump: bool,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct MoveSpeed {
    pub max_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub jump_speed: f32,
}

impl Default for MoveSpeed {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            ground_accel: 40.0,
            air_accel: 8.0,
            jump_speed: 5.0,
        }
    }
}

impl MoveSpeed {
    pub fn get_accel(self, grounded: bool) -> f32 {
        if grounded {
            self.ground_accel
        } else {
            self.air_accel
        }
    }
}

#[derive(Bundle, Default)]
pub struct ControllableBundle {
    pub tick_movement: TickMovement,
    pub move_speed: MoveSpeed,
}

//acceleration pushing the horizontal velocity toward direction * max_speed
//doesn't resist sliding with no input, so a launch keeps its momentum until drag eats it
pub fn planar_accel(direction: Vec3, v: Vec3, ms: MoveSpeed, grounded: bool) -> Vec3 {
    const EPSILON: f32 = 1e-3;
    let speed = direction.length();
    if speed < EPSILON {
        return Vec3::ZERO;
    }
    let mut v_desired = if speed > 1.0 {
        direction * (ms.max_speed / speed)
    } else {
        direction * ms.max_speed
    };
    v_desired.y = 0.0;
    let mut dv = v_desired - v;
    dv.y = 0.0;
    let dv_len = dv.length();
    //don't overcorrect
    if dv_len <= EPSILON {
        return Vec3::ZERO;
    }
    //in the air, only steer if we're slower than the target in that direction
    if !grounded && v.dot(v_desired) >= v_desired.length_squared() {
        return Vec3::ZERO;
    }
    dv * (ms.get_accel(grounded) / dv_len)
}

fn do_tick_movement(
    mut query: Query<(
        &TickMovement,
        &Velocity,
        &mut Acceleration,
        &MoveSpeed,
        Option<&Grounded>,
    )>,
) {
    for (tm, v, mut a, ms, opt_grounded) in query.iter_mut() {
        let grounded = opt_grounded.is_some_and(|g| g.0);
        a.0 += planar_accel(tm.direction, v.0, *ms, grounded);
    }
}

fn do_jump(mut query: Query<(&mut TickMovement, &mut Velocity, &MoveSpeed, &Grounded)>) {
    for (mut tm, mut v, ms, grounded) in query.iter_mut() {
        if !tm.jump {
            continue;
        }
        if grounded.0 {
            v.y = v.y.max(0.0) + ms.jump_speed;
        }
        tm.jump = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use interfaces::InterfacesPlugin;
    use physics::{
        grapple::{GrappleConfig, GrappleController, GrappleInput, ScanResult},
        movement::GravityMult,
        PhysicsPlugin,
    };

    #[test]
    fn jump_lands_in_grapple_sample_same_tick() {
        let mut app = App::new();
        app.add_plugins((InterfacesPlugin, PhysicsPlugin, TickMovementPlugin));
        let mut controller = GrappleController::new_or_default(GrappleConfig::default());
        let mut v = Vec3::ZERO;
        controller.advance_frame(
            GrappleInput {
                pressed: true,
                released: false,
            },
            ScanResult::Hit {
                point: Vec3::new(0.0, 1.0, -10.0),
                surface: Entity::from_raw(99),
            },
            Vec3::new(0.0, 1.0, 0.0),
            &mut v,
        );
        assert!(controller.is_attached());
        let player = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 1.0, 0.0),
                Velocity::default(),
                GravityMult::new(0.0),
                Grounded(true),
                TickMovement {
                    direction: Vec3::ZERO,
                    jump: true,
                },
                MoveSpeed::default(),
                controller,
            ))
            .id();
        app.world_mut().run_schedule(FixedUpdate);

        let controller = app.world().get::<GrappleController>(player).unwrap();
        let sampled = controller.state().last_observed_velocity();
        assert!((sampled.y - MoveSpeed::default().jump_speed).abs() < 1e-4);
        assert!(sampled.z < 0.0);
        assert!(!app.world().get::<TickMovement>(player).unwrap().jump);
    }

    #[test]
    fn no_input_no_accel() {
        let v = Vec3::new(20.0, 0.0, 0.0);
        assert_eq!(planar_accel(Vec3::ZERO, v, MoveSpeed::default(), true), Vec3::ZERO);
    }

    #[test]
    fn accel_is_horizontal_and_bounded() {
        let ms = MoveSpeed::default();
        let a = planar_accel(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, -5.0, 0.0), ms, true);
        assert_eq!(a.y, 0.0);
        assert!((a.length() - ms.ground_accel).abs() < 1e-4);
        assert!(a.z < 0.0);
    }

    #[test]
    fn air_control_keeps_launch_speed() {
        let ms = MoveSpeed::default();
        //flying forward faster than we could run, holding forward
        let a = planar_accel(Vec3::NEG_Z, Vec3::new(0.0, 3.0, -30.0), ms, false);
        assert_eq!(a, Vec3::ZERO);
        //holding sideways still steers
        let a = planar_accel(Vec3::X, Vec3::new(0.0, 3.0, -30.0), ms, false);
        assert!(a.x > 0.0);
        assert!((a.length() - ms.air_accel).abs() < 1e-4);
    }
}
