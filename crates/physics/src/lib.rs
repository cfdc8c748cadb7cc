use bevy::prelude::*;

pub mod collision;
pub mod grapple;
pub mod movement;
pub mod query;
#[cfg(test)]
mod test;

pub const TPS: f64 = 64.0;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            movement::MovementPlugin,
            collision::CollisionPlugin,
            grapple::GrapplePlugin,
        ))
        .insert_resource(Time::<Fixed>::from_hz(TPS));
    }
}

#[derive(Bundle, Default)]
pub struct PhysicsBundle {
    pub velocity: movement::Velocity,
    pub acceleration: movement::Acceleration,
    pub gravity: movement::GravityMult,
    pub drag: movement::Drag,
    pub collider: collision::Aabb,
    pub grounded: collision::Grounded,
}

//seconds per fixed tick, read from the fixed clock so it doesn't depend on when the schedule runs
pub(crate) fn tick_seconds(time: &Time<Fixed>) -> f32 {
    time.timestep().as_secs_f32()
}
