use bevy::{prelude::*, transform::TransformSystem};

pub(crate) struct SchedulingPlugin;

impl Plugin for SchedulingPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GrappleSystemSet::Scan,
                GrappleSystemSet::Input,
                GrappleSystemSet::Visual,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (
                PhysicsSystemSet::Main,
                PhysicsSystemSet::Grapple,
                PhysicsSystemSet::UpdatePosition,
                PhysicsSystemSet::UpdateDerivatives,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            TransformSystem::TransformPropagate.after(PhysicsSystemSet::UpdatePosition),
        );
    }
}

//run in update, once per rendered frame
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GrappleSystemSet {
    //raycasts from the aim origin, never mutates grapple state
    Scan,
    //press/release edges, attach and launch
    Input,
    //tether/crosshair outputs, read-only on grapple state
    Visual,
}

//run in fixed update
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum PhysicsSystemSet {
    Main, //all user code should run here
    //web pull, sees this tick's jumps and other velocity edits from Main
    Grapple,
    UpdatePosition,
    UpdateDerivatives,
}
