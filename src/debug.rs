use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use interfaces::{
    components::LocalPlayer, resources::DebugGizmos, scheduling::GrappleSystemSet,
};
use leafwing_input_manager::prelude::ActionState;
use physics::grapple::{GrappleController, Tether};

use crate::controllers::Action;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(InspectorVisible(false))
            .add_plugins(WorldInspectorPlugin::new().run_if(inspector_visible))
            .add_systems(Update, toggle_debug)
            .add_systems(
                Update,
                draw_grapple_gizmos
                    .after(GrappleSystemSet::Visual)
                    .run_if(gizmos_enabled),
            );
    }
}

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InspectorVisible(pub bool);

const VELOCITY_RAY_LENGTH: f32 = 2.0;
const ANCHOR_RADIUS: f32 = 0.3;

fn inspector_visible(visible: Res<InspectorVisible>) -> bool {
    visible.0
}

fn gizmos_enabled(enabled: Res<DebugGizmos>) -> bool {
    enabled.0
}

fn toggle_debug(
    query: Query<&ActionState<Action>, With<LocalPlayer>>,
    mut gizmos: ResMut<DebugGizmos>,
    mut inspector: ResMut<InspectorVisible>,
) {
    let Ok(action) = query.get_single() else {
        return;
    };
    if action.just_pressed(&Action::ToggleDebugGizmos) {
        gizmos.0 = !gizmos.0;
        info!("Debug gizmos {}", if gizmos.0 { "on" } else { "off" });
    }
    if action.just_pressed(&Action::ToggleInspector) {
        inspector.0 = !inspector.0;
    }
}

fn draw_grapple_gizmos(
    query: Query<(&GrappleController, &Transform, Option<&Tether>)>,
    mut gizmos: Gizmos,
) {
    for (controller, tf, opt_tether) in query.iter() {
        let Some(anchor) = controller.attach_point() else {
            continue;
        };
        if let Some(tether) = opt_tether {
            gizmos.line(tether.start, tether.end, Color::srgb(1.0, 1.0, 0.0));
        }
        gizmos.sphere(
            Isometry3d::from_translation(anchor),
            ANCHOR_RADIUS,
            Color::srgb(1.0, 1.0, 0.0),
        );
        let motion = controller.state().last_observed_velocity().normalize_or_zero();
        gizmos.ray(
            tf.translation,
            motion * VELOCITY_RAY_LENGTH,
            Color::srgb(0.0, 1.0, 1.0),
        );
    }
}
