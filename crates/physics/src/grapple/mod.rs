use bevy::prelude::*;
use interfaces::{
    components::{AimOrigin, FirePoint},
    scheduling::{GrappleSystemSet, PhysicsSystemSet},
};

use super::{
    collision::{Aabb, Surface},
    movement::Velocity,
};

mod config;
mod controller;
mod launch;
mod scanner;

pub use config::*;
pub use controller::*;
pub use launch::*;
pub use scanner::*;

//web grapple: scan in update, attach/release on button edges, pull in fixed update
pub struct GrapplePlugin;

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, scan_targets.in_set(GrappleSystemSet::Scan))
            .add_systems(Update, process_grapple_input.in_set(GrappleSystemSet::Input))
            .add_systems(Update, update_grapple_outputs.in_set(GrappleSystemSet::Visual))
            .add_systems(FixedUpdate, pull_grapple.in_set(PhysicsSystemSet::Grapple))
            .add_event::<GrappleEvent>();
    }
}

//latest scan for this user, recomputed every frame
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Deref)]
pub struct GrappleScan(pub ScanResult);

//present only while attached. world space endpoints for whatever draws the web
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Tether {
    pub start: Vec3,
    pub end: Vec3,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct GrappleEvent {
    pub user: Entity,
    pub transition: GrappleTransition,
}

fn scan_targets(
    mut user_query: Query<(
        Entity,
        &GrappleController,
        &Transform,
        Option<&AimOrigin>,
        &mut GrappleScan,
    )>,
    aim_query: Query<&Transform>,
    surface_query: Query<(Entity, &Transform, &Aabb, &Surface)>,
) {
    for (entity, controller, tf, opt_aim, mut scan) in user_query.iter_mut() {
        //cast from the eye if we have one, otherwise from the body
        let aim_tf = opt_aim
            .and_then(|aim| aim_query.get(aim.0).ok())
            .unwrap_or(tf);
        scan.set_if_neq(GrappleScan(scan_for_target(
            aim_tf.translation,
            aim_tf.forward(),
            controller.config(),
            surface_query.iter(),
            &[entity],
        )));
    }
}

fn process_grapple_input(
    mut query: Query<(
        Entity,
        &mut GrappleController,
        &mut GrappleInput,
        &GrappleScan,
        &Transform,
        &mut Velocity,
    )>,
    name_query: Query<&Name>,
    mut writer: EventWriter<GrappleEvent>,
) {
    for (entity, mut controller, mut input, scan, tf, mut v) in query.iter_mut() {
        let input = input.take();
        for transition in controller.advance_frame(input, scan.0, tf.translation, &mut v.0) {
            log_transition(transition, &name_query);
            writer.send(GrappleEvent {
                user: entity,
                transition,
            });
        }
    }
}

fn pull_grapple(
    mut query: Query<(Entity, &mut GrappleController, &Transform, &mut Velocity)>,
    name_query: Query<&Name>,
    mut writer: EventWriter<GrappleEvent>,
    time: Res<Time<Fixed>>,
) {
    let dt = crate::tick_seconds(&time);
    for (entity, mut controller, tf, mut v) in query.iter_mut() {
        if !controller.is_attached() {
            continue;
        }
        if let Some(transition) = controller.integrate_physics(dt, tf.translation, &mut v.0) {
            log_transition(transition, &name_query);
            writer.send(GrappleEvent {
                user: entity,
                transition,
            });
        }
    }
}

fn update_grapple_outputs(
    mut query: Query<(
        Entity,
        &GrappleController,
        &Transform,
        Option<&AimOrigin>,
        Option<&FirePoint>,
        Option<&mut Tether>,
        &mut AttachIndicator,
    )>,
    origin_query: Query<(&Transform, Option<&Parent>)>,
    mut commands: Commands,
) {
    for (entity, controller, tf, opt_aim, opt_fire_point, opt_tether, mut indicator) in
        query.iter_mut()
    {
        indicator.set_if_neq(controller.attach_indicator());

        let Some(end) = controller.attach_point() else {
            if opt_tether.is_some() {
                if let Some(mut ec) = commands.get_entity(entity) {
                    ec.remove::<Tether>();
                }
            }
            continue;
        };
        //web comes out of the fire point, or the eye if there isn't one
        let start = opt_fire_point
            .and_then(|fp| current_translation(fp.0, &origin_query))
            .or_else(|| opt_aim.and_then(|aim| current_translation(aim.0, &origin_query)))
            .unwrap_or(tf.translation);
        let tether = Tether { start, end };
        match opt_tether {
            Some(mut current) => {
                current.set_if_neq(tether);
            }
            None => {
                if let Some(mut ec) = commands.get_entity(entity) {
                    ec.try_insert(tether);
                }
            }
        }
    }
}

//world position composed from this frame's local transforms
//GlobalTransform is still last frame's during Update
fn current_translation(
    entity: Entity,
    origin_query: &Query<(&Transform, Option<&Parent>)>,
) -> Option<Vec3> {
    let (tf, mut opt_parent) = origin_query.get(entity).ok()?;
    let mut translation = tf.translation;
    while let Some(parent) = opt_parent {
        let (parent_tf, next) = origin_query.get(parent.get()).ok()?;
        translation = parent_tf.transform_point(translation);
        opt_parent = next;
    }
    Some(translation)
}

fn log_transition(transition: GrappleTransition, name_query: &Query<&Name>) {
    match transition {
        GrappleTransition::Attached { surface, .. } => match name_query.get(surface) {
            Ok(name) => info!("Attached grapple to {}", name),
            Err(_) => info!("Attached grapple to {:?}", surface),
        },
        GrappleTransition::Launched { velocity, .. } => {
            info!("Launched at {:.1} m/s", velocity.length())
        }
    }
}
