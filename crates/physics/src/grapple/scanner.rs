use bevy::prelude::*;

use crate::{
    collision::{Aabb, Surface},
    query::{raycast, Raycast},
};

use super::GrappleConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScanResult {
    #[default]
    NoHit,
    Hit {
        point: Vec3,
        //only used for logging
        surface: Entity,
    },
}

impl ScanResult {
    pub fn is_hit(self) -> bool {
        matches!(self, ScanResult::Hit { .. })
    }
}

//nearest attachable point along the view ray, within config.max_distance
//no side effects, safe to call every frame in any grapple phase
pub fn scan_for_target<'a>(
    origin: Vec3,
    direction: Dir3,
    config: &GrappleConfig,
    surfaces: impl IntoIterator<Item = (Entity, &'a Transform, &'a Aabb, &'a Surface)>,
    exclude: &[Entity],
) -> ScanResult {
    match raycast(
        Raycast::new(origin, direction, config.max_distance),
        surfaces,
        config.attachable_mask,
        exclude,
    ) {
        Some(hit) => ScanResult::Hit {
            point: hit.hit_pos,
            surface: hit.entity,
        },
        None => ScanResult::NoHit,
    }
}
