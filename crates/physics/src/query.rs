use bevy::prelude::*;

use crate::collision::{Aabb, Surface, SurfaceLayers};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Raycast {
    pub origin: Vec3,
    pub direction: Dir3,
    pub length: f32,
}

impl Raycast {
    pub fn new(origin: Vec3, direction: Dir3, length: f32) -> Raycast {
        Self {
            origin,
            direction,
            length,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastHit {
    pub hit_pos: Vec3,
    pub distance: f32,
    pub entity: Entity,
}

//nearest hit along the ray against surfaces sharing a layer with mask
//ties keep the first surface in iteration order
pub fn raycast<'a>(
    ray: Raycast,
    surfaces: impl IntoIterator<Item = (Entity, &'a Transform, &'a Aabb, &'a Surface)>,
    mask: SurfaceLayers,
    exclude: &[Entity],
) -> Option<RaycastHit> {
    let mut nearest: Option<RaycastHit> = None;
    for (entity, tf, aabb, surface) in surfaces {
        if exclude.contains(&entity) || !surface.matches(mask) {
            continue;
        }
        //direction is unit length, so time == distance
        let Some((distance, hit_pos)) = aabb.sweep_ray(tf.translation, ray.origin, *ray.direction)
        else {
            continue;
        };
        if distance > ray.length {
            continue;
        }
        if nearest.map_or(true, |best| distance < best.distance) {
            nearest = Some(RaycastHit {
                hit_pos,
                distance,
                entity,
            });
        }
    }
    nearest
}
