use bevy::prelude::*;
use bitflags::bitflags;
use interfaces::scheduling::PhysicsSystemSet;
use serde::{Deserialize, Serialize};

use super::movement::Velocity;

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            resolve_surface_overlap
                .in_set(PhysicsSystemSet::UpdatePosition)
                .after(super::movement::translate),
        )
        .register_type::<Aabb>()
        .register_type::<Grounded>();
    }
}

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SurfaceLayers : u32 {
        const TERRAIN = 0b001;
        const GRAPPLE = 0b010;
        const PROP    = 0b100;
    }
}

//static world geometry. bodies collide with every surface, only some layers can be grappled
#[derive(Component, Clone, Copy, Debug, Serialize, Deserialize)]
#[require(Aabb, Transform)]
pub struct Surface {
    pub layers: SurfaceLayers,
}

impl Surface {
    pub fn new(layers: SurfaceLayers) -> Self {
        Self { layers }
    }
    pub fn matches(self, mask: SurfaceLayers) -> bool {
        self.layers.intersects(mask)
    }
}

//set during the fixed tick if the body was pushed up out of a surface
#[derive(Component, Default, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Grounded(pub bool);

//from offset to offset + size
#[derive(Component, Clone, Copy, PartialEq, Default, Reflect, Debug, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Aabb {
    pub size: Vec3,
    pub offset: Vec3,
}

impl Aabb {
    pub fn new(size: Vec3, offset: Vec3) -> Self {
        Self { size, offset }
    }
    pub fn centered(size: Vec3) -> Self {
        Self {
            size,
            offset: -size / 2.0,
        }
    }
    pub fn min(self) -> Vec3 {
        self.offset
    }
    pub fn world_min(self, pos: Vec3) -> Vec3 {
        self.min() + pos
    }
    pub fn max(self) -> Vec3 {
        self.offset + self.size
    }
    pub fn world_max(self, pos: Vec3) -> Vec3 {
        self.max() + pos
    }

    pub fn intersects_aabb(self, my_pos: Vec3, other: Aabb, other_pos: Vec3) -> bool {
        let my_min = self.world_min(my_pos);
        let my_max = self.world_max(my_pos);
        let other_min = other.world_min(other_pos);
        let other_max = other.world_max(other_pos);
        (my_min.x < other_max.x && my_max.x > other_min.x)
            && (my_min.y < other_max.y && my_max.y > other_min.y)
            && (my_min.z < other_max.z && my_max.z > other_min.z)
    }

    //slab test, returns (time, hit point) where time is in units of ray_delta
    //a ray starting inside the box hits at time 0
    pub fn sweep_ray(self, my_pos: Vec3, ray_start: Vec3, ray_delta: Vec3) -> Option<(f32, Vec3)> {
        let my_min = self.world_min(my_pos);
        let my_max = self.world_max(my_pos);

        //get times for intersection on each axis
        let mut t_near = (my_min - ray_start) / ray_delta;
        let mut t_far = (my_max - ray_start) / ray_delta;

        //0/0: ray runs exactly along a face plane, treat as a miss
        if t_near.is_nan() || t_far.is_nan() {
            return None;
        }

        //sort times, make sure that near is closer than far
        if t_near.x > t_far.x {
            std::mem::swap(&mut t_near.x, &mut t_far.x);
        }
        if t_near.y > t_far.y {
            std::mem::swap(&mut t_near.y, &mut t_far.y);
        }
        if t_near.z > t_far.z {
            std::mem::swap(&mut t_near.z, &mut t_far.z);
        }

        let t_hit_near = t_near.max_element();
        let t_hit_far = t_far.min_element();

        //no collision if far point is behind the ray origin
        if t_hit_far < 0.0 || t_hit_far < t_hit_near {
            return None;
        }

        let t = t_hit_near.max(0.0);
        Some((t, ray_start + t * ray_delta))
    }

    //smallest translation that moves self (at my_pos) out of other, None if not overlapping
    pub fn penetration(self, my_pos: Vec3, other: Aabb, other_pos: Vec3) -> Option<Vec3> {
        if !self.intersects_aabb(my_pos, other, other_pos) {
            return None;
        }
        let my_min = self.world_min(my_pos);
        let my_max = self.world_max(my_pos);
        let other_min = other.world_min(other_pos);
        let other_max = other.world_max(other_pos);
        //positive pushes along +axis, negative along -axis
        let push_pos = other_max - my_min;
        let push_neg = my_max - other_min;
        let candidates = [
            Vec3::X * push_pos.x,
            Vec3::NEG_X * push_neg.x,
            Vec3::Y * push_pos.y,
            Vec3::NEG_Y * push_neg.y,
            Vec3::Z * push_pos.z,
            Vec3::NEG_Z * push_neg.z,
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
    }
}

fn resolve_surface_overlap(
    mut body_query: Query<
        (&mut Transform, &mut Velocity, &Aabb, Option<&mut Grounded>),
        Without<Surface>,
    >,
    //surfaces are top level entities, so their local transform is their world transform
    surface_query: Query<(&Transform, &Aabb), With<Surface>>,
) {
    for (mut tf, mut v, collider, opt_grounded) in body_query.iter_mut() {
        let mut grounded = false;
        for (surface_tf, surface_aabb) in surface_query.iter() {
            let Some(push) =
                collider.penetration(tf.translation, *surface_aabb, surface_tf.translation)
            else {
                continue;
            };
            tf.translation += push;
            //kill the velocity going into the surface
            let normal = push.normalize_or_zero();
            let into = v.0.dot(normal);
            if into < 0.0 {
                v.0 -= normal * into;
            }
            grounded |= normal.y > 0.5;
        }
        if let Some(mut g) = opt_grounded {
            g.0 = grounded;
        }
    }
}
