use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::SurfaceLayers;

//tuning for one grapple user. immutable once the controller is built
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Reflect)]
pub struct GrappleConfig {
    //range of the target scan
    pub max_distance: f32,
    //starting pull acceleration, also how fast it ramps (half of this per second)
    pub pull_acceleration: f32,
    pub pull_acceleration_cap: f32,
    pub launch_multiplier: f32,
    pub min_launch_speed: f32,
    //don't let the launch lower an upward velocity
    pub maintain_vertical_velocity: bool,
    //auto release once closer than this to the attach point
    pub attach_radius_threshold: f32,
    #[reflect(ignore)]
    pub attachable_mask: SurfaceLayers,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            max_distance: 20.0,
            pull_acceleration: 25.0,
            pull_acceleration_cap: 40.0,
            launch_multiplier: 1.5,
            min_launch_speed: 10.0,
            maintain_vertical_velocity: true,
            attach_radius_threshold: 2.0,
            attachable_mask: SurfaceLayers::GRAPPLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrappleConfigErr {
    //field name and the offending value
    NotFinite(&'static str, f32),
    Negative(&'static str, f32),
    CapBelowBase { base: f32, cap: f32 },
    EmptyMask,
}

impl fmt::Display for GrappleConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrappleConfigErr::NotFinite(name, value) => write!(f, "{name} is not finite ({value})"),
            GrappleConfigErr::Negative(name, value) => write!(f, "{name} is negative ({value})"),
            GrappleConfigErr::CapBelowBase { base, cap } => write!(
                f,
                "pull_acceleration_cap ({cap}) is below pull_acceleration ({base})"
            ),
            GrappleConfigErr::EmptyMask => write!(f, "attachable_mask has no layers"),
        }
    }
}

impl std::error::Error for GrappleConfigErr {}

impl GrappleConfig {
    pub fn validate(&self) -> Result<(), GrappleConfigErr> {
        let fields = [
            ("max_distance", self.max_distance),
            ("pull_acceleration", self.pull_acceleration),
            ("pull_acceleration_cap", self.pull_acceleration_cap),
            ("launch_multiplier", self.launch_multiplier),
            ("min_launch_speed", self.min_launch_speed),
            ("attach_radius_threshold", self.attach_radius_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(GrappleConfigErr::NotFinite(name, value));
            }
            if value < 0.0 {
                return Err(GrappleConfigErr::Negative(name, value));
            }
        }
        if self.pull_acceleration_cap < self.pull_acceleration {
            return Err(GrappleConfigErr::CapBelowBase {
                base: self.pull_acceleration,
                cap: self.pull_acceleration_cap,
            });
        }
        if self.attachable_mask.is_empty() {
            return Err(GrappleConfigErr::EmptyMask);
        }
        Ok(())
    }

    pub fn with_mask(self, attachable_mask: SurfaceLayers) -> Self {
        Self {
            attachable_mask,
            ..self
        }
    }
}
