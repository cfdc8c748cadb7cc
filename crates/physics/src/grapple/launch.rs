use bevy::prelude::*;

use super::GrappleConfig;

//below this, the velocity at release is too small to take a direction from
pub const MIN_DIRECTIONAL_SPEED: f32 = 0.1;

//velocity the body leaves the grapple with. replaces the body's velocity, doesn't add to it
//keeps the direction of travel and scales the speed up, with a floor of min_launch_speed
pub fn launch_velocity(
    last_velocity: Vec3,
    attach_point: Vec3,
    position: Vec3,
    config: &GrappleConfig,
) -> Vec3 {
    let speed = last_velocity.length();
    let target_speed = (speed * config.launch_multiplier).max(config.min_launch_speed);

    let mut launch = if speed > MIN_DIRECTIONAL_SPEED {
        last_velocity / speed * target_speed
    } else {
        //barely moving, so fling toward the anchor instead
        (attach_point - position).normalize_or_zero() * config.min_launch_speed
    };

    if config.maintain_vertical_velocity && last_velocity.y > 0.0 {
        launch.y = launch.y.max(last_velocity.y);
    }
    launch
}
