use bevy::{prelude::*, window::CursorGrabMode};
use interfaces::components::LocalPlayer;
use leafwing_input_manager::prelude::ActionState;
use physics::grapple::GrappleInput;

use super::{Action, TickMovement};

#[derive(Component, Default)]
pub struct RotateWithMouse {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub pitch_bound: f32,
    pub lock_pitch: bool,
    pub lock_yaw: bool,
}

#[derive(Component)]
pub struct FollowPlayer {
    pub offset: Vec3,
}

#[derive(Resource)]
pub struct CursorLocked(pub bool);

//radians per pixel of mouse motion
#[derive(Resource, Clone, Copy, Debug)]
pub struct MouseSensitivity(pub f32);

impl Default for MouseSensitivity {
    fn default() -> Self {
        Self(0.003)
    }
}

pub(crate) fn update_window_focused(mut focused: ResMut<CursorLocked>, query: Query<&Window>) {
    focused.0 = query
        .get_single()
        .map(|w| w.cursor_options.grab_mode != CursorGrabMode::None)
        .unwrap_or(false);
}

pub(crate) fn grab_cursor(
    player_query: Query<&ActionState<Action>, With<LocalPlayer>>,
    mut window_query: Query<&mut Window>,
    focused: Res<CursorLocked>,
) {
    let Ok(action) = player_query.get_single() else {
        return;
    };
    let Ok(mut window) = window_query.get_single_mut() else {
        return;
    };
    if !focused.0 && action.just_pressed(&Action::Grapple) {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else if focused.0 && action.just_pressed(&Action::FreeCursor) {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

//local space wasd, rotated by the yaw of the player
fn input_direction(action: &ActionState<Action>, rotation: Quat) -> Vec3 {
    let mut dv = Vec3::ZERO;
    dv.z -= if action.pressed(&Action::MoveForward) {
        1.0
    } else {
        0.0
    };
    dv.z += if action.pressed(&Action::MoveBack) {
        1.0
    } else {
        0.0
    };
    dv.x += if action.pressed(&Action::MoveRight) {
        1.0
    } else {
        0.0
    };
    dv.x -= if action.pressed(&Action::MoveLeft) {
        1.0
    } else {
        0.0
    };
    let (y_rot, _, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_axis_angle(Vec3::Y, y_rot) * dv
}

pub(crate) fn move_player(
    mut query: Query<(&Transform, &mut TickMovement, &ActionState<Action>), With<LocalPlayer>>,
    focused: Res<CursorLocked>,
) {
    for (tf, mut tm, action) in query.iter_mut() {
        if !focused.0 {
            tm.direction = Vec3::ZERO;
            continue;
        }
        tm.direction = input_direction(action, tf.rotation);
        //sticky until a fixed tick consumes it, frames can be shorter than ticks
        tm.jump |= action.just_pressed(&Action::Jump);
    }
}

//presses only count once the cursor is captured. releases always count so the web can't get stuck
pub(crate) fn read_grapple_input(
    mut query: Query<(&ActionState<Action>, &mut GrappleInput), With<LocalPlayer>>,
    focused: Res<CursorLocked>,
) {
    for (action, mut input) in query.iter_mut() {
        if focused.0 && action.just_pressed(&Action::Grapple) {
            input.pressed = true;
        }
        if action.just_released(&Action::Grapple) {
            input.released = true;
        }
    }
}

pub(crate) fn rotate_mouse(
    mut query: Query<(
        &mut Transform,
        &mut RotateWithMouse,
        &ActionState<Action>,
    )>,
    focused: Res<CursorLocked>,
    sensitivity: Res<MouseSensitivity>,
) {
    if !focused.0 {
        return;
    }
    for (mut tf, mut rotation, action) in query.iter_mut() {
        let delta = action.axis_pair(&Action::Look);
        if !rotation.lock_yaw {
            rotation.yaw -= delta.x * sensitivity.0;
        }
        if !rotation.lock_pitch {
            rotation.pitch -= delta.y * sensitivity.0;
        }

        rotation.pitch = rotation
            .pitch
            .clamp(-rotation.pitch_bound, rotation.pitch_bound);

        tf.rotation = Quat::from_axis_angle(Vec3::Y, rotation.yaw)
            * Quat::from_axis_angle(Vec3::X, rotation.pitch)
            * Quat::from_axis_angle(Vec3::Z, rotation.roll);
    }
}

//the camera is its own entity so it can pitch while the body only yaws
pub(crate) fn follow_local_player(
    player_query: Query<(&Transform, &RotateWithMouse), With<LocalPlayer>>,
    mut follow_query: Query<
        (&FollowPlayer, &mut Transform, Option<&mut RotateWithMouse>),
        Without<LocalPlayer>,
    >,
) {
    if let Ok((player_tf, player_rot)) = player_query.get_single() {
        for (follow, mut follow_tf, opt_follow_rot) in follow_query.iter_mut() {
            follow_tf.translation = player_tf.translation + follow.offset;
            if let Some(mut follow_rot) = opt_follow_rot {
                if follow_rot.yaw != player_rot.yaw {
                    follow_rot.yaw = player_rot.yaw;
                    follow_tf.rotation = Quat::from_axis_angle(Vec3::Y, follow_rot.yaw)
                        * Quat::from_axis_angle(Vec3::X, follow_rot.pitch)
                        * Quat::from_axis_angle(Vec3::Z, follow_rot.roll);
                }
            }
        }
    }
}
