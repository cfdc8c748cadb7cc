use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Grapple,
    Look,
    FreeCursor,
    ToggleInspector,
    ToggleDebugGizmos,
}

impl Actionlike for Action {
    fn input_control_kind(&self) -> InputControlKind {
        match self {
            Action::Look => InputControlKind::DualAxis,
            _ => InputControlKind::Button,
        }
    }
}

pub fn get_input_map() -> InputMap<Action> {
    InputMap::default()
        .with(Action::MoveForward, KeyCode::KeyW)
        .with(Action::MoveLeft, KeyCode::KeyA)
        .with(Action::MoveBack, KeyCode::KeyS)
        .with(Action::MoveRight, KeyCode::KeyD)
        .with(Action::Jump, KeyCode::Space)
        .with(Action::Grapple, MouseButton::Left)
        .with_dual_axis(Action::Look, MouseMove::default())
        .with(Action::FreeCursor, KeyCode::Escape)
        .with(Action::ToggleInspector, KeyCode::F1)
        .with(Action::ToggleDebugGizmos, KeyCode::F3)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grapple_is_left_mouse() {
        let map = get_input_map();
        let bindings = map.get_buttonlike(&Action::Grapple).unwrap();
        assert_eq!(bindings.len(), 1);
        assert!(map.get_dual_axislike(&Action::Look).is_some());
    }
}
