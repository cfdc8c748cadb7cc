use bevy::prelude::*;

//toggled at runtime, gates the debug gizmo systems
#[derive(Resource, Default, Deref, DerefMut, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebugGizmos(pub bool);
