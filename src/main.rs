//disable console window from popping up on windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::prelude::*;
use controllers::ControllersPlugin;
use debug::DebugPlugin;
use interfaces::InterfacesPlugin;
use physics::PhysicsPlugin;
use scene::ScenePlugin;
use tether::TetherVisualPlugin;
use ui_crosshair::CrosshairPlugin;

mod controllers;
mod debug;
mod scene;
mod tether;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "webline".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            InterfacesPlugin,
            PhysicsPlugin,
            ControllersPlugin,
            CrosshairPlugin,
            TetherVisualPlugin,
            ScenePlugin,
            DebugPlugin,
        ))
        .run();
}
