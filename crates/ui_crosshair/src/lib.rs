use bevy::prelude::*;
use interfaces::{components::LocalPlayer, scheduling::GrappleSystemSet};
use physics::grapple::AttachIndicator;

//(left, top, width, height) in percent of the crosshair box
//a plus with the middle cut out so the target stays visible
const ARMS: [(f32, f32, f32, f32); 4] = [
    (31.25, 46.875, 12.5, 6.25),
    (56.25, 46.875, 12.5, 6.25),
    (46.875, 31.25, 6.25, 12.5),
    (46.875, 56.25, 6.25, 12.5),
];

pub struct CrosshairPlugin;

impl Plugin for CrosshairPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CrosshairPalette>()
            .add_systems(Startup, spawn_crosshair)
            .add_systems(
                Update,
                update_crosshair_color.after(GrappleSystemSet::Visual),
            );
    }
}

#[derive(Resource, Clone, Copy, Debug)]
pub struct CrosshairPalette {
    pub valid: Color,
    pub invalid: Color,
    //side length in pixels
    pub size: f32,
}

impl Default for CrosshairPalette {
    fn default() -> Self {
        Self {
            valid: Color::srgb(0.0, 1.0, 0.0),
            invalid: Color::srgb(1.0, 0.0, 0.0),
            size: 20.0,
        }
    }
}

impl CrosshairPalette {
    //None while grappling, the crosshair keeps whatever it showed when we attached
    pub fn color_for(&self, indicator: AttachIndicator) -> Option<Color> {
        if indicator.suppressed {
            None
        } else if indicator.can_attach {
            Some(self.valid)
        } else {
            Some(self.invalid)
        }
    }
}

#[derive(Component)]
struct Crosshair;

#[derive(Component)]
struct CrosshairArm;

fn spawn_crosshair(mut commands: Commands, palette: Res<CrosshairPalette>) {
    commands
        .spawn((
            Crosshair,
            Name::new("Crosshair"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
        ))
        .with_children(|children| {
            children
                .spawn(Node {
                    width: Val::Px(palette.size),
                    height: Val::Px(palette.size),
                    ..default()
                })
                .with_children(|crosshair| {
                    for (left, top, width, height) in ARMS {
                        crosshair.spawn((
                            CrosshairArm,
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Percent(left),
                                top: Val::Percent(top),
                                width: Val::Percent(width),
                                height: Val::Percent(height),
                                ..default()
                            },
                            BackgroundColor(palette.invalid),
                        ));
                    }
                });
        });
}

fn update_crosshair_color(
    indicator_query: Query<&AttachIndicator, With<LocalPlayer>>,
    mut arm_query: Query<&mut BackgroundColor, With<CrosshairArm>>,
    palette: Res<CrosshairPalette>,
) {
    let Ok(indicator) = indicator_query.get_single() else {
        return;
    };
    let Some(color) = palette.color_for(*indicator) else {
        return;
    };
    for mut background in arm_query.iter_mut() {
        if background.0 != color {
            background.0 = color;
        }
    }
}
