use std::f32::consts::PI;

use bevy::{pbr::light_consts, prelude::*};
use interfaces::components::{AimOrigin, FirePoint, LocalPlayer};
use itertools::iproduct;
use leafwing_input_manager::InputManagerBundle;
use physics::{
    collision::{Aabb, Surface, SurfaceLayers},
    grapple::{GrappleConfig, GrappleController},
    PhysicsBundle,
};
use rand::Rng;

use crate::controllers::{get_input_map, ControllableBundle, FollowPlayer, RotateWithMouse};

//flat floor with a field of pillars and floating slabs to swing between
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            brightness: 300.0,
            ..default()
        })
        .add_systems(Startup, (spawn_level, spawn_local_player));
    }
}

const FLOOR_SIZE: f32 = 200.0;
const GRID_SPACING: f32 = 24.0;
const GRID_HALF_EXTENT: i32 = 3;
const EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.7, 0.0);

fn spawn_surface(
    name: &'static str,
    size: Vec3,
    pos: Vec3,
    layers: SurfaceLayers,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    commands: &mut Commands,
) {
    commands.spawn((
        Name::new(name),
        Surface::new(layers),
        Aabb::centered(size),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(pos),
    ));
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_size = Vec3::new(FLOOR_SIZE, 1.0, FLOOR_SIZE);
    spawn_surface(
        "floor",
        floor_size,
        Vec3::new(0.0, -0.5, 0.0),
        SurfaceLayers::TERRAIN,
        meshes.add(Cuboid::from_size(floor_size)),
        materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.35, 0.3),
            perceptual_roughness: 1.0,
            ..default()
        }),
        &mut commands,
    );

    let grapple_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.45, 0.35),
        ..default()
    });
    let slab_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.4, 0.55),
        ..default()
    });
    let mut rng = rand::thread_rng();
    for (x, z) in iproduct!(
        -GRID_HALF_EXTENT..=GRID_HALF_EXTENT,
        -GRID_HALF_EXTENT..=GRID_HALF_EXTENT
    ) {
        //keep the spawn point clear
        if x == 0 && z == 0 {
            continue;
        }
        let jitter = Vec2::new(rng.gen_range(-6.0..6.0), rng.gen_range(-6.0..6.0));
        let base = Vec2::new(x as f32, z as f32) * GRID_SPACING + jitter;
        if rng.gen_bool(0.6) {
            let size = Vec3::new(
                rng.gen_range(2.0..5.0),
                rng.gen_range(10.0..30.0),
                rng.gen_range(2.0..5.0),
            );
            spawn_surface(
                "pillar",
                size,
                Vec3::new(base.x, size.y / 2.0, base.y),
                SurfaceLayers::GRAPPLE | SurfaceLayers::TERRAIN,
                meshes.add(Cuboid::from_size(size)),
                grapple_material.clone(),
                &mut commands,
            );
        } else {
            let size = Vec3::new(rng.gen_range(6.0..12.0), 1.0, rng.gen_range(6.0..12.0));
            spawn_surface(
                "slab",
                size,
                Vec3::new(base.x, rng.gen_range(8.0..16.0), base.y),
                SurfaceLayers::GRAPPLE,
                meshes.add(Cuboid::from_size(size)),
                slab_material.clone(),
                &mut commands,
            );
        }
    }

    commands.spawn((
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 3.0, PI / 6.0, 0.0)),
    ));
}

fn spawn_local_player(mut commands: Commands) {
    let spawn_point = Vec3::new(0.0, 1.0, 0.0);
    let camera = commands
        .spawn((
            Name::new("camera"),
            Camera3d::default(),
            Transform::from_translation(spawn_point + EYE_OFFSET),
            FollowPlayer { offset: EYE_OFFSET },
            RotateWithMouse {
                pitch_bound: PI * 0.49,
                lock_yaw: true,
                ..default()
            },
            InputManagerBundle::with_map(get_input_map()),
        ))
        .id();
    //right hand, a bit below and in front of the eye
    let hand = commands
        .spawn((
            Name::new("hand"),
            Transform::from_xyz(0.35, -0.3, -0.5),
            Visibility::default(),
        ))
        .set_parent(camera)
        .id();
    info!("Spawning local player!");
    commands.spawn((
        Name::new("local player"),
        LocalPlayer,
        Transform::from_translation(spawn_point),
        PhysicsBundle {
            collider: Aabb::centered(Vec3::new(0.8, 2.0, 0.8)),
            ..default()
        },
        ControllableBundle::default(),
        RotateWithMouse {
            lock_pitch: true,
            ..default()
        },
        GrappleController::new_or_default(GrappleConfig::default()),
        AimOrigin(camera),
        FirePoint(hand),
        InputManagerBundle::with_map(get_input_map()),
    ));
}
