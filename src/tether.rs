use bevy::prelude::*;
use interfaces::scheduling::GrappleSystemSet;
use physics::grapple::Tether;

//draws a tapered strand for every entity with a Tether
pub struct TetherVisualPlugin;

impl Plugin for TetherVisualPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init)
            .add_systems(
                Update,
                (spawn_visuals, update_visuals)
                    .chain()
                    .after(GrappleSystemSet::Visual),
            );
    }
}

#[derive(Component)]
struct TetherVisual {
    user: Entity,
}

#[derive(Resource)]
struct VisualResources {
    material: Handle<StandardMaterial>,
    mesh: Handle<Mesh>,
}

//0.1 wide at the hand, 0.05 at the anchor
const START_RADIUS: f32 = 0.05;
const END_RADIUS: f32 = 0.025;

fn init(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    commands.insert_resource(VisualResources {
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.9, 0.9),
            unlit: true,
            ..default()
        }),
        //unit height along y, bottom at the start of the tether
        mesh: meshes.add(ConicalFrustum {
            radius_top: END_RADIUS,
            radius_bottom: START_RADIUS,
            height: 1.0,
        }),
    })
}

pub fn tether_transform(tether: Tether) -> Transform {
    let delta = tether.end - tether.start;
    let length = delta.length();
    let center = (tether.start + tether.end) / 2.0;
    if length < 1e-4 {
        return Transform::from_translation(center).with_scale(Vec3::ZERO);
    }
    Transform::from_translation(center)
        .with_rotation(Quat::from_rotation_arc(Vec3::Y, delta / length))
        .with_scale(Vec3::new(1.0, length, 1.0))
}

fn spawn_visuals(
    user_query: Query<(Entity, &Tether), Added<Tether>>,
    resources: Res<VisualResources>,
    mut commands: Commands,
) {
    for (user, tether) in user_query.iter() {
        commands.spawn((
            Name::new("tether"),
            TetherVisual { user },
            Mesh3d(resources.mesh.clone()),
            MeshMaterial3d(resources.material.clone()),
            tether_transform(*tether),
        ));
    }
}

fn update_visuals(
    mut visual_query: Query<(Entity, &TetherVisual, &mut Transform)>,
    user_query: Query<&Tether>,
    mut commands: Commands,
) {
    for (entity, visual, mut tf) in visual_query.iter_mut() {
        match user_query.get(visual.user) {
            Ok(tether) => {
                tf.set_if_neq(tether_transform(*tether));
            }
            Err(_) => {
                if let Some(ec) = commands.get_entity(entity) {
                    ec.despawn_recursive();
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transform_spans_tether() {
        let tether = Tether {
            start: Vec3::new(0.0, 1.0, 0.0),
            end: Vec3::new(0.0, 1.0, -8.0),
        };
        let tf = tether_transform(tether);
        //mesh is centered on its origin, so y = -0.5 and 0.5 land on the endpoints
        assert!(tf
            .transform_point(Vec3::new(0.0, -0.5, 0.0))
            .abs_diff_eq(tether.start, 1e-4));
        assert!(tf
            .transform_point(Vec3::new(0.0, 0.5, 0.0))
            .abs_diff_eq(tether.end, 1e-4));
    }

    fn visuals(app: &mut App) -> Vec<(Entity, Transform)> {
        app.world_mut()
            .query_filtered::<(Entity, &Transform), With<TetherVisual>>()
            .iter(app.world())
            .map(|(entity, tf)| (entity, *tf))
            .collect()
    }

    #[test]
    fn one_visual_per_tether_for_its_lifetime() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(TetherVisualPlugin);
        app.update();
        assert!(visuals(&mut app).is_empty());

        let mut tether = Tether {
            start: Vec3::new(0.0, 1.0, 0.0),
            end: Vec3::new(0.0, 5.0, -10.0),
        };
        let user = app.world_mut().spawn(tether).id();
        app.update();
        let spawned = visuals(&mut app);
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].1, tether_transform(tether));

        //follows the endpoints
        tether.start = Vec3::new(2.0, 1.0, 0.0);
        *app.world_mut().get_mut::<Tether>(user).unwrap() = tether;
        app.update();
        let moved = visuals(&mut app);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].0, spawned[0].0);
        assert_eq!(moved[0].1, tether_transform(tether));

        app.world_mut().entity_mut(user).remove::<Tether>();
        app.update();
        assert!(visuals(&mut app).is_empty());

        //attaching again gets a fresh strand
        app.world_mut().entity_mut(user).insert(tether);
        app.update();
        assert_eq!(visuals(&mut app).len(), 1);
    }

    #[test]
    fn degenerate_tether_is_hidden() {
        let tether = Tether {
            start: Vec3::ONE,
            end: Vec3::ONE,
        };
        assert_eq!(tether_transform(tether).scale, Vec3::ZERO);
    }
}
