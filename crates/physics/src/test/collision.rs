use bevy::math::Vec3;

use crate::collision::Aabb;

#[test]
fn aabb_intersects_true() {
    assert!(Aabb::intersects_aabb(
        Aabb::new(Vec3::new(0.5, 1.0, 1.5), Vec3::ZERO),
        Vec3::new(0.5, 2.0, 4.5),
        Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO),
        Vec3::new(0.0, 1.5, 3.5),
    ))
}

#[test]
fn aabb_intersects_false() {
    assert!(!Aabb::intersects_aabb(
        Aabb::new(Vec3::new(0.5, 1.0, 1.5), Vec3::ZERO),
        Vec3::new(2.5, 5.0, 7.5),
        Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO),
        Vec3::ZERO,
    ))
}

#[test]
fn penetration_picks_shallowest_axis() {
    let body = Aabb::centered(Vec3::new(1.0, 2.0, 1.0));
    let floor = Aabb::centered(Vec3::new(100.0, 1.0, 100.0));
    //body bottom at -0.2, floor top at 0
    let push = body.penetration(Vec3::new(3.0, 0.8, -2.0), floor, Vec3::new(0.0, -0.5, 0.0));
    let push = push.unwrap();
    assert!((push - Vec3::new(0.0, 0.2, 0.0)).length() < 1e-5);
}

#[test]
fn no_penetration_when_apart() {
    let body = Aabb::centered(Vec3::ONE);
    assert_eq!(
        body.penetration(Vec3::new(0.0, 5.0, 0.0), body, Vec3::ZERO),
        None
    );
}

#[test]
fn sweep_ray_reports_entry_time() {
    let aabb = Aabb::centered(Vec3::splat(2.0));
    let (t, point) = aabb
        .sweep_ray(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0))
        .unwrap();
    assert!((t - 4.5).abs() < 1e-5);
    assert!((point - Vec3::new(0.0, 0.0, -9.0)).length() < 1e-4);
}
