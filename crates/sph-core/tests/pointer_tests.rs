use glam::Vec2;
use sph_core::forces::pointer::{compute_external_force, InteractionForce};

const GRAVITY: f32 = 9.0;

#[test]
fn test_inactive_interaction_is_plain_gravity() {
    let interaction = InteractionForce::default();
    assert!(!interaction.is_active());

    let acc = compute_external_force(
        Vec2::new(10.0, 10.0),
        Vec2::new(5.0, -3.0),
        GRAVITY,
        &interaction,
    );
    assert_eq!(acc, Vec2::new(0.0, GRAVITY));
}

#[test]
fn test_outside_radius_is_plain_gravity() {
    let interaction = InteractionForce::new(50.0, Vec2::new(200.0, 200.0));
    let acc = compute_external_force(
        Vec2::new(260.0, 200.0),
        Vec2::new(1.0, 1.0),
        GRAVITY,
        &interaction,
    );
    assert_eq!(acc, Vec2::new(0.0, GRAVITY));

    // Exactly on the edge counts as outside.
    let acc = compute_external_force(Vec2::new(250.0, 200.0), Vec2::ZERO, GRAVITY, &interaction);
    assert_eq!(acc, Vec2::new(0.0, GRAVITY));
}

#[test]
fn test_attract_pulls_toward_center() {
    let center = Vec2::new(200.0, 200.0);
    let interaction = InteractionForce::new(50.0, center);
    let pos = Vec2::new(175.0, 200.0);

    let acc = compute_external_force(pos, Vec2::ZERO, GRAVITY, &interaction);

    // centre_t = 0.5, gravity weight = 1 - 0.5 * min(1, 5) = 0.5
    let expected = Vec2::new(0.0, GRAVITY * 0.5) + Vec2::X * 0.5 * 50.0;
    assert!((acc - expected).length() < 1e-4, "acc={acc}, expected={expected}");
}

#[test]
fn test_negative_strength_pushes_away() {
    let center = Vec2::new(200.0, 200.0);
    let interaction = InteractionForce::new(-50.0, center);
    assert_eq!(interaction.radius(), 50.0);

    let acc = compute_external_force(Vec2::new(175.0, 200.0), Vec2::ZERO, 0.0, &interaction);
    assert!(acc.x < 0.0, "expected push away from center, got {acc}");
    assert!(acc.y.abs() < 1e-6);
}

#[test]
fn test_interaction_damps_velocity() {
    let center = Vec2::new(0.0, 0.0);
    let interaction = InteractionForce::new(40.0, center);
    let pos = Vec2::new(0.0, 10.0);
    let vel = Vec2::new(8.0, 0.0);

    let still = compute_external_force(pos, Vec2::ZERO, 0.0, &interaction);
    let moving = compute_external_force(pos, vel, 0.0, &interaction);

    // centre_t = 0.75
    assert!((moving - still - (-vel * 0.75)).length() < 1e-5);
}

#[test]
fn test_particle_at_center_stays_finite() {
    let center = Vec2::new(30.0, 30.0);
    let interaction = InteractionForce::new(20.0, center);

    let acc = compute_external_force(center, Vec2::new(1.0, 0.0), GRAVITY, &interaction);
    assert!(acc.is_finite());
    // centre_t = 1, gravity weight = 1 - min(1, 2) = 0
    assert!((acc - Vec2::new(-1.0, 0.0)).length() < 1e-6, "acc={acc}");
}

#[test]
fn test_small_radius_keeps_part_of_gravity() {
    let center = Vec2::new(0.0, 0.0);
    let interaction = InteractionForce::new(4.0, center);
    let acc = compute_external_force(center, Vec2::ZERO, GRAVITY, &interaction);
    // gravity weight = 1 - 1 * min(1, 0.4) = 0.6
    assert!((acc.y - GRAVITY * 0.6).abs() < 1e-5, "acc={acc}");
}
