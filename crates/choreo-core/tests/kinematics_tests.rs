use choreo_core::{
    assign, random_unit, Particle, TargetSet, AUDIO_JITTER_GAIN, STEERING_MAGNITUDE,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CUBE: f32 = 500.0;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn crossing_a_wall_reverses_that_velocity_component() {
    let mut rng = rng();
    let mut p = Particle::new(Vec3::new(CUBE / 2.0 + 0.01, 0.0, 0.0), 1.0);
    p.velocity = Vec3::new(1.0, 0.5, 0.0);
    p.tick(None, 0.0, CUBE, &mut rng);
    assert!(p.velocity.x < 0.0);
    assert_eq!(p.velocity.y, 0.5, "in-bounds axes keep their velocity");
    assert!(p.position.x < CUBE / 2.0 + 0.01);
}

#[test]
fn reflection_does_not_clamp_position() {
    let mut p = Particle::new(Vec3::new(0.0, -CUBE, 0.0), 1.0);
    p.velocity = Vec3::new(0.0, -2.0, 0.0);
    p.reflect(CUBE);
    assert_eq!(p.position.y, -CUBE);
    assert_eq!(p.velocity.y, 2.0);
}

#[test]
fn reflection_keeps_a_free_particle_bounded() {
    let mut rng = rng();
    let mut p = Particle::new(Vec3::new(CUBE / 2.0 + 0.01, 10.0, -20.0), 1.0);
    p.velocity = Vec3::new(1.0, 0.7, -0.9);
    let limit = CUBE / 2.0 + p.velocity.abs().max_element() + 0.1;
    for step in 0..1000 {
        p.tick(None, 0.0, CUBE, &mut rng);
        assert!(
            p.position.abs().max_element() <= limit,
            "escaped at step {step}: {:?}",
            p.position
        );
    }
}

#[test]
fn steering_alone_closes_distance_monotonically() {
    let mut rng = rng();
    let target = Vec3::ZERO;
    let mut p = Particle::new(Vec3::new(100.0, 0.0, 0.0), 1.0);
    let mut prev = p.position.distance(target);
    for _ in 0..40 {
        p.tick(Some(target), 0.0, CUBE, &mut rng);
        let d = p.position.distance(target);
        assert!(d <= prev, "distance grew from {prev} to {d}");
        prev = d;
    }
    assert!(prev < 100.0);
}

#[test]
fn steering_force_has_constant_magnitude() {
    let mut near = Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
    let mut far = Particle::new(Vec3::new(0.0, 0.0, 5000.0), 1.0);
    near.steer_toward(Vec3::ZERO);
    far.steer_toward(Vec3::ZERO);
    assert!((near.acceleration.length() - STEERING_MAGNITUDE).abs() < 1e-6);
    assert!((far.acceleration.length() - STEERING_MAGNITUDE).abs() < 1e-6);
    assert!(far.acceleration.z < 0.0);
}

#[test]
fn steering_at_the_target_adds_nothing() {
    let mut p = Particle::new(Vec3::ONE, 1.0);
    p.steer_toward(Vec3::ONE);
    assert_eq!(p.acceleration, Vec3::ZERO);
}

#[test]
fn three_particles_settle_on_a_single_target() {
    let mut rng = rng();
    // Starts are close on purpose: steering is undamped, so a particle that
    // starts at distance d keeps orbiting the target with amplitude about d.
    let mut particles = vec![
        Particle::new(Vec3::new(0.05, 0.0, 0.0), 1.0),
        Particle::new(Vec3::new(0.0, -0.08, 0.03), 1.0),
        Particle::new(Vec3::new(0.02, 0.02, -0.06), 1.0),
    ];
    let targets = TargetSet::new(vec![Vec3::ZERO]);
    let assignment = assign(&particles, &targets);
    assert!(assignment.iter().all(|t| t == Some(0)));
    assignment.apply_to(&mut particles);

    for _ in 0..50 {
        for p in &mut particles {
            let target = p.target.and_then(|i| targets.get(i));
            p.tick(target, 0.0, CUBE, &mut rng);
            assert!(p.velocity.length() <= STEERING_MAGNITUDE + 1e-5);
        }
    }
    for p in &particles {
        assert!(p.position.length() < 0.25, "residual {:?}", p.position);
    }
}

#[test]
fn no_target_and_no_energy_means_rest() {
    let mut rng = rng();
    let start = Vec3::new(12.0, -3.0, 40.0);
    let mut p = Particle::new(start, 1.0);
    for _ in 0..10 {
        p.tick(None, 0.0, CUBE, &mut rng);
    }
    assert_eq!(p.position, start);
    assert_eq!(p.acceleration, Vec3::ZERO);
}

#[test]
fn integrate_consumes_the_accumulator() {
    let mut p = Particle::new(Vec3::ZERO, 1.0);
    p.apply_force(Vec3::new(1.0, 0.0, 0.0));
    p.apply_force(Vec3::new(0.0, 2.0, 0.0));
    p.integrate();
    assert_eq!(p.velocity, Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(p.position, Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(p.acceleration, Vec3::ZERO);
}

#[test]
fn jitter_scales_with_band_energy() {
    let mut rng = rng();
    let mut p = Particle::new(Vec3::ZERO, 1.0);
    p.tick(None, 100.0, CUBE, &mut rng);
    let expected = AUDIO_JITTER_GAIN * 100.0;
    assert!((p.acceleration.length() - expected).abs() < 1e-4);
}

#[test]
fn jitter_is_independent_per_particle() {
    let mut rng = rng();
    let mut a = Particle::new(Vec3::ZERO, 1.0);
    let mut b = Particle::new(Vec3::ZERO, 1.0);
    a.tick(None, 50.0, CUBE, &mut rng);
    b.tick(None, 50.0, CUBE, &mut rng);
    assert_ne!(a.acceleration, b.acceleration);
}

#[test]
fn zero_or_negative_energy_adds_no_jitter() {
    let mut rng = rng();
    let mut p = Particle::new(Vec3::ZERO, 1.0);
    p.jitter(&mut rng, 0.0);
    p.jitter(&mut rng, -3.0);
    assert_eq!(p.acceleration, Vec3::ZERO);
}

#[test]
fn scatter_speed_is_in_range() {
    let mut rng = rng();
    let mut p = Particle::new(Vec3::ZERO, 1.0);
    for _ in 0..200 {
        p.scatter(&mut rng);
        let speed = p.velocity.length();
        assert!((5.0 - 1e-3..=10.0 + 1e-3).contains(&speed), "speed {speed}");
    }
}

#[test]
fn spawned_particles_start_inside_the_cube_at_rest() {
    let mut rng = rng();
    for _ in 0..500 {
        let p = Particle::spawn(&mut rng, CUBE);
        assert!(p.position.length() <= CUBE / 2.0 + 1e-3);
        assert!((0.5..=1.0).contains(&p.radius));
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(p.target.is_none());
    }
}

#[test]
fn random_directions_are_unit_length() {
    let mut rng = rng();
    for _ in 0..500 {
        let v = random_unit(&mut rng);
        assert!((v.length() - 1.0).abs() < 1e-4);
    }
}
