use choreo_core::{assign, nearest_target, Particle, TargetSet};
use glam::Vec3;

fn particles_at(positions: &[Vec3]) -> Vec<Particle> {
    positions.iter().map(|p| Particle::new(*p, 1.0)).collect()
}

#[test]
fn single_target_takes_every_particle() {
    let particles = particles_at(&[
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(-40.0, 12.0, 3.0),
        Vec3::new(0.0, 0.0, -250.0),
    ]);
    let targets = TargetSet::new(vec![Vec3::new(5.0, 5.0, 5.0)]);
    let a = assign(&particles, &targets);
    assert_eq!(a.len(), 3);
    assert!(a.iter().all(|t| t == Some(0)));
    assert_eq!(a.occupied_targets(targets.len()), 1);
}

#[test]
fn empty_target_set_leaves_everyone_unassigned() {
    let particles = particles_at(&[Vec3::ZERO, Vec3::ONE]);
    let a = assign(&particles, &TargetSet::empty());
    assert_eq!(a.len(), 2);
    assert_eq!(a.assigned_count(), 0);
    assert!(a.iter().all(|t| t.is_none()));
}

#[test]
fn empty_pool_yields_empty_assignment() {
    let targets = TargetSet::new(vec![Vec3::ZERO]);
    let a = assign(&[], &targets);
    assert!(a.is_empty());
}

#[test]
fn picks_the_nearest_point() {
    let targets = TargetSet::new(vec![
        Vec3::new(-100.0, 0.0, 0.0),
        Vec3::new(0.0, 100.0, 0.0),
        Vec3::new(100.0, 0.0, 0.0),
    ]);
    let particles = particles_at(&[
        Vec3::new(90.0, 5.0, 0.0),
        Vec3::new(-60.0, 10.0, 20.0),
        Vec3::new(3.0, 70.0, -4.0),
    ]);
    let a = assign(&particles, &targets);
    assert_eq!(a.get(0), Some(2));
    assert_eq!(a.get(1), Some(0));
    assert_eq!(a.get(2), Some(1));
}

#[test]
fn ties_go_to_the_first_target() {
    let targets = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)];
    assert_eq!(nearest_target(Vec3::ZERO, &targets), Some(0));
    let swapped = [targets[1], targets[0]];
    assert_eq!(nearest_target(Vec3::ZERO, &swapped), Some(0));
}

#[test]
fn nearest_of_nothing_is_none() {
    assert_eq!(nearest_target(Vec3::ONE, &[]), None);
}

#[test]
fn many_particles_may_share_a_target() {
    let targets = TargetSet::new(vec![Vec3::ZERO, Vec3::new(1000.0, 0.0, 0.0)]);
    let particles = particles_at(&[Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(990.0, 0.0, 0.0)]);
    let a = assign(&particles, &targets);
    assert_eq!(a.iter().filter(|t| *t == Some(0)).count(), 3);
    assert_eq!(a.get(3), Some(1));
    assert_eq!(a.occupied_targets(2), 2);
}

#[test]
fn apply_to_overwrites_previous_targets() {
    let mut particles = particles_at(&[Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0)]);
    let targets = TargetSet::new(vec![Vec3::new(60.0, 0.0, 0.0)]);
    assign(&particles, &targets).apply_to(&mut particles);
    assert!(particles.iter().all(|p| p.target == Some(0)));

    assign(&particles, &TargetSet::empty()).apply_to(&mut particles);
    assert!(particles.iter().all(|p| p.target.is_none()));
}
