//! Brute-force nearest-target assignment.
//!
//! Every particle scans the whole target set, so a pass costs
//! O(particles x targets). It only runs when the target set is replaced.

use crate::particle::Particle;
use crate::shape::TargetSet;
use glam::Vec3;

/// Index of the target closest to `position`, first one wins on ties.
/// Returns `None` for an empty slice.
#[inline]
pub fn nearest_target(position: Vec3, targets: &[Vec3]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_d2 = f32::INFINITY;
    for (i, t) in targets.iter().enumerate() {
        let d2 = position.distance_squared(*t);
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some(i);
        }
    }
    best
}

/// One target index (into the `TargetSet` it was computed from) per particle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    slots: Vec<Option<usize>>,
}

impl Assignment {
    /// Every particle free-floating.
    pub fn unassigned(particle_count: usize) -> Self {
        Self {
            slots: vec![None; particle_count],
        }
    }

    #[inline]
    pub fn get(&self, particle_index: usize) -> Option<usize> {
        self.slots.get(particle_index).copied().flatten()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.slots.iter().copied()
    }

    /// Number of particles that received a target.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Number of distinct targets that received at least one particle.
    pub fn occupied_targets(&self, target_count: usize) -> usize {
        let mut seen = vec![false; target_count];
        for t in self.slots.iter().flatten() {
            if let Some(s) = seen.get_mut(*t) {
                *s = true;
            }
        }
        seen.into_iter().filter(|s| *s).count()
    }

    /// Overwrite each particle's target with this assignment.
    pub fn apply_to(&self, particles: &mut [Particle]) {
        for (i, p) in particles.iter_mut().enumerate() {
            p.target = self.get(i);
        }
    }
}

/// Assign every particle to its nearest point in `targets`.
///
/// Many particles may share a target. An empty target set leaves every
/// particle unassigned.
pub fn assign(particles: &[Particle], targets: &TargetSet) -> Assignment {
    let points = targets.points();
    let slots = particles
        .iter()
        .map(|p| nearest_target(p.position, points))
        .collect();
    Assignment { slots }
}
