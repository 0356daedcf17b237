use crate::constants::MOON_RADIUS;
use glam::{Quat, Vec2, Vec3};
use rand::Rng;

/// Decorative sphere of the planetary view. Static; animated only by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    pub base_position: Vec3,
    pub index: usize,
}

impl Moon {
    /// World position after `elapsed_sec` of spin about the Y axis.
    #[inline]
    pub fn position_at(&self, elapsed_sec: f32) -> Vec3 {
        Quat::from_rotation_y(elapsed_sec) * self.base_position
    }

    /// Pointer hit-test against the static base position; `pointer` is
    /// relative to the viewport centre and taken to lie in the z = 0 plane.
    #[inline]
    pub fn hit(&self, pointer: Vec2) -> bool {
        self.base_position.distance(pointer.extend(0.0)) < MOON_RADIUS
    }
}

/// Scatter `count` moons uniformly in the cube `[-distance, distance]^3`.
pub fn create_moons<R: Rng + ?Sized>(rng: &mut R, count: usize, distance: f32) -> Vec<Moon> {
    let mut coord = || (rng.gen::<f32>() * 2.0 - 1.0) * distance;
    (0..count)
        .map(|index| Moon {
            base_position: Vec3::new(coord(), coord(), coord()),
            index,
        })
        .collect()
}
