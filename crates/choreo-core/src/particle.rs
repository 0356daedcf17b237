//! Per-particle state and the one-step integrator.
//!
//! A tick runs in this order: reflect off the cube walls, integrate the
//! acceleration accumulated during the previous tick, clear it, then add the
//! homing force and the audio jitter for the next tick.

use crate::constants::{
    AUDIO_JITTER_GAIN, PARTICLE_RADIUS_MAX, PARTICLE_RADIUS_MIN, SCATTER_SPEED_MAX,
    SCATTER_SPEED_MIN, STEERING_MAGNITUDE,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let z = rng.gen::<f32>() * 2.0 - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * angle.cos(), r * angle.sin(), z)
}

/// Random point inside a ball of radius `max_radius` (radius uniform, not volume-uniform).
pub fn random_in_ball<R: Rng + ?Sized>(rng: &mut R, max_radius: f32) -> Vec3 {
    random_unit(rng) * (rng.gen::<f32>() * max_radius)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Force accumulator, consumed and cleared by the next integration step.
    pub acceleration: Vec3,
    /// Render size.
    pub radius: f32,
    /// Index into the active `TargetSet`, `None` while free-floating.
    pub target: Option<usize>,
}

impl Particle {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            radius,
            target: None,
        }
    }

    /// Spawn at rest somewhere inside the cube's inscribed ball.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, cube_size: f32) -> Self {
        let position = random_in_ball(rng, 0.5 * cube_size);
        let radius =
            PARTICLE_RADIUS_MIN + rng.gen::<f32>() * (PARTICLE_RADIUS_MAX - PARTICLE_RADIUS_MIN);
        Self::new(position, radius)
    }

    pub fn reset_position<R: Rng + ?Sized>(&mut self, rng: &mut R, cube_size: f32) {
        self.position = random_in_ball(rng, 0.5 * cube_size);
    }

    /// Replace the velocity with a fast random one.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let speed = SCATTER_SPEED_MIN + rng.gen::<f32>() * (SCATTER_SPEED_MAX - SCATTER_SPEED_MIN);
        self.velocity = random_unit(rng) * speed;
    }

    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Invert each velocity component whose axis is outside `+-cube_size/2`.
    /// Position is not clamped.
    #[inline]
    pub fn reflect(&mut self, cube_size: f32) {
        let half = cube_size * 0.5;
        if self.position.x.abs() > half {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y.abs() > half {
            self.velocity.y = -self.velocity.y;
        }
        if self.position.z.abs() > half {
            self.velocity.z = -self.velocity.z;
        }
    }

    /// Euler step with the accumulated acceleration, then clear the accumulator.
    #[inline]
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
    }

    /// Constant-magnitude pull toward `target`. No damping term.
    #[inline]
    pub fn steer_toward(&mut self, target: Vec3) {
        let force = (target - self.position).normalize_or_zero() * STEERING_MAGNITUDE;
        self.apply_force(force);
    }

    /// Random-direction kick scaled by band energy. Skipped when energy is not positive.
    #[inline]
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R, audio_energy: f32) {
        if audio_energy > 0.0 {
            let kick = random_unit(rng) * (AUDIO_JITTER_GAIN * audio_energy);
            self.apply_force(kick);
        }
    }

    /// Advance one time step.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        target: Option<Vec3>,
        audio_energy: f32,
        cube_size: f32,
        rng: &mut R,
    ) {
        self.reflect(cube_size);
        self.integrate();
        if let Some(t) = target {
            self.steer_toward(t);
        }
        self.jitter(rng, audio_energy);
    }
}
