//! Scene orchestration: owns the particle pool, the active target set and
//! the scene state, maps input events onto them, and runs the per-frame
//! pipeline.
//!
//! Typical usage:
//! - Construct with `SceneDirector::new(params, audio)`
//! - Feed host input through `handle_input`, which may rebuild targets and
//!   reassign particles before returning
//! - Call `tick(dt)` once per display frame, then `draw(&mut sprites)` and
//!   hand the sprites plus `camera()` to the renderer
//!
//! Target replacement and reassignment happen together inside one `&mut self`
//! call, so a tick never observes a half-updated target set.

use crate::assign::{assign, Assignment};
use crate::audio::{clamp_playback_rate, AudioCoupling};
use crate::constants::{
    gold, magenta, BASS_BAND_HZ, COLOR_CYCLE_RATE, CUBE_EDGE_DOT_SIZE, CUBE_EDGE_SAMPLES,
    CUBE_HUE_STEP, CUBE_SIZE_MAX, CUBE_SIZE_MIN, DEFAULT_CUBE_SIZE, DEFAULT_MOON_DISTANCE,
    DRAG_GAIN, DRAG_RATE_SCALE, FIGURE_OFFSETS, MOON_COUNT, MOON_DISTANCE_MAX, MOON_DISTANCE_MIN,
    MOON_RADIUS, PARTICLE_COUNT, WAVEFORM_DOT_SIZE,
};
use crate::error::ChoreoError;
use crate::moons::{create_moons, Moon};
use crate::particle::Particle;
use crate::shape::{SilhouetteParams, TargetSet};
use crate::state::{lerp_color, Camera, Mode, SceneState, Sprite};
use glam::{Quat, Vec2, Vec3, Vec4};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::time::Duration;

/// Particle radius to sprite diameter, in world units.
const PARTICLE_SPRITE_SCALE: f32 = 4.0;

/// Host-agnostic logical keys the director reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer position in viewport pixels, origin top-left.
    PointerDown { x: f32, y: f32 },
    PointerUp,
    /// Distance the pointer travelled since the last drag event.
    PointerDrag { distance: f32 },
    Key(Key),
    Scroll { delta: f32 },
    Resize { width: f32, height: f32 },
}

/// Notifications for the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    ModeChanged(Mode),
    TargetsRebuilt { points: usize },
    /// A moon was clicked in the planetary view; the host decides what it opens.
    MoonActivated(usize),
}

pub type SceneEvents = SmallVec<[SceneEvent; 2]>;

#[derive(Clone, Debug)]
pub struct SceneParams {
    pub particle_count: usize,
    pub seed: u64,
    pub initial_mode: Mode,
    pub cube_size: f32,
    pub moon_count: usize,
    pub moon_distance: f32,
    /// Figure origins at the default cube size.
    pub figure_offsets: Vec<[f32; 2]>,
    pub silhouette: SilhouetteParams,
    pub bass_band_hz: (f32, f32),
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: 42,
            initial_mode: Mode::HumanoidSeek,
            cube_size: DEFAULT_CUBE_SIZE,
            moon_count: MOON_COUNT,
            moon_distance: DEFAULT_MOON_DISTANCE,
            figure_offsets: FIGURE_OFFSETS.to_vec(),
            silhouette: SilhouetteParams::default(),
            bass_band_hz: BASS_BAND_HZ,
        }
    }
}

pub struct SceneDirector {
    pub params: SceneParams,
    state: SceneState,
    particles: Vec<Particle>,
    targets: TargetSet,
    moons: Vec<Moon>,
    audio: AudioCoupling,
    rng: StdRng,
    last_energy: f32,
}

impl SceneDirector {
    pub fn new(params: SceneParams, audio: AudioCoupling) -> Result<Self, ChoreoError> {
        params.silhouette.validate()?;
        if !(params.cube_size.is_finite() && params.cube_size > 0.0) {
            return Err(ChoreoError::invalid_shape(
                "cube_size",
                format!("must be finite and positive, got {}", params.cube_size),
            ));
        }
        let mut rng = StdRng::seed_from_u64(params.seed);
        let particles = (0..params.particle_count)
            .map(|_| Particle::spawn(&mut rng, params.cube_size))
            .collect::<Vec<_>>();
        let moons = create_moons(&mut rng, params.moon_count, params.moon_distance);
        let state = SceneState {
            mode: params.initial_mode,
            cube_size: params.cube_size,
            moon_distance: params.moon_distance,
            ..SceneState::default()
        };
        let mut director = Self {
            params,
            state,
            particles,
            targets: TargetSet::empty(),
            moons,
            audio,
            rng,
            last_energy: 0.0,
        };
        match director.state.mode {
            Mode::HumanoidSeek => {
                director.rebuild_targets()?;
            }
            Mode::Planetary => director.state.enter_planetary_view(),
            Mode::FreeForm => {}
        }
        director.audio.start();
        log::info!(
            "[director] particles={} moons={} mode={:?} targets={}",
            director.particles.len(),
            director.moons.len(),
            director.state.mode,
            director.targets.len()
        );
        Ok(director)
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn moons(&self) -> &[Moon] {
        &self.moons
    }

    pub fn audio(&self) -> &AudioCoupling {
        &self.audio
    }

    /// Band energy used for jitter during the last tick.
    pub fn last_energy(&self) -> f32 {
        self.last_energy
    }

    pub fn camera(&self) -> Camera {
        self.state.camera()
    }

    /// Replace the active target set and reassign every particle to it.
    pub fn set_targets(&mut self, targets: TargetSet) -> Assignment {
        let assignment = assign(&self.particles, &targets);
        assignment.apply_to(&mut self.particles);
        log::debug!(
            "[assign] particles={} assigned={} targets={} occupied={}",
            assignment.len(),
            assignment.assigned_count(),
            targets.len(),
            assignment.occupied_targets(targets.len())
        );
        self.targets = targets;
        assignment
    }

    /// Rebuild the two-figure tableau at the current cube scale and reassign.
    pub fn rebuild_targets(&mut self) -> Result<usize, ChoreoError> {
        let scale = self.state.cube_size / DEFAULT_CUBE_SIZE;
        let silhouette = self.params.silhouette.scaled(scale);
        let origins = self
            .params
            .figure_offsets
            .iter()
            .map(|[x, y]| [x * scale, y * scale])
            .collect::<Vec<_>>();
        let targets = TargetSet::tableau(&silhouette, &origins)?;
        let points = targets.len();
        self.set_targets(targets);
        log::info!(
            "[shape] cube={:.0} scale={:.2} figures={} points={}",
            self.state.cube_size,
            scale,
            origins.len(),
            points
        );
        Ok(points)
    }

    /// Change the box (and moon distance), regenerate the figures and enter
    /// `HumanoidSeek`.
    pub fn resize_scene(
        &mut self,
        cube_size: f32,
        moon_distance: f32,
        events: &mut SceneEvents,
    ) -> Result<(), ChoreoError> {
        if !(cube_size.is_finite() && cube_size > 0.0) {
            return Err(ChoreoError::invalid_shape(
                "cube_size",
                format!("must be finite and positive, got {cube_size}"),
            ));
        }
        if self.state.mode.is_planetary() {
            self.state.leave_planetary_view();
        }
        self.state.cube_size = cube_size;
        self.state.moon_distance = moon_distance;
        let points = self.rebuild_targets()?;
        events.push(SceneEvent::TargetsRebuilt { points });
        self.set_mode(Mode::HumanoidSeek, events);
        Ok(())
    }

    /// `Planetary` toggles to `FreeForm`; anything else toggles to `Planetary`.
    pub fn toggle_planetary(&mut self, events: &mut SceneEvents) {
        if self.state.mode.is_planetary() {
            self.state.leave_planetary_view();
            self.set_mode(Mode::FreeForm, events);
        } else {
            self.state.enter_planetary_view();
            self.set_mode(Mode::Planetary, events);
        }
        self.set_targets(TargetSet::empty());
    }

    fn set_mode(&mut self, mode: Mode, events: &mut SceneEvents) {
        if self.state.mode != mode {
            log::info!("[director] mode {:?} -> {:?}", self.state.mode, mode);
            self.state.mode = mode;
            events.push(SceneEvent::ModeChanged(mode));
        }
    }

    /// Give every particle a fast random velocity.
    pub fn scatter(&mut self) {
        for p in &mut self.particles {
            p.scatter(&mut self.rng);
        }
        log::debug!("[director] scattered {} particles", self.particles.len());
    }

    /// Settle after a scatter: targeted particles stop and home in again,
    /// free ones are re-placed inside the cube.
    pub fn reform(&mut self) {
        let cube_size = self.state.cube_size;
        for p in &mut self.particles {
            if p.target.is_some() {
                p.velocity = Vec3::ZERO;
            } else {
                p.reset_position(&mut self.rng, cube_size);
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> SceneEvents {
        let mut events = SceneEvents::new();
        match event {
            InputEvent::PointerDown { x, y } => {
                if self.state.mode.is_planetary() {
                    let pointer = Vec2::new(x, y) - self.state.viewport * 0.5;
                    for moon in self.moons.iter().filter(|m| m.hit(pointer)) {
                        log::info!("[director] moon {} activated", moon.index);
                        events.push(SceneEvent::MoonActivated(moon.index));
                    }
                }
                self.scatter();
            }
            InputEvent::PointerUp => {
                self.state.drag_amount = 0.0;
                self.audio.set_playback_rate(1.0);
                self.reform();
            }
            InputEvent::PointerDrag { distance } => {
                if distance.is_finite() {
                    self.state.drag_amount += distance.abs() * DRAG_GAIN;
                }
                let rate = clamp_playback_rate(self.state.drag_amount * DRAG_RATE_SCALE);
                self.audio.set_playback_rate(rate);
            }
            InputEvent::Key(Key::Space) | InputEvent::Key(Key::Char('p' | 'P')) => {
                self.toggle_planetary(&mut events);
            }
            InputEvent::Key(Key::ArrowUp) => {
                let cube = self.rng.gen_range(CUBE_SIZE_MIN..CUBE_SIZE_MAX);
                let moon = self.rng.gen_range(MOON_DISTANCE_MIN..MOON_DISTANCE_MAX);
                if let Err(e) = self.resize_scene(cube, moon, &mut events) {
                    log::error!("[director] resize failed: {e}");
                }
            }
            InputEvent::Key(Key::ArrowDown) => {
                let (cube, moon) = (self.params.cube_size, self.params.moon_distance);
                if let Err(e) = self.resize_scene(cube, moon, &mut events) {
                    log::error!("[director] resize failed: {e}");
                }
            }
            InputEvent::Key(Key::Char(_)) => {}
            InputEvent::Scroll { delta } => {
                if delta.is_finite() {
                    self.state.scroll(delta);
                }
            }
            InputEvent::Resize { width, height } => {
                self.state.viewport = Vec2::new(width.max(1.0), height.max(1.0));
            }
        }
        events
    }

    /// Advance the scene by one display frame.
    pub fn tick(&mut self, dt: Duration) {
        self.state.elapsed_sec += dt.as_secs_f64();
        self.state.frame += 1;
        self.state.step_zoom();

        let (lo, hi) = self.params.bass_band_hz;
        let energy = self.audio.band_energy(lo, hi);
        self.audio.refresh_waveform();
        self.last_energy = energy;

        let cube_size = self.state.cube_size;
        for p in &mut self.particles {
            let target = p.target.and_then(|i| self.targets.get(i));
            p.tick(target, energy, cube_size, &mut self.rng);
        }
    }

    /// Append this frame's world-space draws: particles, cube wireframe,
    /// waveform ring, moons.
    pub fn draw(&self, out: &mut Vec<Sprite>) {
        let rotation = self.state.scene_rotation();
        let frame = self.state.frame as f32;

        let particle_rgb = lerp_color(gold(), magenta(), (frame * COLOR_CYCLE_RATE).sin());
        let particle_color = Vec4::from((particle_rgb, 1.0));
        out.extend(self.particles.iter().map(|p| {
            Sprite::new(
                rotation * p.position,
                p.radius * PARTICLE_SPRITE_SCALE,
                particle_color,
            )
        }));

        self.draw_cube(rotation, out);
        self.draw_waveform(rotation, out);

        let elapsed = self.state.elapsed_sec as f32;
        for moon in &self.moons {
            let amount = (frame * COLOR_CYCLE_RATE + moon.index as f32).sin();
            let color = Vec4::from((lerp_color(gold(), magenta(), amount), 1.0));
            out.push(Sprite::new(
                rotation * moon.position_at(elapsed),
                MOON_RADIUS * 2.0,
                color,
            ));
        }
    }

    fn draw_cube(&self, rotation: Quat, out: &mut Vec<Sprite>) {
        let half = self.state.cube_size * 0.5;
        let hue = ((self.state.frame * CUBE_HUE_STEP) % 255) as f32 / 255.0;
        let color = Vec4::new(hue, 1.0, 1.0, 1.0);
        let corner = |i: usize| {
            Vec3::new(
                if i & 1 == 0 { -half } else { half },
                if i & 2 == 0 { -half } else { half },
                if i & 4 == 0 { -half } else { half },
            )
        };
        // Corner pairs differing in exactly one bit are the 12 edges.
        for a in 0..8usize {
            for bit in [1usize, 2, 4] {
                if a & bit != 0 {
                    continue;
                }
                let (p0, p1) = (corner(a), corner(a | bit));
                for s in 0..CUBE_EDGE_SAMPLES {
                    let t = s as f32 / (CUBE_EDGE_SAMPLES - 1) as f32;
                    out.push(Sprite::new(
                        rotation * p0.lerp(p1, t),
                        CUBE_EDGE_DOT_SIZE,
                        color,
                    ));
                }
            }
        }
    }

    fn draw_waveform(&self, rotation: Quat, out: &mut Vec<Sprite>) {
        let waveform = self.audio.current_waveform();
        let len = waveform.len().max(1) as f32;
        let max_radius = self.state.cube_size * 0.5;
        let color = Vec4::ONE;
        for (i, s) in waveform.iter().enumerate() {
            let angle = i as f32 / len * TAU;
            let radius = (s + 1.0) * 0.5 * max_radius;
            let pos = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            out.push(Sprite::new(rotation * pos, WAVEFORM_DOT_SIZE, color));
        }
    }
}
