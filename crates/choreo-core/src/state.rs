//! Scene-wide state and the types handed to the renderer.
//!
//! These types avoid platform-specific APIs. Engine space follows screen
//! conventions (x right, y down, z toward the viewer); [`Camera`] folds the
//! y flip into its projection so renderers can stay conventional.

use crate::constants::{
    CAMERA_MIN_EYE_DISTANCE, DEFAULT_CUBE_SIZE, DEFAULT_MOON_DISTANCE, DEFAULT_ZOOM,
    PLANETARY_DISTANCE_FACTOR, PLANETARY_ZOOM_MAX_FACTOR, PLANETARY_ZOOM_MIN_FACTOR,
    ROTATION_RATE, ROTATION_X_RATIO, ZOOM_MAX, ZOOM_MIN, ZOOM_SPEED,
};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Clip-space projection, with y flipped to map engine space onto screen space.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
            * Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// World-space right/up axes, used to billboard sprites.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

/// One draw: a round billboard at a world position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Sprite {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl Sprite {
    #[inline]
    pub fn new(position: Vec3, size: f32, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: color.to_array(),
        }
    }
}

/// Linear colour blend with the amount clamped to \[0, 1\].
#[inline]
pub fn lerp_color(a: Vec3, b: Vec3, amount: f32) -> Vec3 {
    a.lerp(b, amount.clamp(0.0, 1.0))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Particles drift with no targets.
    FreeForm,
    /// Particles home in on the silhouette targets.
    #[default]
    HumanoidSeek,
    /// Camera pulled back among the moons; particles drift.
    Planetary,
}

impl Mode {
    #[inline]
    pub fn is_planetary(self) -> bool {
        matches!(self, Mode::Planetary)
    }
}

/// Range the camera distance oscillates (and scrolls) within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    pub min: f32,
    pub max: f32,
}

impl ZoomBounds {
    pub const FREE: ZoomBounds = ZoomBounds {
        min: ZOOM_MIN,
        max: ZOOM_MAX,
    };

    pub fn planetary(moon_distance: f32) -> Self {
        Self {
            min: moon_distance * PLANETARY_ZOOM_MIN_FACTOR,
            max: moon_distance * PLANETARY_ZOOM_MAX_FACTOR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneState {
    pub mode: Mode,
    /// Full edge length of the bounding cube.
    pub cube_size: f32,
    pub moon_distance: f32,
    pub zoom: f32,
    pub zoom_direction: f32,
    pub zoom_speed: f32,
    pub zoom_bounds: ZoomBounds,
    /// Free-view zoom stashed while the planetary view is active.
    pub saved_zoom: f32,
    pub drag_amount: f32,
    pub viewport: Vec2,
    pub elapsed_sec: f64,
    pub frame: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            cube_size: DEFAULT_CUBE_SIZE,
            moon_distance: DEFAULT_MOON_DISTANCE,
            zoom: DEFAULT_ZOOM,
            zoom_direction: 1.0,
            zoom_speed: ZOOM_SPEED,
            zoom_bounds: ZoomBounds::FREE,
            saved_zoom: DEFAULT_ZOOM,
            drag_amount: 0.0,
            viewport: Vec2::new(1280.0, 720.0),
            elapsed_sec: 0.0,
            frame: 0,
        }
    }
}

impl SceneState {
    /// Advance the oscillating zoom; direction flips once outside the bounds.
    pub fn step_zoom(&mut self) {
        self.zoom += self.zoom_speed * self.zoom_direction;
        if self.zoom > self.zoom_bounds.max || self.zoom < self.zoom_bounds.min {
            self.zoom_direction = -self.zoom_direction;
        }
    }

    pub fn scroll(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(self.zoom_bounds.min, self.zoom_bounds.max);
    }

    /// Pull the camera back among the moons, stashing the free-view zoom.
    pub fn enter_planetary_view(&mut self) {
        self.saved_zoom = self.zoom;
        self.zoom_bounds = ZoomBounds::planetary(self.moon_distance);
        self.zoom = self.moon_distance * PLANETARY_DISTANCE_FACTOR;
    }

    /// Restore the free-view bounds and the stashed zoom.
    pub fn leave_planetary_view(&mut self) {
        self.zoom_bounds = ZoomBounds::FREE;
        self.zoom = self.saved_zoom;
    }

    /// Rotation phase in radians: time-driven spin plus accumulated drag.
    #[inline]
    pub fn rotation_phase(&self) -> f32 {
        (self.elapsed_sec as f32) * ROTATION_RATE + self.drag_amount
    }

    /// Rotation applied to all scene content: Y spin, then a slower X spin.
    pub fn scene_rotation(&self) -> Quat {
        let t = self.rotation_phase();
        Quat::from_rotation_y(t) * Quat::from_rotation_x(t * ROTATION_X_RATIO)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.x.max(1.0) / self.viewport.y.max(1.0)
    }

    pub fn camera(&self) -> Camera {
        let distance = self.zoom.max(CAMERA_MIN_EYE_DISTANCE);
        let (eye, up) = if self.mode.is_planetary() {
            // Overhead view; engine -y is up.
            (Vec3::new(0.0, -distance, 0.0), Vec3::Z)
        } else {
            (Vec3::new(0.0, 0.0, distance), Vec3::Y)
        };
        Camera {
            eye,
            target: Vec3::ZERO,
            up,
            aspect: self.aspect(),
            fovy_radians: std::f32::consts::FRAC_PI_3,
            znear: 1.0,
            zfar: distance + self.moon_distance * 4.0,
        }
    }
}
