use glam::Vec3;

// Shared tuning constants for the choreography engine and its front-ends.

// Particle pool
pub const PARTICLE_COUNT: usize = 3333;
pub const PARTICLE_RADIUS_MIN: f32 = 0.5; // render size range
pub const PARTICLE_RADIUS_MAX: f32 = 1.0;

// Bounding cube (full edge length; walls sit at +-size/2)
pub const DEFAULT_CUBE_SIZE: f32 = 500.0;
pub const CUBE_SIZE_MIN: f32 = 200.0; // random range picked by the grow key
pub const CUBE_SIZE_MAX: f32 = 700.0;

// Kinematics
pub const STEERING_MAGNITUDE: f32 = 0.1; // constant homing force, not spring-proportional
pub const AUDIO_JITTER_GAIN: f32 = 0.01; // acceleration per unit of band energy
pub const BASS_BAND_HZ: (f32, f32) = (100.0, 200.0);
pub const SCATTER_SPEED_MIN: f32 = 5.0;
pub const SCATTER_SPEED_MAX: f32 = 10.0;

// Audio
pub const WAVEFORM_LEN: usize = 1024;
pub const BAND_ENERGY_MAX: f32 = 255.0; // analyzer energy scale
pub const DRAG_GAIN: f32 = 0.00001; // drag distance -> drag amount
pub const DRAG_RATE_SCALE: f32 = 100.0; // drag amount -> playback rate
pub const PLAYBACK_RATE_MIN: f32 = 0.1;
pub const PLAYBACK_RATE_MAX: f32 = 4.0;

// Camera
pub const DEFAULT_ZOOM: f32 = 500.0;
pub const ZOOM_MIN: f32 = 0.0;
pub const ZOOM_MAX: f32 = 5000.0;
pub const ZOOM_SPEED: f32 = 2.0; // distance units per tick
pub const CAMERA_MIN_EYE_DISTANCE: f32 = 1.0; // keeps look-at well defined at zoom 0
pub const ROTATION_RATE: f32 = 0.5; // radians per second of scene spin
pub const ROTATION_X_RATIO: f32 = 0.3; // X spin relative to Y spin

// Planetary view
pub const MOON_COUNT: usize = 8;
pub const DEFAULT_MOON_DISTANCE: f32 = 4000.0;
pub const MOON_DISTANCE_MIN: f32 = 3000.0;
pub const MOON_DISTANCE_MAX: f32 = 5000.0;
pub const MOON_RADIUS: f32 = 300.0; // render radius and click-through radius
pub const PLANETARY_DISTANCE_FACTOR: f32 = 2.0; // camera distance = moon distance * factor
pub const PLANETARY_ZOOM_MIN_FACTOR: f32 = 1.0;
pub const PLANETARY_ZOOM_MAX_FACTOR: f32 = 3.0;

// Two-figure tableau (figure origins before scaling)
pub const FIGURE_OFFSETS: [[f32; 2]; 2] = [[0.0, -200.0], [200.0, -200.0]];

// Colour cycling
pub const COLOR_CYCLE_RATE: f32 = 0.02; // per frame
pub const GOLD_RGB: [f32; 3] = [1.0, 0.8, 0.0];
pub const MAGENTA_RGB: [f32; 3] = [1.0, 0.0, 0.8];
pub const CUBE_HUE_STEP: u64 = 3; // per frame, wraps at 255
pub const CUBE_EDGE_SAMPLES: usize = 40; // dots per wireframe edge
pub const CUBE_EDGE_DOT_SIZE: f32 = 4.0;
pub const WAVEFORM_DOT_SIZE: f32 = 2.0;

#[inline]
pub fn gold() -> Vec3 {
    Vec3::from(GOLD_RGB)
}

#[inline]
pub fn magenta() -> Vec3 {
    Vec3::from(MAGENTA_RGB)
}
