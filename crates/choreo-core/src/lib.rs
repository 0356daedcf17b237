pub mod assign;
pub mod audio;
pub mod constants;
pub mod director;
pub mod error;
pub mod moons;
pub mod particle;
pub mod shape;
pub mod state;

pub use assign::*;
pub use audio::*;
pub use constants::*;
pub use director::*;
pub use error::*;
pub use moons::*;
pub use particle::*;
pub use shape::*;
pub use state::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
