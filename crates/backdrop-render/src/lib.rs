pub mod decode;
pub mod gpu;
pub mod helpers;
pub mod particles;
pub mod warp;

pub use decode::*;
pub use gpu::*;
pub use particles::*;
pub use warp::*;

// Shaders bundled as string constants
pub static WARP_WGSL: &str = include_str!("../shaders/warp.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
