pub mod camera;
pub mod clock;
pub mod cloud;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod handoff;
pub mod layout;
pub mod lifecycle;
pub mod mesh;
pub mod motion;
pub mod pointer;
pub mod slots;
pub mod state;

pub use camera::*;
pub use clock::*;
pub use cloud::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use field::*;
pub use layout::*;
pub use lifecycle::*;
pub use mesh::*;
pub use motion::*;
pub use pointer::*;
pub use slots::*;
pub use state::*;
