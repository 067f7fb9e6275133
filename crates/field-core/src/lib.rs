pub mod backend;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod driver;
pub mod error;
pub mod field;
pub mod pointer;
pub mod viewport;

pub use backend::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use driver::*;
pub use error::*;
pub use field::*;
pub use pointer::*;
pub use viewport::*;

// Point-sprite shader bundled as a string constant
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
