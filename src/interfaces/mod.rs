pub mod camera;
pub mod clock;
