pub mod fixed;
pub mod vector3;
mod wide;

pub use fixed::Fix64x61;
pub use vector3::Vector3;
