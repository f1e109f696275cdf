pub mod linalg;
pub mod sample;
