//! Data construction: demographic profiles and the sampling core.

pub mod profiles;
pub mod sample;

pub use profiles::*;
pub use sample::*;
