// Core value types for Lapse
// These are what the parser produces and reasons about

pub mod duration;
pub mod unit;

pub use duration::*;
pub use unit::*;
