pub mod calibrate;
pub mod grid;
pub mod mapping;
pub mod ramp;
