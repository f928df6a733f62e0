pub mod brightness;
pub mod loader;
pub mod sampling;
