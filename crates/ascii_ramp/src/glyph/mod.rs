pub mod canvas;
pub mod font;
