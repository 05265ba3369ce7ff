/*
Hero banner: floating glyphs on a rapier2d world, word labels laid out for the
viewport, dashed links between them. Rendered with macroquad.
*/

pub mod modules;

pub use modules::config::BannerConfig;
pub use modules::scene::{FrameInput, Scene};
