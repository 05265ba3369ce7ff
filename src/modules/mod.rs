pub mod collision;
pub mod config;
pub mod curve;
pub mod glyph;
pub mod label;
pub mod layout;
pub mod physics;
pub mod render;
pub mod scene;
pub mod text;
