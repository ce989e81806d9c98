//! mapoverlay - Overlay country outlines onto maps for size comparison

pub mod canvas;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod render;
pub mod source;
