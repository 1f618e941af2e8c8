//! WGSL sources.

/// Fullscreen blit of the frame texture.
pub const BLIT_SOURCE: &str = include_str!("blit.wgsl");
