//! Color helpers.
//!
//! Colors are `Vec4` RGBA with every channel in 0.0-1.0, non-premultiplied,
//! in sRGB space (the same space a 2D canvas blends in).

use glam::{Vec3, Vec4};

/// Opaque white.
pub const WHITE: Vec4 = Vec4::ONE;

/// Fully transparent black.
pub const TRANSPARENT: Vec4 = Vec4::ZERO;

/// Color from HSL values.
///
/// * `hue` - degrees, wraps (0 = red, 120 = green, 240 = blue)
/// * `saturation` - 0.0 (gray) to 1.0 (vivid)
/// * `lightness` - 0.0 (black) to 1.0 (white), 0.5 is the pure hue
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let h = hue.rem_euclid(360.0) / 60.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// HSL color with alpha.
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Vec4 {
    hsl(hue, saturation, lightness).extend(alpha.clamp(0.0, 1.0))
}

/// Black with the given opacity.
pub fn black(alpha: f32) -> Vec4 {
    Vec4::new(0.0, 0.0, 0.0, alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(hsl(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl(120.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl(240.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
        assert!(close(hsl(360.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_lightness_extremes() {
        // Full lightness is white regardless of hue
        assert!(close(hsl(200.0, 1.0, 1.0), Vec3::ONE));
        assert!(close(hsl(200.0, 1.0, 0.0), Vec3::ZERO));
    }

    #[test]
    fn test_black_clamps_alpha() {
        assert_eq!(black(2.0).w, 1.0);
        assert_eq!(black(-1.0).w, 0.0);
    }
}
