//! CPU raster surface.
//!
//! A plain RGBA8 pixel buffer implementing [`Surface`] with source-over
//! blending and analytic anti-aliasing. Pixel centers sit at half-integer
//! coordinates, matching the 2D canvas convention.

use std::path::Path;

use glam::{Vec2, Vec4};

use crate::error::ExportError;
use crate::surface::{RadialGradient, Surface};

/// An RGBA8 image that particles are painted into.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Pixmap {
    /// Create an opaque black pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> Result<image::RgbaImage, ExportError> {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or(ExportError::BufferSize {
                width: self.width,
                height: self.height,
            })
    }

    /// Write the pixmap to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Clip a floating-point box to pixel index ranges.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Vec4, coverage: f32) {
        let alpha = color.w * coverage;
        if alpha <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        let src = [color.x, color.y, color.z];
        for c in 0..3 {
            let d = dst[c] as f32 / 255.0;
            dst[c] = to_byte(src[c] * alpha + d * (1.0 - alpha));
        }
        let da = dst[3] as f32 / 255.0;
        dst[3] = to_byte(alpha + da * (1.0 - alpha));
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

impl Surface for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4) {
        let Some((x0, y0, x1, y1)) = self.clip(origin, origin + size) else {
            return;
        };
        let alpha = color.w.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        // Every pixel gets the same blend, so precompute it per channel value
        let src = [color.x, color.y, color.z, 1.0];
        let mut lut = [[0u8; 256]; 4];
        for (c, table) in lut.iter_mut().enumerate() {
            for (v, out) in table.iter_mut().enumerate() {
                let d = v as f32 / 255.0;
                *out = to_byte(src[c] * alpha + d * (1.0 - alpha));
            }
        }

        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for px in &mut self.pixels[row + x0 as usize..row + x1 as usize] {
                for c in 0..4 {
                    px[c] = lut[c][px[c] as usize];
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4) {
        if !(from.is_finite() && to.is_finite()) {
            return;
        }
        let half = width.max(0.0) * 0.5;
        let pad = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - segment_distance(p, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        let pad = Vec2::splat(radius.max(0.0) + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - pad, center + pad) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, gradient.color_at(p), coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{self, TRANSPARENT, WHITE};

    #[test]
    fn test_starts_black() {
        let pixmap = Pixmap::new(4, 3);
        assert_eq!(pixmap.size(), (4, 3));
        assert_eq!(pixmap.as_bytes().len(), 4 * 3 * 4);
        assert!(pixmap.pixels().iter().all(|p| *p == [0, 0, 0, 255]));
        assert_eq!(pixmap.pixel(4, 0), None);
    }

    #[test]
    fn test_opaque_fill_overwrites() {
        let mut pixmap = Pixmap::new(8, 8);
        pixmap.fill_rect(Vec2::ZERO, Vec2::splat(8.0), WHITE);
        pixmap.fill_rect(Vec2::ZERO, Vec2::splat(8.0), color::black(1.0));
        assert!(pixmap.pixels().iter().all(|p| *p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_fill_fades() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.fill_rect(Vec2::ZERO, Vec2::splat(2.0), WHITE);
        pixmap.fill_rect(Vec2::ZERO, Vec2::splat(2.0), color::black(0.5));
        let p = pixmap.pixel(1, 1).unwrap();
        assert!(p[0] == 127 || p[0] == 128);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_line_covers_its_path() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.stroke_line(Vec2::new(2.5, 10.5), Vec2::new(17.5, 10.5), 2.0, WHITE);
        assert_eq!(pixmap.pixel(10, 10), Some([255, 255, 255, 255]));
        // Far from the segment stays untouched
        assert_eq!(pixmap.pixel(10, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_line_has_round_caps() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.stroke_line(Vec2::new(10.5, 10.5), Vec2::new(10.5, 10.5), 4.0, WHITE);
        // A zero-length round-capped line is a dot
        assert_eq!(pixmap.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(pixmap.pixel(10, 15), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_non_finite_line_is_ignored() {
        let mut pixmap = Pixmap::new(4, 4);
        pixmap.stroke_line(Vec2::new(f32::NAN, 0.0), Vec2::ONE, 1.0, WHITE);
        assert!(pixmap.pixels().iter().all(|p| *p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_disc_uses_gradient() {
        let mut pixmap = Pixmap::new(40, 40);
        let center = Vec2::new(20.0, 20.0);
        let gradient = RadialGradient::new(center, 0.0, 16.0)
            .with_stop(0.5, WHITE)
            .with_stop(1.0, TRANSPARENT);
        pixmap.fill_disc(center, 16.0, &gradient);

        assert_eq!(pixmap.pixel(20, 20), Some([255, 255, 255, 255]));
        let fringe = pixmap.pixel(33, 20).unwrap();
        assert!(fringe[0] > 0 && fringe[0] < 255);
        assert_eq!(pixmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_to_image_dimensions() {
        let pixmap = Pixmap::new(5, 7);
        let image = pixmap.to_image().unwrap();
        assert_eq!(image.dimensions(), (5, 7));
    }
}
