//! Layer compositing with blend modes and per-layer opacity.
//!
//! Layers are painted in order onto a transparent, alpha-premultiplied canvas.
//! Blend formulas are the premultiplied separable modes used by common 2D
//! painters (Porter-Duff source-over plus the W3C compositing blend modes).

use std::fmt;
use std::path::Path;
use std::time::Instant;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{IdiffError, Result};

/// Pixel-combination rule used when painting a layer onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    SourceOver,
    Multiply,
    Screen,
    Darken,
    Lighten,
    Difference,
    Exclusion,
}

impl BlendMode {
    pub const ALL: [BlendMode; 7] = [
        BlendMode::SourceOver,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];

    /// Blend premultiplied source `s` onto premultiplied destination `d`.
    pub fn blend(self, s: [f32; 4], d: [f32; 4]) -> [f32; 4] {
        let sa = s[3];
        let da = d[3];
        let mut out = [0.0; 4];
        for c in 0..3 {
            let (sc, dc) = (s[c], d[c]);
            out[c] = match self {
                BlendMode::SourceOver => sc + dc * (1.0 - sa),
                BlendMode::Multiply => sc * dc + sc * (1.0 - da) + dc * (1.0 - sa),
                BlendMode::Screen => sc + dc - sc * dc,
                BlendMode::Darken => {
                    (sc * da).min(dc * sa) + sc * (1.0 - da) + dc * (1.0 - sa)
                }
                BlendMode::Lighten => {
                    (sc * da).max(dc * sa) + sc * (1.0 - da) + dc * (1.0 - sa)
                }
                BlendMode::Difference => sc + dc - 2.0 * (sc * da).min(dc * sa),
                BlendMode::Exclusion => {
                    (sc * da + dc * sa - 2.0 * sc * dc) + sc * (1.0 - da) + dc * (1.0 - sa)
                }
            };
        }
        out[3] = sa + da - sa * da;
        out
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendMode::SourceOver => write!(f, "Source Over"),
            BlendMode::Multiply => write!(f, "Multiply"),
            BlendMode::Screen => write!(f, "Screen"),
            BlendMode::Darken => write!(f, "Darken"),
            BlendMode::Lighten => write!(f, "Lighten"),
            BlendMode::Difference => write!(f, "Difference"),
            BlendMode::Exclusion => write!(f, "Exclusion"),
        }
    }
}

/// Layer opacity for a composite: one value for every layer, or a
/// per-layer sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Opacity {
    Uniform(f32),
    PerLayer(Vec<f32>),
}

impl Default for Opacity {
    fn default() -> Self {
        Opacity::Uniform(1.0)
    }
}

impl From<f32> for Opacity {
    fn from(value: f32) -> Self {
        Opacity::Uniform(value)
    }
}

impl From<Vec<f32>> for Opacity {
    fn from(values: Vec<f32>) -> Self {
        Opacity::PerLayer(values)
    }
}

impl Opacity {
    /// Opacity for each of `count` layers, clamped to `[0, 1]`.
    ///
    /// A sequence shorter than `count` is padded with its last value; a longer
    /// one is truncated. An empty sequence means fully opaque.
    pub fn resolve(&self, count: usize) -> Vec<f32> {
        let resolved: Vec<f32> = match self {
            Opacity::Uniform(value) => vec![*value; count],
            Opacity::PerLayer(values) => match values.last() {
                Some(&last) => values
                    .iter()
                    .copied()
                    .chain(std::iter::repeat(last))
                    .take(count)
                    .collect(),
                None => vec![1.0; count],
            },
        };
        resolved.into_iter().map(|o| o.clamp(0.0, 1.0)).collect()
    }
}

/// Output region in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full extent of `image`.
    pub fn of(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(0, 0, width, height)
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A bitmap made by blending source images, stored alpha-premultiplied.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeImage {
    bounds: Bounds,
    mode: BlendMode,
    data: Vec<u8>,
}

impl CompositeImage {
    /// Paint `background` then each of `layers`, in order, under `mode`.
    ///
    /// The output covers `bounds`, defaulting to the background's extent.
    pub fn new(
        mode: BlendMode,
        background: &RgbaImage,
        layers: &[&RgbaImage],
        opacity: &Opacity,
        bounds: Option<Bounds>,
    ) -> Result<Self> {
        let bounds = bounds.unwrap_or_else(|| Bounds::of(background));
        let images: Vec<&RgbaImage> = std::iter::once(background)
            .chain(layers.iter().copied())
            .collect();
        Self::paint(mode, &images, opacity, bounds)
    }

    /// Composite `images`, the first being the background.
    pub fn from_images(
        mode: BlendMode,
        images: &[&RgbaImage],
        opacity: &Opacity,
        bounds: Option<Bounds>,
    ) -> Result<Self> {
        let (background, layers) = images.split_first().ok_or(IdiffError::NotEnoughImages {
            required: 1,
            actual: 0,
        })?;
        Self::new(mode, background, layers, opacity, bounds)
    }

    fn paint(
        mode: BlendMode,
        images: &[&RgbaImage],
        opacity: &Opacity,
        bounds: Bounds,
    ) -> Result<Self> {
        if bounds.width == 0 || bounds.height == 0 {
            return Err(IdiffError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let started = Instant::now();
        let opacities = opacity.resolve(images.len());
        let width = bounds.width as usize;
        let mut canvas = vec![[0.0f32; 4]; bounds.pixel_count()];

        let paint_row = |(row, pixels): (usize, &mut [[f32; 4]])| {
            let y = bounds.y as i64 + row as i64;
            for (image, &alpha) in images.iter().zip(&opacities) {
                if alpha <= 0.0 {
                    continue;
                }
                paint_layer_row(mode, image, alpha, bounds.x as i64, y, pixels);
            }
        };

        if bounds.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
            canvas.par_chunks_mut(width).enumerate().for_each(paint_row);
        } else {
            canvas.chunks_mut(width).enumerate().for_each(paint_row);
        }

        let data = canvas
            .iter()
            .flat_map(|pixel| pixel.map(to_byte))
            .collect::<Vec<u8>>();

        debug!(
            mode = %mode,
            layers = images.len(),
            width = bounds.width,
            height = bounds.height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Composite built"
        );

        Ok(Self { bounds, mode, data })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn premultiplied(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied RGBA at `(x, y)` relative to the bounds origin.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.bounds.width || y >= self.bounds.height {
            return None;
        }
        let index = (y as usize * self.bounds.width as usize + x as usize) * 4;
        let px = &self.data[index..index + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight (non-premultiplied) copy of the composite.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.bounds.width, self.bounds.height);
        for (dst, src) in image.pixels_mut().zip(self.data.chunks_exact(4)) {
            *dst = Rgba(unpremultiply([src[0], src[1], src[2], src[3]]));
        }
        image
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }
}

fn paint_layer_row(
    mode: BlendMode,
    image: &RgbaImage,
    alpha: f32,
    x0: i64,
    y: i64,
    pixels: &mut [[f32; 4]],
) {
    let (w, h) = image.dimensions();
    if y < 0 || y >= h as i64 {
        return;
    }
    for (col, dst) in pixels.iter_mut().enumerate() {
        let x = x0 + col as i64;
        if x < 0 || x >= w as i64 {
            continue;
        }
        let src = image.get_pixel(x as u32, y as u32).0;
        *dst = mode.blend(premultiply(src, alpha), *dst);
    }
}

fn premultiply(px: [u8; 4], opacity: f32) -> [f32; 4] {
    let a = px[3] as f32 / 255.0 * opacity;
    [
        px[0] as f32 / 255.0 * a,
        px[1] as f32 / 255.0 * a,
        px[2] as f32 / 255.0 * a,
        a,
    ]
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let scale = 255.0 / a as f32;
    [
        (px[0] as f32 * scale).round().min(255.0) as u8,
        (px[1] as f32 * scale).round().min(255.0) as u8,
        (px[2] as f32 * scale).round().min(255.0) as u8,
        a,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_onto_transparent_copies_source() {
        let s = [0.2, 0.4, 0.1, 0.5];
        for mode in BlendMode::ALL {
            let out = mode.blend(s, [0.0; 4]);
            for c in 0..4 {
                assert!((out[c] - s[c]).abs() < 1e-6, "{mode} channel {c}");
            }
        }
    }

    #[test]
    fn unpremultiply_restores_straight_colour() {
        assert_eq!(unpremultiply([64, 0, 32, 128]), [128, 0, 64, 128]);
        assert_eq!(unpremultiply([10, 10, 10, 0]), [0, 0, 0, 0]);
    }
}
