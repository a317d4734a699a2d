use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use idiff_core::image_io::SourceImage;
use idiff_core::settings::Settings;
use idiff_core::window::{Window, WindowOptions};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// An image filled with one colour.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// An opaque image whose red channel ramps along x and green along y.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgba([r, g, 128, 255])
    })
}

/// Save `image` as PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}

pub fn source(name: &str, image: RgbaImage) -> Arc<SourceImage> {
    Arc::new(SourceImage::new(name, image))
}

/// Two equally sized inputs, red and blue.
pub fn red_and_blue(width: u32, height: u32) -> Vec<Arc<SourceImage>> {
    vec![
        source("red.png", solid(width, height, RED)),
        source("blue.png", solid(width, height, BLUE)),
    ]
}

pub fn window_with(images: Vec<Arc<SourceImage>>, view: Option<&str>) -> Window {
    let options = WindowOptions {
        view: view.map(str::to_string),
        flicker: None,
    };
    Window::new(images, &options, &Settings::default()).unwrap()
}
