//! Comparison views: named layouts of one or more synchronized panes.

use std::sync::Arc;

use image::RgbaImage;

use crate::composite::CompositeImage;
use crate::image_io::SourceImage;
use crate::settings::Settings;
use crate::slider::ZoomSlider;
use crate::sync::ViewportLink;
use crate::viewport::Viewport;

/// Premultiplied RGBA8 pixels ready for upload as a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayImage {
    label: String,
    width: u32,
    height: u32,
    premultiplied: Vec<u8>,
}

impl DisplayImage {
    pub fn from_rgba(label: impl Into<String>, rgba: &RgbaImage) -> Self {
        let premultiplied = rgba
            .pixels()
            .flat_map(|px| {
                let [r, g, b, a] = px.0;
                let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
                [scale(r), scale(g), scale(b), a]
            })
            .collect();
        Self {
            label: label.into(),
            width: rgba.width(),
            height: rgba.height(),
            premultiplied,
        }
    }

    pub fn from_source(image: &SourceImage) -> Self {
        Self::from_rgba(image.display_name(), image.rgba())
    }

    pub fn from_composite(label: impl Into<String>, composite: &CompositeImage) -> Self {
        Self {
            label: label.into(),
            width: composite.width(),
            height: composite.height(),
            premultiplied: composite.premultiplied().to_vec(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    pub fn premultiplied(&self) -> &[u8] {
        &self.premultiplied
    }
}

/// One viewport and the bitmap it displays.
#[derive(Debug)]
pub struct Pane {
    pub viewport: Viewport,
    image: Arc<DisplayImage>,
}

impl Pane {
    pub fn new(image: Arc<DisplayImage>, wheel_zoom: bool) -> Self {
        let viewport = Viewport::new(image.width(), image.height()).with_wheel_zoom(wheel_zoom);
        Self { viewport, image }
    }

    pub fn image(&self) -> &Arc<DisplayImage> {
        &self.image
    }
}

/// Inputs available to a view constructor.
#[derive(Clone, Copy, Debug)]
pub struct ViewContext<'a> {
    pub images: &'a [Arc<SourceImage>],
    pub settings: &'a Settings,
}

impl ViewContext<'_> {
    pub fn wheel_zoom(&self) -> bool {
        self.settings.interface.wheel_zoom
    }

    pub fn rgba_layers(&self) -> Vec<&RgbaImage> {
        self.images.iter().map(|image| image.rgba()).collect()
    }
}

fn viewports(panes: &mut [Pane]) -> Vec<&mut Viewport> {
    panes.iter_mut().map(|pane| &mut pane.viewport).collect()
}

/// A comparison mode shown in the window's central area.
///
/// Every view is linked to the shared zoom slider through [`ViewportLink`];
/// the provided methods implement that link over [`View::panes_mut`].
pub trait View {
    fn name(&self) -> &'static str;

    fn panes(&self) -> &[Pane];

    fn panes_mut(&mut self) -> &mut [Pane];

    /// The shared slider moved to `value`.
    fn on_slide(&mut self, value: i32) {
        ViewportLink.on_slide(&mut viewports(self.panes_mut()), value);
    }

    /// Pane `source` was panned or zoomed by the user.
    fn on_viewport_changed(&mut self, source: usize, slider: &mut ZoomSlider) {
        ViewportLink.on_viewport_changed(&mut viewports(self.panes_mut()), source, slider);
    }

    /// The view became the current one.
    fn on_activated(&mut self, slider: &ZoomSlider) {
        ViewportLink.on_activated(&mut viewports(self.panes_mut()), slider);
    }

    /// Dispatch pending pane notifications. Returns how many were handled.
    fn pump(&mut self, slider: &mut ZoomSlider) -> usize {
        let mut handled = 0;
        loop {
            let sources: Vec<usize> = self
                .panes_mut()
                .iter_mut()
                .enumerate()
                .filter_map(|(index, pane)| {
                    (!pane.viewport.changes().drain().is_empty()).then_some(index)
                })
                .collect();
            if sources.is_empty() {
                return handled;
            }
            for source in sources {
                self.on_viewport_changed(source, slider);
                handled += 1;
            }
        }
    }
}
