//! Pannable, zoomable rendering surface state.
//!
//! Geometry follows a scrolled canvas: the content (an image, in pixels) is
//! drawn scaled by `zoom + zoom_offset`; on each axis the scroll value is the
//! offset in scaled pixels of the pane's leading edge, ranging over
//! `[0, max(0, scaled_content - pane)]`. Content smaller than the pane is centred.

use crate::consts::{MAX_ZOOM, MIN_ZOOM, WHEEL_NOTCH_DELTA, WHEEL_ZOOM_STEP};
use crate::signal::{Notifier, Notifies};

/// Pixels scrolled per wheel notch when the wheel does not zoom.
const WHEEL_SCROLL_PIXELS: f32 = 60.0;

/// Emitted after a user-driven pan or zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportChanged;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One scroll bar: a value inside `[min, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollAxis {
    value: f32,
    min: f32,
    max: f32,
}

impl ScrollAxis {
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        let mut axis = Self {
            value: 0.0,
            min,
            max: max.max(min),
        };
        axis.set_value(value);
        axis
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
    }

    pub fn set_range(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max.max(min);
        self.set_value(self.value);
    }
}

/// Rectangle in content (image pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug)]
pub struct Viewport {
    zoom: f32,
    zoom_offset: f32,
    min_zoom: f32,
    max_zoom: f32,
    horizontal: ScrollAxis,
    vertical: ScrollAxis,
    pressed: bool,
    wheel_zoom: bool,
    pane: [f32; 2],
    content: [f32; 2],
    changes: Notifier<ViewportChanged>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Viewport {
    /// A viewport showing content of the given pixel size at zoom 1.0.
    pub fn new(content_width: u32, content_height: u32) -> Self {
        let mut viewport = Self {
            zoom: 1.0,
            zoom_offset: 0.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            horizontal: ScrollAxis::default(),
            vertical: ScrollAxis::default(),
            pressed: false,
            wheel_zoom: true,
            pane: [0.0, 0.0],
            content: [content_width as f32, content_height as f32],
            changes: Notifier::new(),
        };
        viewport.update_ranges();
        viewport
    }

    pub fn with_wheel_zoom(mut self, enabled: bool) -> Self {
        self.wheel_zoom = enabled;
        self
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_offset(&self) -> f32 {
        self.zoom_offset
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Uniform scale applied to the content on both axes.
    pub fn scale(&self) -> f32 {
        self.zoom + self.zoom_offset
    }

    pub fn wheel_zoom(&self) -> bool {
        self.wheel_zoom
    }

    pub fn set_wheel_zoom(&mut self, enabled: bool) {
        self.wheel_zoom = enabled;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Clamp `zoom` into `[min_zoom, max_zoom]` and apply it, keeping the
    /// pane centre anchored. Returns `false` (and does nothing) when the clamped
    /// value equals the current zoom. Never notifies.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let anchor = [self.pane[0] / 2.0, self.pane[1] / 2.0];
        self.set_zoom_anchored(zoom, anchor)
    }

    /// Clamp `zoom` into `[min_zoom, max_zoom]`. NaN maps to `min_zoom`.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    pub fn set_zoom_bounds(&mut self, min_zoom: f32, max_zoom: f32) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        // Re-clamp the current zoom into the new bounds.
        let zoom = self.zoom;
        self.set_zoom(zoom);
    }

    pub fn set_zoom_offset(&mut self, offset: f32) {
        self.zoom_offset = offset;
        self.update_ranges();
    }

    pub fn axis(&self, axis: Axis) -> &ScrollAxis {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut ScrollAxis {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn scroll(&self, axis: Axis) -> f32 {
        self.axis(axis).value()
    }

    /// Programmatic scroll; clamped to the axis range and silent.
    pub fn set_scroll(&mut self, axis: Axis, value: f32) {
        self.axis_mut(axis).set_value(value);
    }

    pub fn pane_size(&self) -> [f32; 2] {
        self.pane
    }

    pub fn content_size(&self) -> [f32; 2] {
        self.content
    }

    pub fn set_pane_size(&mut self, width: f32, height: f32) {
        let size = [width.max(0.0), height.max(0.0)];
        if size != self.pane {
            self.pane = size;
            self.update_ranges();
        }
    }

    pub fn set_content_size(&mut self, width: u32, height: u32) {
        self.content = [width as f32, height as f32];
        self.update_ranges();
    }

    /// Scaled content size in pane pixels.
    pub fn scaled_content(&self) -> [f32; 2] {
        let scale = self.scale();
        [self.content[0] * scale, self.content[1] * scale]
    }

    /// Where the content's top-left corner lands, in pane coordinates.
    pub fn content_origin(&self) -> [f32; 2] {
        let scaled = self.scaled_content();
        [
            origin_on_axis(self.pane[0], scaled[0], self.horizontal.value()),
            origin_on_axis(self.pane[1], scaled[1], self.vertical.value()),
        ]
    }

    /// The part of the content currently inside the pane.
    pub fn visible_rect(&self) -> ContentRect {
        let scale = self.scale();
        if scale <= 0.0 {
            return ContentRect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            };
        }
        let origin = self.content_origin();
        let x0 = (-origin[0] / scale).max(0.0);
        let y0 = (-origin[1] / scale).max(0.0);
        let x1 = ((self.pane[0] - origin[0]) / scale).min(self.content[0]);
        let y1 = ((self.pane[1] - origin[1]) / scale).min(self.content[1]);
        ContentRect {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0.0),
            height: (y1 - y0).max(0.0),
        }
    }

    /// Map a pane position to content coordinates.
    pub fn pane_to_content(&self, pos: [f32; 2]) -> [f32; 2] {
        let origin = self.content_origin();
        let scale = self.scale().max(f32::EPSILON);
        [(pos[0] - origin[0]) / scale, (pos[1] - origin[1]) / scale]
    }

    /// Pointer went down inside the pane.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Pointer moved by `delta` pane pixels. While pressed, the content follows
    /// the pointer and a change is emitted. Returns whether it was handled.
    pub fn drag(&mut self, delta: [f32; 2]) -> bool {
        if !self.pressed {
            return false;
        }
        let h = self.horizontal.value() - delta[0];
        let v = self.vertical.value() - delta[1];
        self.horizontal.set_value(h);
        self.vertical.set_value(v);
        self.changes.emit(ViewportChanged);
        true
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Wheel turned by `delta` (120 per notch, positive away from the user).
    ///
    /// With wheel zoom enabled the zoom is multiplied by `2^(delta / 240)`
    /// around `anchor` (pane coordinates, defaulting to the centre); otherwise
    /// the pane scrolls vertically. Either way a change is emitted.
    pub fn wheel(&mut self, delta: f32, anchor: Option<[f32; 2]>) {
        if self.wheel_zoom {
            let factor = 2f32.powf(delta / WHEEL_ZOOM_STEP);
            let anchor = anchor.unwrap_or([self.pane[0] / 2.0, self.pane[1] / 2.0]);
            let zoom = self.zoom * factor;
            self.set_zoom_anchored(zoom, anchor);
        } else {
            let pixels = delta / WHEEL_NOTCH_DELTA * WHEEL_SCROLL_PIXELS;
            let v = self.vertical.value() - pixels;
            self.vertical.set_value(v);
        }
        self.changes.emit(ViewportChanged);
    }

    pub fn changes(&mut self) -> &mut Notifier<ViewportChanged> {
        &mut self.changes
    }

    fn set_zoom_anchored(&mut self, zoom: f32, anchor: [f32; 2]) -> bool {
        let zoom = self.clamp_zoom(zoom);
        if zoom == self.zoom {
            return false;
        }
        let anchored = self.pane_to_content(anchor);
        self.zoom = zoom;
        self.update_ranges();

        let scale = self.scale();
        self.horizontal.set_value(anchored[0] * scale - anchor[0]);
        self.vertical.set_value(anchored[1] * scale - anchor[1]);
        true
    }

    fn update_ranges(&mut self) {
        let scaled = self.scaled_content();
        self.horizontal
            .set_range(0.0, (scaled[0] - self.pane[0]).max(0.0));
        self.vertical.set_range(0.0, (scaled[1] - self.pane[1]).max(0.0));
    }
}

impl Notifies for Viewport {
    type Event = ViewportChanged;

    fn notifier_mut(&mut self) -> &mut Notifier<ViewportChanged> {
        &mut self.changes
    }
}

fn origin_on_axis(pane: f32, scaled: f32, scroll: f32) -> f32 {
    if scaled <= pane {
        (pane - scaled) / 2.0
    } else {
        -scroll
    }
}
