use crate::consts::{MAX_ZOOM, MIN_ZOOM, SLIDER_MULTIPLIER};
use crate::signal::{Notifier, Notifies, SignalBlocker};

/// Emitted when the slider value changes through [`ZoomSlider::set_value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderMoved(pub i32);

/// Convert an integer slider position to a zoom factor.
pub fn slider_to_zoom(value: i32) -> f32 {
    value as f32 / SLIDER_MULTIPLIER
}

/// Convert a zoom factor to the nearest slider position.
pub fn zoom_to_slider(zoom: f32) -> i32 {
    (zoom * SLIDER_MULTIPLIER).round() as i32
}

/// The single zoom slider shared by every view in a window.
///
/// Holds an integer position; the zoom it represents is `value / SLIDER_MULTIPLIER`.
#[derive(Debug)]
pub struct ZoomSlider {
    value: i32,
    min: i32,
    max: i32,
    changes: Notifier<SliderMoved>,
}

impl Default for ZoomSlider {
    fn default() -> Self {
        Self::for_zoom_range(MIN_ZOOM, MAX_ZOOM)
    }
}

impl ZoomSlider {
    /// Slider covering `[min_zoom, max_zoom]`, positioned at zoom 1.0 (or the nearest bound).
    pub fn for_zoom_range(min_zoom: f32, max_zoom: f32) -> Self {
        let min = zoom_to_slider(min_zoom);
        let max = zoom_to_slider(max_zoom).max(min);
        Self {
            value: zoom_to_slider(1.0).clamp(min, max),
            min,
            max,
            changes: Notifier::new(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn zoom(&self) -> f32 {
        slider_to_zoom(self.value)
    }

    /// Move the slider. Emits [`SliderMoved`] when the clamped value differs
    /// from the current one and notifications are not blocked.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        if value == self.value {
            return false;
        }
        self.value = value;
        self.changes.emit(SliderMoved(value));
        true
    }

    /// Move the slider with its notifications blocked for the update.
    pub fn set_value_silently(&mut self, value: i32) -> bool {
        self.block_signals().set_value(value)
    }

    pub fn block_signals(&mut self) -> SignalBlocker<'_, Self> {
        SignalBlocker::new(self)
    }

    pub fn changes(&mut self) -> &mut Notifier<SliderMoved> {
        &mut self.changes
    }
}

impl Notifies for ZoomSlider {
    type Event = SliderMoved;

    fn notifier_mut(&mut self) -> &mut Notifier<SliderMoved> {
        &mut self.changes
    }
}
