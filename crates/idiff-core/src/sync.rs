//! Zoom and scroll mirroring between the panes of a view and the shared slider.
//!
//! Scroll positions are mirrored as a fraction of each axis's range rather
//! than as absolute offsets, so panes with different content sizes stay aligned
//! by relative position.

use tracing::debug;

use crate::slider::{slider_to_zoom, zoom_to_slider, ZoomSlider};
use crate::viewport::{Axis, ScrollAxis, Viewport};

const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

/// Position of `axis` as a fraction of its range; 0 when the range is empty.
pub fn scroll_percent(axis: &ScrollAxis) -> f32 {
    let span = axis.span();
    if span != 0.0 {
        (axis.value() - axis.min()) / span
    } else {
        0.0
    }
}

/// The value at fraction `percent` of `axis`'s range.
pub fn percent_to_value(axis: &ScrollAxis, percent: f32) -> f32 {
    percent * axis.span() + axis.min()
}

/// Move `axis` to fraction `percent` of its range.
pub fn apply_percent(axis: &mut ScrollAxis, percent: f32) {
    let value = percent_to_value(axis, percent);
    axis.set_value(value);
}

/// Give every viewport other than `source` the source's zoom, exactly.
pub fn propagate_zoom(viewports: &mut [&mut Viewport], source: usize) {
    let Some(zoom) = viewports.get(source).map(|v| v.zoom()) else {
        return;
    };
    for (index, viewport) in viewports.iter_mut().enumerate() {
        if index != source {
            viewport.set_zoom(zoom);
        }
    }
}

/// Give every viewport other than `source` the source's scroll position,
/// expressed as a fraction of each axis's range.
pub fn propagate_offset(viewports: &mut [&mut Viewport], source: usize) {
    let Some(percents) = viewports
        .get(source)
        .map(|v| AXES.map(|axis| scroll_percent(v.axis(axis))))
    else {
        return;
    };
    for (index, viewport) in viewports.iter_mut().enumerate() {
        if index == source {
            continue;
        }
        for (axis, percent) in AXES.into_iter().zip(percents) {
            apply_percent(viewport.axis_mut(axis), percent);
        }
    }
}

/// Links a view's panes to the shared zoom slider.
///
/// Pane 0 is the slider's source viewport; any pane the user interacts with
/// becomes the source for that propagation pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportLink;

impl ViewportLink {
    /// The slider moved to `value`.
    pub fn on_slide(&self, viewports: &mut [&mut Viewport], value: i32) {
        let Some(source) = viewports.first_mut() else {
            return;
        };
        source.set_zoom(slider_to_zoom(value));
        propagate_zoom(viewports, 0);
        propagate_offset(viewports, 0);
    }

    /// The user panned or zoomed pane `source`.
    pub fn on_viewport_changed(
        &self,
        viewports: &mut [&mut Viewport],
        source: usize,
        slider: &mut ZoomSlider,
    ) {
        let Some(zoom) = viewports.get(source).map(|v| v.zoom()) else {
            return;
        };
        propagate_zoom(viewports, source);
        propagate_offset(viewports, source);

        // Reflect the zoom on the slider without re-entering on_slide.
        let value = zoom_to_slider(zoom);
        if slider.set_value_silently(value) {
            debug!(source, value, "Slider follows viewport");
        }
    }

    /// The view became visible: bring every pane in line with the slider.
    pub fn on_activated(&self, viewports: &mut [&mut Viewport], slider: &ZoomSlider) {
        self.on_slide(viewports, slider.value());
    }
}
