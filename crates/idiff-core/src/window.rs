//! Toolkit-independent window model: every view, the shared zoom slider, and
//! which view is current.

use std::sync::Arc;

use tracing::{debug, info};

use crate::consts::{MAX_ZOOM, MIN_IMAGE_COUNT, MIN_ZOOM};
use crate::error::{IdiffError, Result};
use crate::flicker::FlickerInterval;
use crate::image_io::SourceImage;
use crate::settings::Settings;
use crate::slider::{SliderMoved, ZoomSlider};
use crate::view::{View, ViewContext};
use crate::views::{DEFAULT_VIEW, VIEWS};

/// Startup choices that shape the window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowOptions {
    /// Initially selected view; unknown names fall back to the default view.
    pub view: Option<String>,
    pub flicker: Option<FlickerInterval>,
}

pub struct Window {
    images: Vec<Arc<SourceImage>>,
    views: Vec<Box<dyn View>>,
    current: Option<usize>,
    slider: ZoomSlider,
    flicker: Option<FlickerInterval>,
}

impl Window {
    /// Build every registered view over `images` and select the requested one.
    pub fn new(
        images: Vec<Arc<SourceImage>>,
        options: &WindowOptions,
        settings: &Settings,
    ) -> Result<Self> {
        if images.len() < MIN_IMAGE_COUNT {
            return Err(IdiffError::NotEnoughImages {
                required: MIN_IMAGE_COUNT,
                actual: images.len(),
            });
        }

        let ctx = ViewContext {
            images: &images,
            settings,
        };
        let views = VIEWS
            .iter()
            .map(|entry| (entry.build)(&ctx))
            .collect::<Result<Vec<_>>>()?;
        debug!(views = views.len(), images = images.len(), "Views built");

        let mut window = Self {
            images,
            views,
            current: None,
            slider: ZoomSlider::for_zoom_range(MIN_ZOOM, MAX_ZOOM),
            flicker: options.flicker,
        };

        let requested = options.view.as_deref().unwrap_or(DEFAULT_VIEW);
        if !window.select_view(requested) {
            window.select_view(DEFAULT_VIEW);
        }
        Ok(window)
    }

    /// Make `name` the current view. Returns `false` when `name` is not
    /// registered or is already current.
    pub fn select_view(&mut self, name: &str) -> bool {
        let Some(index) = self.views.iter().position(|view| view.name() == name) else {
            debug!(name, "Ignoring unknown view");
            return false;
        };
        if self.current == Some(index) {
            return false;
        }
        self.current = Some(index);
        self.views[index].on_activated(&self.slider);
        info!(view = name, "View selected");
        true
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current().map(|view| view.name())
    }

    pub fn current(&self) -> Option<&dyn View> {
        let view: &dyn View = self.views.get(self.current?)?.as_ref();
        Some(view)
    }

    pub fn current_mut(&mut self) -> Option<&mut dyn View> {
        let view: &mut dyn View = self.views.get_mut(self.current?)?.as_mut();
        Some(view)
    }

    pub fn slider(&self) -> &ZoomSlider {
        &self.slider
    }

    pub fn view_names(&self) -> Vec<&'static str> {
        self.views.iter().map(|view| view.name()).collect()
    }

    pub fn images(&self) -> &[Arc<SourceImage>] {
        &self.images
    }

    pub fn flicker(&self) -> Option<FlickerInterval> {
        self.flicker
    }

    /// User moved the shared slider.
    pub fn slide(&mut self, value: i32) {
        self.slider.set_value(value);
        self.pump();
    }

    /// Dispatch pending slider and viewport notifications until none remain.
    /// Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let moved = self.slider.changes().drain();
            for &SliderMoved(value) in &moved {
                for view in &mut self.views {
                    view.on_slide(value);
                }
            }

            let changed = match self.current {
                Some(index) => self.views[index].pump(&mut self.slider),
                None => 0,
            };

            if moved.is_empty() && changed == 0 {
                return handled;
            }
            handled += moved.len() + changed;
        }
    }
}
