//! The three comparison views and the ordered table that registers them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::composite::{BlendMode, CompositeImage, Opacity};
use crate::error::{IdiffError, Result};
use crate::external::ExternalDiff;
use crate::settings::MergedBackend;
use crate::view::{DisplayImage, Pane, View, ViewContext};

pub const DEFAULT_VIEW: &str = "2up";

/// A registered view: its selectable name and how to build it.
pub struct ViewEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn(&ViewContext) -> Result<Box<dyn View>>,
}

/// Every view, in the order shown to the user.
pub static VIEWS: &[ViewEntry] = &[
    ViewEntry {
        name: SideBySideView::NAME,
        description: "Images side by side with linked zoom and scroll",
        build: |ctx| Ok(Box::new(SideBySideView::new(ctx)?)),
    },
    ViewEntry {
        name: SliceView::NAME,
        description: "All images multiplied into one layer",
        build: |ctx| Ok(Box::new(SliceView::new(ctx)?)),
    },
    ViewEntry {
        name: MergedView::NAME,
        description: "Difference of all images",
        build: |ctx| Ok(Box::new(MergedView::new(ctx)?)),
    },
];

pub fn view_names() -> Vec<&'static str> {
    VIEWS.iter().map(|entry| entry.name).collect()
}

pub fn find_view(name: &str) -> Option<&'static ViewEntry> {
    VIEWS.iter().find(|entry| entry.name == name)
}

fn require_images(ctx: &ViewContext, required: usize) -> Result<()> {
    if ctx.images.len() < required {
        return Err(IdiffError::NotEnoughImages {
            required,
            actual: ctx.images.len(),
        });
    }
    Ok(())
}

/// Build a single-pane view over a native composite of every input.
fn composite_pane(ctx: &ViewContext, mode: BlendMode, label: &str) -> Result<Pane> {
    require_images(ctx, 1)?;
    let composite =
        CompositeImage::from_images(mode, &ctx.rgba_layers(), &Opacity::default(), None)?;
    let image = DisplayImage::from_composite(label, &composite);
    Ok(Pane::new(Arc::new(image), ctx.wheel_zoom()))
}

/// One pane per input, zoom and relative scroll shared.
pub struct SideBySideView {
    panes: Vec<Pane>,
}

impl SideBySideView {
    pub const NAME: &'static str = "2up";

    pub fn new(ctx: &ViewContext) -> Result<Self> {
        require_images(ctx, 1)?;
        let panes = ctx
            .images
            .iter()
            .map(|image| Pane::new(Arc::new(DisplayImage::from_source(image)), ctx.wheel_zoom()))
            .collect();
        Ok(Self { panes })
    }
}

impl View for SideBySideView {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn panes(&self) -> &[Pane] {
        &self.panes
    }

    fn panes_mut(&mut self) -> &mut [Pane] {
        &mut self.panes
    }
}

/// Every input multiplied onto one layer.
pub struct SliceView {
    pane: [Pane; 1],
}

impl SliceView {
    pub const NAME: &'static str = "slice";

    pub fn new(ctx: &ViewContext) -> Result<Self> {
        let pane = composite_pane(ctx, BlendMode::Multiply, Self::NAME)?;
        Ok(Self { pane: [pane] })
    }
}

impl View for SliceView {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn panes(&self) -> &[Pane] {
        &self.pane
    }

    fn panes_mut(&mut self) -> &mut [Pane] {
        &mut self.pane
    }
}

/// Difference of the inputs, natively or through an external `compare`.
pub struct MergedView {
    pane: [Pane; 1],
}

impl MergedView {
    pub const NAME: &'static str = "merged";

    pub fn new(ctx: &ViewContext) -> Result<Self> {
        let pane = match ctx.settings.merged.backend {
            MergedBackend::External => match Self::external_pane(ctx) {
                Ok(pane) => pane,
                Err(e) => {
                    warn!(error = %e, "External diff failed, using native difference");
                    composite_pane(ctx, BlendMode::Difference, Self::NAME)?
                }
            },
            MergedBackend::Native => composite_pane(ctx, BlendMode::Difference, Self::NAME)?,
        };
        Ok(Self { pane: [pane] })
    }

    /// Compares the first two inputs only.
    fn external_pane(ctx: &ViewContext) -> Result<Pane> {
        require_images(ctx, 2)?;
        let diff = ExternalDiff::from(&ctx.settings.merged);
        let rgba = diff.run(ctx.images[0].path(), ctx.images[1].path())?;
        info!(command = %diff.command, "Merged view uses external diff");
        let image = DisplayImage::from_rgba(Self::NAME, &rgba);
        Ok(Pane::new(Arc::new(image), ctx.wheel_zoom()))
    }
}

impl View for MergedView {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn panes(&self) -> &[Pane] {
        &self.pane
    }

    fn panes_mut(&mut self) -> &mut [Pane] {
        &mut self.pane
    }
}
