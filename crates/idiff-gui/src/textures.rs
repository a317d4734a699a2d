use std::collections::HashMap;

use idiff_core::view::DisplayImage;

use crate::convert::display_to_color_image;

/// GPU textures for pane bitmaps, uploaded on first use and kept for the
/// lifetime of the window. Keyed by view name and pane index.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<(&'static str, usize), egui::TextureHandle>,
}

impl TextureCache {
    pub fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        view: &'static str,
        pane: usize,
        image: &DisplayImage,
    ) -> &egui::TextureHandle {
        self.textures.entry((view, pane)).or_insert_with(|| {
            tracing::debug!(view, pane, label = image.label(), "Uploading texture");
            ctx.load_texture(
                format!("{view}/{pane}"),
                display_to_color_image(image),
                egui::TextureOptions::NEAREST,
            )
        })
    }
}
