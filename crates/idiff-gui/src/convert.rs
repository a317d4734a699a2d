use idiff_core::consts::BACKGROUND_RGB;
use idiff_core::view::DisplayImage;

/// Upload-ready copy of a pane's bitmap. The buffer is already premultiplied.
pub fn display_to_color_image(image: &DisplayImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_premultiplied(image.size(), image.premultiplied())
}

/// The `#999999` fill behind every pane.
pub fn background_color() -> egui::Color32 {
    let [r, g, b] = BACKGROUND_RGB;
    egui::Color32::from_rgb(r, g, b)
}
