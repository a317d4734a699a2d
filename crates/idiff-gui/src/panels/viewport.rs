use idiff_core::consts::WHEEL_NOTCH_DELTA;
use idiff_core::viewport::Viewport;

use crate::app::IdiffApp;
use crate::convert::background_color;

/// Gap between side-by-side panes.
const PANE_SPACING: f32 = 4.0;

/// Scroll distance egui reports for one wheel notch.
const POINTS_PER_NOTCH: f32 = 50.0;

pub fn show(ctx: &egui::Context, app: &mut IdiffApp) {
    let frame = egui::Frame::central_panel(&ctx.style()).fill(background_color());
    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        let IdiffApp { window, textures } = app;
        let Some(view) = window.current_mut() else {
            return;
        };
        let name = view.name();
        let panes = view.panes_mut();
        let count = panes.len();

        for (index, (pane, pane_rect)) in panes
            .iter_mut()
            .zip(split_horizontally(rect, count, PANE_SPACING))
            .enumerate()
        {
            let texture = textures.get_or_upload(ctx, name, index, pane.image()).id();
            let label = pane.image().label().to_string();

            let response = ui.interact(
                pane_rect,
                ui.id().with(("pane", name, index)),
                egui::Sense::click_and_drag(),
            );
            let viewport = &mut pane.viewport;
            viewport.set_pane_size(pane_rect.width(), pane_rect.height());
            handle_drag(&response, viewport);
            handle_wheel(ui, &response, viewport, pane_rect);

            draw_image(ui, texture, pane_rect, viewport);
            draw_label(ui, pane_rect, &label);
        }
    });
}

/// Divide `rect` into `count` equal columns separated by `spacing`.
fn split_horizontally(rect: egui::Rect, count: usize, spacing: f32) -> Vec<egui::Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = spacing * (count - 1) as f32;
    let width = ((rect.width() - gaps) / count as f32).max(0.0);
    (0..count)
        .map(|i| {
            let left = rect.left() + i as f32 * (width + spacing);
            egui::Rect::from_min_size(egui::pos2(left, rect.top()), egui::vec2(width, rect.height()))
        })
        .collect()
}

fn handle_drag(response: &egui::Response, viewport: &mut Viewport) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        viewport.press();
    }
    if response.dragged_by(egui::PointerButton::Primary) {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            viewport.drag([delta.x, delta.y]);
        }
    }
    if response.drag_stopped() {
        viewport.release();
    }
}

fn handle_wheel(
    ui: &egui::Ui,
    response: &egui::Response,
    viewport: &mut Viewport,
    rect: egui::Rect,
) {
    if !response.hovered() {
        return;
    }
    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll == 0.0 {
        return;
    }
    let anchor = ui
        .input(|i| i.pointer.hover_pos())
        .map(|pos| [pos.x - rect.left(), pos.y - rect.top()]);
    viewport.wheel(scroll / POINTS_PER_NOTCH * WHEEL_NOTCH_DELTA, anchor);
}

fn draw_image(ui: &egui::Ui, texture: egui::TextureId, rect: egui::Rect, viewport: &Viewport) {
    let [x, y] = viewport.content_origin();
    let [w, h] = viewport.scaled_content();
    let img_rect = egui::Rect::from_min_size(rect.min + egui::vec2(x, y), egui::vec2(w, h));
    ui.painter_at(rect).image(
        texture,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    ui.painter_at(rect).text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}
