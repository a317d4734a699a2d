use crate::app::IdiffApp;

pub fn show(ctx: &egui::Context, app: &mut IdiffApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            ui.label(format!("Zoom: {:.0}%", app.window.slider().zoom() * 100.0));
            ui.separator();
            if let Some(name) = app.window.current_name() {
                ui.label(format!("View: {name}"));
                ui.separator();
            }
            for image in app.window.images() {
                ui.label(format!(
                    "{} ({}x{})",
                    image.display_name(),
                    image.width(),
                    image.height()
                ));
            }
            if let Some(flicker) = app.window.flicker() {
                ui.separator();
                ui.label(format!("Flicker: {flicker}"));
            }
        });
        ui.add_space(2.0);
    });
}
