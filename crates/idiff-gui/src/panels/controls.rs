use crate::app::IdiffApp;

const SLIDER_WIDTH: f32 = 320.0;

pub fn show(ctx: &egui::Context, app: &mut IdiffApp) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            view_buttons(ui, app);
            ui.separator();
            zoom_slider(ui, app);
        });
        ui.add_space(4.0);
    });
}

fn view_buttons(ui: &mut egui::Ui, app: &mut IdiffApp) {
    let current = app.window.current_name();
    for (index, name) in app.window.view_names().into_iter().enumerate() {
        let button = ui
            .selectable_label(current == Some(name), name)
            .on_hover_text(format!("Show the {name} view ({})", index + 1));
        if button.clicked() {
            app.window.select_view(name);
        }
    }
}

fn zoom_slider(ui: &mut egui::Ui, app: &mut IdiffApp) {
    let (min, max) = app.window.slider().range();
    let mut value = app.window.slider().value();

    ui.spacing_mut().slider_width = SLIDER_WIDTH;
    let response = ui.add(
        egui::Slider::new(&mut value, min..=max)
            .logarithmic(true)
            // Slider positions are zoom percentages.
            .custom_formatter(|v, _| format!("{v:.0}%"))
            .custom_parser(|s| s.trim().trim_end_matches('%').parse().ok())
            .text("Zoom"),
    );
    if response.changed() {
        app.window.slide(value);
    }
}
