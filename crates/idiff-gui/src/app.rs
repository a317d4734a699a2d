use idiff_core::window::Window;

use crate::panels;
use crate::textures::TextureCache;

/// Keys selecting views by position in the registry.
const VIEW_KEYS: [egui::Key; 3] = [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3];

pub struct IdiffApp {
    pub window: Window,
    pub textures: TextureCache,
}

impl IdiffApp {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            textures: TextureCache::default(),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let quit = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
        if ctx.input_mut(|i| i.consume_shortcut(&quit)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if ctx.wants_keyboard_input() {
            return;
        }
        let names = self.window.view_names();
        for (key, name) in VIEW_KEYS.iter().zip(names) {
            if ctx.input(|i| i.key_pressed(*key)) {
                self.window.select_view(name);
            }
        }
    }
}

impl eframe::App for IdiffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::controls::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.window.pump() > 0 {
            ctx.request_repaint();
        }
    }
}
