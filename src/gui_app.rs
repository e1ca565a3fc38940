use anyhow::anyhow;
use eframe::{
    App as EguiApp,
    egui::{self, Color32, PointerButton},
};
use gilrs::{GamepadId, Gilrs};
use tracing::{info, warn};

use crate::{
    binding::{DeviceKind, LogicalButton},
    capture::MenuState,
    config::AppConfig,
    engine::Engine,
    event::RawEvent,
    frame::Extent,
    joypad::JoypadTranslator,
    keyboard::{describe, key_code, menu_keys},
    network::Sender,
};

const HELP: [&str; 5] = [
    "Keybindings:",
    "F1 = Bindings (Keyboard)",
    "F2 = Bindings (Controller)",
    "F3 = Network Settings",
    "Esc = Back (or quit)",
];

pub struct GuiApp {
    cfg: AppConfig,
    ip_buffer: String,
    gilrs: Gilrs,
    active_id: Option<GamepadId>,
    gamepad_name: String,
    translator: JoypadTranslator,
    engine: Engine,
    sender: Sender,
}

impl GuiApp {
    pub fn new(cfg: AppConfig) -> anyhow::Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| anyhow!("failed to initialize gilrs: {e}"))?;

        let (active_id, gamepad_name) = if let Some((id, gamepad)) = gilrs.gamepads().next() {
            info!("Using gamepad '{}'", gamepad.name());
            (Some(id), gamepad.name().to_string())
        } else {
            (None, "Waiting for controller...".to_string())
        };

        let sender = Sender::new(cfg.target())?;
        let mut engine = Engine::new(cfg.bindings.clone(), menu_keys(), cfg.deadzone);
        if cfg.target().is_none() {
            info!("No target configured, opening network settings");
            engine.open_network();
        }

        Ok(Self {
            ip_buffer: cfg.target_ip.clone().unwrap_or_default(),
            cfg,
            gilrs,
            active_id,
            gamepad_name,
            translator: JoypadTranslator::new(),
            engine,
            sender,
        })
    }

    /// Returns `true` when a disconnect released inputs that were still held.
    fn track_gamepad(&mut self) -> bool {
        if self.active_id.is_none() {
            if let Some((id, gamepad)) = self.gilrs.gamepads().next() {
                info!("Gamepad connected: {}", gamepad.name());
                self.active_id = Some(id);
                self.gamepad_name = gamepad.name().to_string();
                self.translator = JoypadTranslator::new();
            }
        } else if let Some(active) = self.active_id {
            if !self.gilrs.gamepads().any(|(id, _)| id == active) {
                warn!("Gamepad disconnected");
                self.active_id = None;
                self.gamepad_name = "Waiting for controller...".into();
                self.translator = JoypadTranslator::new();
                return self.engine.release_joypad();
            }
        }
        false
    }

    fn collect_gamepad(&mut self, out: &mut Vec<RawEvent>) {
        while let Some(ev) = self.gilrs.next_event() {
            if Some(ev.id) != self.active_id {
                continue;
            }
            if let Some(raw) = self.translator.translate(ev.event) {
                out.push(raw);
            }
        }
    }

    fn apply_target(&mut self) {
        let host = self.ip_buffer.trim();
        self.cfg.target_ip = (!host.is_empty()).then(|| host.to_string());
        if let Err(e) = self.cfg.save() {
            warn!("Failed to save config: {}", e);
        }
        match self.cfg.target() {
            Some(host) => self.sender.set_target(host),
            None => self.sender.set_peer(None),
        }
    }

    fn draw_bindings(&self, ui: &mut egui::Ui, kind: DeviceKind) {
        let menu = self.engine.menu();
        let selected = menu.selected();
        let highlight = if matches!(menu, MenuState::Capturing { .. }) {
            Color32::YELLOW
        } else {
            Color32::RED
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (button, binding) in self.engine.bindings().iter(kind) {
                let text = format!("{} - {}", button.name(), describe(binding));
                if selected == Some(button.index()) {
                    ui.colored_label(highlight, text).scroll_to_me(None);
                } else {
                    ui.label(text);
                }
            }
        });
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        for line in HELP {
            ui.label(line);
        }
        ui.separator();

        let st = self.engine.state();
        ui.label(match self.sender.peer() {
            Some(peer) => format!("Target: {peer}"),
            None => "Target: None".into(),
        });
        ui.label(if self.active_id.is_some() {
            format!("Gamepad Active: {}", self.gamepad_name)
        } else {
            "No active gamepad".into()
        });
        ui.label(format!("Circle Pad: {}, {}", st.stick_x, st.stick_y));
        ui.label(format!("HID Buttons: {:08X}", !st.buttons));
        let pressed: Vec<&str> = LogicalButton::ALL
            .iter()
            .filter(|b| st.is_pressed(**b))
            .map(|b| b.name())
            .collect();
        ui.label(format!("Pressed: {}", pressed.join(", ")));
        if st.touch.active {
            ui.label(format!("Touch: {}, {}", st.touch.x, st.touch.y));
        }
    }
}

/// Window size in points; the whole window is the touch surface.
fn touch_extent(ctx: &egui::Context) -> Extent {
    let r = ctx.screen_rect();
    Extent {
        width: r.width().round().max(1.0) as u16,
        height: r.height().round().max(1.0) as u16,
    }
}

#[inline]
fn to_pixel(v: f32, extent: u16) -> u16 {
    v.clamp(0.0, f32::from(extent.saturating_sub(1))) as u16
}

fn collect_window(ctx: &egui::Context, window: Extent, out: &mut Vec<RawEvent>) {
    let events = ctx.input(|i| i.events.clone());
    for ev in events {
        match ev {
            egui::Event::Key {
                key,
                pressed,
                repeat: false,
                ..
            } => out.push(if pressed {
                RawEvent::KeyDown(key_code(key))
            } else {
                RawEvent::KeyUp(key_code(key))
            }),
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => out.push(if pressed {
                RawEvent::MouseDown {
                    x: to_pixel(pos.x, window.width),
                    y: to_pixel(pos.y, window.height),
                }
            } else {
                RawEvent::MouseUp
            }),
            egui::Event::PointerMoved(pos) => out.push(RawEvent::MouseMove {
                x: to_pixel(pos.x, window.width),
                y: to_pixel(pos.y, window.height),
            }),
            _ => {}
        }
    }
    if ctx.input(|i| i.viewport().close_requested()) {
        out.push(RawEvent::Quit);
    }
}

impl EguiApp for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let released = self.track_gamepad();

        let window = touch_extent(ctx);
        let mut batch = Vec::new();
        self.collect_gamepad(&mut batch);
        collect_window(ctx, window, &mut batch);

        let pump = self.engine.pump(batch, &mut self.cfg);
        if pump.dirty || released {
            self.sender.send_state(self.engine.state(), window);
        }
        if pump.quit {
            info!("Exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.engine.menu() {
            MenuState::Idle => {
                ui.heading("3DS Input Redirection");
                ui.separator();
                self.draw_status(ui);
            }
            MenuState::Bindings { kind, .. } | MenuState::Capturing { kind, .. } => {
                ui.heading(format!("{} Bindings", kind.label()));
                ui.separator();
                self.draw_bindings(ui, kind);
            }
            MenuState::Network => {
                ui.heading("Network Settings");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("IP:");
                    let buffer = &mut self.ip_buffer;
                    let edit = egui::TextEdit::singleline(buffer).desired_width(160.0);
                    let resp = ui.add(edit);
                    if (resp.lost_focus() && resp.changed())
                        || ui.input(|i| i.key_pressed(egui::Key::Enter))
                    {
                        self.apply_target();
                    }
                });
                ui.label(match self.sender.peer() {
                    Some(peer) => format!("Sending to {peer}"),
                    None => "Not sending".into(),
                });
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Extent = Extent {
        width: 640,
        height: 480,
    };

    fn collect(input: egui::RawInput) -> Vec<RawEvent> {
        let ctx = egui::Context::default();
        let mut out = Vec::new();
        let _ = ctx.run(input, |ctx| {
            out.clear();
            collect_window(ctx, WINDOW, &mut out);
        });
        out
    }

    fn key_event(key: egui::Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn pointer_positions_stay_inside_the_window() {
        assert_eq!(to_pixel(-3.0, 640), 0);
        assert_eq!(to_pixel(320.4, 640), 320);
        assert_eq!(to_pixel(700.0, 640), 639);
        assert_eq!(to_pixel(5.0, 0), 0);
    }

    #[test]
    fn keys_become_raw_events_without_repeats() {
        let mut input = egui::RawInput::default();
        input.events = vec![
            key_event(egui::Key::A, true, false),
            key_event(egui::Key::A, true, true),
            key_event(egui::Key::A, false, false),
        ];
        let code = key_code(egui::Key::A);
        let expected = vec![RawEvent::KeyDown(code), RawEvent::KeyUp(code)];
        assert_eq!(collect(input), expected);
    }

    #[test]
    fn close_request_becomes_quit() {
        let mut input = egui::RawInput::default();
        input.events = vec![key_event(egui::Key::B, true, false)];
        input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .events
            .push(egui::ViewportEvent::Close);
        let code = key_code(egui::Key::B);
        let expected = vec![RawEvent::KeyDown(code), RawEvent::Quit];
        assert_eq!(collect(input), expected);
    }

    #[test]
    fn no_close_request_no_quit() {
        assert!(collect(egui::RawInput::default()).is_empty());
    }
}
