//! egui keyboard adapter.
//!
//! Key codes are the CRC-32 of egui's key name, so bindings saved to the config file keep
//! their meaning when egui reorders or extends its `Key` enum.

use eframe::egui::Key;

use crate::{binding::Binding, capture::MenuKeys, event::KeyCode};

#[inline]
pub fn key_code(key: Key) -> KeyCode {
    KeyCode(crc32fast::hash(key.name().as_bytes()))
}

pub fn key_from_code(code: KeyCode) -> Option<Key> {
    Key::ALL.iter().copied().find(|k| key_code(*k) == code)
}

/// F1/F2/F3 open the menus, Esc goes back, arrows + Enter navigate.
pub fn menu_keys() -> MenuKeys {
    MenuKeys {
        open_keyboard: key_code(Key::F1),
        open_joypad: key_code(Key::F2),
        open_network: key_code(Key::F3),
        back: key_code(Key::Escape),
        up: key_code(Key::ArrowUp),
        down: key_code(Key::ArrowDown),
        confirm: key_code(Key::Enter),
    }
}

/// Human readable binding, with key names instead of raw codes.
pub fn describe(binding: Binding) -> String {
    match binding {
        Binding::Key(code) => match key_from_code(code) {
            Some(key) => key.name().to_string(),
            None => binding.to_string(),
        },
        other => other.to_string(),
    }
}
