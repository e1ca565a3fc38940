use serde::{Deserialize, Serialize};

/// Keyboard key identifier as assigned by the keyboard front end.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

/// Platform-neutral input event fed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    JoyAxis {
        axis: u8,
        value: i16,
    },
    JoyButtonDown(u8),
    JoyButtonUp(u8),
    /// Current hat position as a bitmask of `constants::hat_bits`.
    JoyHat(u8),
    MouseDown {
        x: u16,
        y: u16,
    },
    MouseMove {
        x: u16,
        y: u16,
    },
    MouseUp,
    /// Window closed or shutdown requested.
    Quit,
}
