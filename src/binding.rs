use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{config::ConfigError, constants::hid_bits, event::KeyCode};

/// Which physical device a binding belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Keyboard,
    Joypad,
}

impl DeviceKind {
    #[inline]
    fn slot(self) -> usize {
        match self {
            DeviceKind::Keyboard => 0,
            DeviceKind::Joypad => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Keyboard => "Keyboard",
            DeviceKind::Joypad => "Controller",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

/// How a logical button reaches the console: a bit in the HID mask, or a circle pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Mask(u32),
    Stick(StickDirection),
}

/// Console-side inputs that can be bound.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    L,
    R,
    ZL,
    ZR,
    Start,
    Select,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    CircleUp,
    CircleDown,
    CircleLeft,
    CircleRight,
    CStickUp,
    CStickDown,
    CStickLeft,
    CStickRight,
}

impl LogicalButton {
    /// Menu order.
    pub const ALL: [LogicalButton; 22] = [
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::L,
        LogicalButton::R,
        LogicalButton::ZL,
        LogicalButton::ZR,
        LogicalButton::Start,
        LogicalButton::Select,
        LogicalButton::DPadUp,
        LogicalButton::DPadDown,
        LogicalButton::DPadLeft,
        LogicalButton::DPadRight,
        LogicalButton::CircleUp,
        LogicalButton::CircleDown,
        LogicalButton::CircleLeft,
        LogicalButton::CircleRight,
        LogicalButton::CStickUp,
        LogicalButton::CStickDown,
        LogicalButton::CStickLeft,
        LogicalButton::CStickRight,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`LogicalButton::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn role(self) -> ButtonRole {
        use LogicalButton::*;
        match self {
            A => ButtonRole::Mask(hid_bits::A),
            B => ButtonRole::Mask(hid_bits::B),
            X => ButtonRole::Mask(hid_bits::X),
            Y => ButtonRole::Mask(hid_bits::Y),
            L => ButtonRole::Mask(hid_bits::L),
            R => ButtonRole::Mask(hid_bits::R),
            ZL => ButtonRole::Mask(hid_bits::ZL),
            ZR => ButtonRole::Mask(hid_bits::ZR),
            Start => ButtonRole::Mask(hid_bits::START),
            Select => ButtonRole::Mask(hid_bits::SELECT),
            DPadUp => ButtonRole::Mask(hid_bits::DUP),
            DPadDown => ButtonRole::Mask(hid_bits::DDOWN),
            DPadLeft => ButtonRole::Mask(hid_bits::DLEFT),
            DPadRight => ButtonRole::Mask(hid_bits::DRIGHT),
            CircleUp => ButtonRole::Stick(StickDirection::Up),
            CircleDown => ButtonRole::Stick(StickDirection::Down),
            CircleLeft => ButtonRole::Stick(StickDirection::Left),
            CircleRight => ButtonRole::Stick(StickDirection::Right),
            CStickUp => ButtonRole::Mask(hid_bits::CSTICK_UP),
            CStickDown => ButtonRole::Mask(hid_bits::CSTICK_DOWN),
            CStickLeft => ButtonRole::Mask(hid_bits::CSTICK_LEFT),
            CStickRight => ButtonRole::Mask(hid_bits::CSTICK_RIGHT),
        }
    }

    pub fn name(self) -> &'static str {
        use LogicalButton::*;
        match self {
            A => "A",
            B => "B",
            X => "X",
            Y => "Y",
            L => "L",
            R => "R",
            ZL => "ZL",
            ZR => "ZR",
            Start => "Start",
            Select => "Select",
            DPadUp => "D-Pad Up",
            DPadDown => "D-Pad Down",
            DPadLeft => "D-Pad Left",
            DPadRight => "D-Pad Right",
            CircleUp => "Circle Pad Up",
            CircleDown => "Circle Pad Down",
            CircleLeft => "Circle Pad Left",
            CircleRight => "Circle Pad Right",
            CStickUp => "C-Stick Up",
            CStickDown => "C-Stick Down",
            CStickLeft => "C-Stick Left",
            CStickRight => "C-Stick Right",
        }
    }
}

/// The physical input that activates a logical button.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    #[default]
    None,
    Key(KeyCode),
    Button(u8),
    Hat(u8),
    /// `invert` selects the negative half of the axis.
    Axis {
        axis: u8,
        invert: bool,
    },
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Binding::None => write!(f, "None"),
            Binding::Key(code) => write!(f, "Key {}", code.0),
            Binding::Button(index) => write!(f, "Button {index}"),
            Binding::Hat(mask) => write!(f, "Hat {mask}"),
            Binding::Axis { axis, invert } => {
                write!(f, "Axis {}{axis}", if invert { "-" } else { "+" })
            }
        }
    }
}

/// One persisted binding, as written to the settings file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub device: DeviceKind,
    pub button: LogicalButton,
    pub binding: Binding,
}

/// One binding per (device kind, logical button). Unbound slots hold [`Binding::None`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "Vec<BindingEntry>", into = "Vec<BindingEntry>")]
pub struct BindingTable {
    slots: [[Binding; LogicalButton::COUNT]; 2],
}

impl Default for BindingTable {
    fn default() -> Self {
        Self {
            slots: [[Binding::None; LogicalButton::COUNT]; 2],
        }
    }
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, kind: DeviceKind, button: LogicalButton) -> Binding {
        self.slots[kind.slot()][button.index()]
    }

    /// Overwrite the binding for one slot. Persisting is up to the caller's [`BindingStore`].
    pub fn set(&mut self, kind: DeviceKind, button: LogicalButton, binding: Binding) {
        self.slots[kind.slot()][button.index()] = binding;
    }

    /// All logical buttons together with their binding for `kind`.
    pub fn iter(&self, kind: DeviceKind) -> impl Iterator<Item = (LogicalButton, Binding)> + '_ {
        LogicalButton::ALL
            .iter()
            .zip(self.slots[kind.slot()].iter())
            .map(|(button, binding)| (*button, *binding))
    }
}

impl From<Vec<BindingEntry>> for BindingTable {
    fn from(entries: Vec<BindingEntry>) -> Self {
        let mut table = BindingTable::new();
        for entry in entries {
            table.set(entry.device, entry.button, entry.binding);
        }
        table
    }
}

impl From<BindingTable> for Vec<BindingEntry> {
    fn from(table: BindingTable) -> Self {
        [DeviceKind::Keyboard, DeviceKind::Joypad]
            .into_iter()
            .flat_map(|device| {
                table
                    .iter(device)
                    .filter(|(_, binding)| *binding != Binding::None)
                    .map(move |(button, binding)| BindingEntry {
                        device,
                        button,
                        binding,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Receives the full table every time a capture commits a new binding.
pub trait BindingStore {
    fn persist(&mut self, table: &BindingTable) -> Result<(), ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_starts_unbound() {
        let table = BindingTable::new();
        for button in LogicalButton::ALL {
            assert_eq!(table.lookup(DeviceKind::Keyboard, button), Binding::None);
            assert_eq!(table.lookup(DeviceKind::Joypad, button), Binding::None);
        }
    }

    #[test]
    fn set_then_lookup_returns_every_variant() {
        let variants = [
            Binding::None,
            Binding::Key(KeyCode(42)),
            Binding::Button(3),
            Binding::Hat(4),
            Binding::Axis {
                axis: 1,
                invert: true,
            },
        ];
        let mut table = BindingTable::new();
        for kind in [DeviceKind::Keyboard, DeviceKind::Joypad] {
            for b in variants {
                table.set(kind, LogicalButton::ZR, b);
                assert_eq!(table.lookup(kind, LogicalButton::ZR), b);
            }
        }
    }

    #[test]
    fn device_kinds_do_not_alias() {
        let mut table = BindingTable::new();
        table.set(DeviceKind::Joypad, LogicalButton::A, Binding::Button(0));
        assert_eq!(
            table.lookup(DeviceKind::Keyboard, LogicalButton::A),
            Binding::None
        );
    }

    #[test]
    fn index_matches_menu_order() {
        for (i, button) in LogicalButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
            assert_eq!(LogicalButton::from_index(i), Some(*button));
        }
        assert_eq!(LogicalButton::from_index(LogicalButton::COUNT), None);
    }

    #[test]
    fn masks_are_distinct() {
        let mut seen = 0u32;
        for button in LogicalButton::ALL {
            if let ButtonRole::Mask(mask) = button.role() {
                assert_eq!(mask.count_ones(), 1, "{}", button.name());
                assert_eq!(seen & mask, 0, "{} overlaps", button.name());
                seen |= mask;
            }
        }
    }

    #[test]
    fn entries_skip_unbound_and_restore() {
        let mut table = BindingTable::new();
        table.set(
            DeviceKind::Keyboard,
            LogicalButton::Start,
            Binding::Key(KeyCode(7)),
        );
        table.set(
            DeviceKind::Joypad,
            LogicalButton::CircleLeft,
            Binding::Axis {
                axis: 0,
                invert: true,
            },
        );

        let entries: Vec<BindingEntry> = table.clone().into();
        assert_eq!(entries.len(), 2);
        assert_eq!(BindingTable::from(entries), table);
    }

    #[test]
    fn display_names_binding_kind() {
        assert_eq!(Binding::None.to_string(), "None");
        assert_eq!(Binding::Button(5).to_string(), "Button 5");
        assert_eq!(
            Binding::Axis {
                axis: 2,
                invert: true
            }
            .to_string(),
            "Axis -2"
        );
    }
}
