//! Menu navigation and the "press the input to bind" capture mode.
//!
//! [`transition`] is a pure function of (menu state x raw event). [`CaptureMachine`] applies its
//! effects to the binding table and hands everything else back to the caller.

use tracing::{debug, info, warn};

use crate::{
    binding::{Binding, BindingStore, BindingTable, DeviceKind, LogicalButton},
    constants::CAPTURE_DEADZONE_FACTOR,
    event::{KeyCode, RawEvent},
};

/// Keys with a fixed menu meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuKeys {
    pub open_keyboard: KeyCode,
    pub open_joypad: KeyCode,
    pub open_network: KeyCode,
    pub back: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub confirm: KeyCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// No menu open, input goes to the console.
    #[default]
    Idle,
    Bindings {
        kind: DeviceKind,
        selected: usize,
    },
    /// Waiting for the next qualifying input of `kind`.
    Capturing {
        kind: DeviceKind,
        button: LogicalButton,
    },
    Network,
}

impl MenuState {
    /// Highlighted row of the binding list, if one is shown.
    pub fn selected(&self) -> Option<usize> {
        match *self {
            MenuState::Bindings { selected, .. } => Some(selected),
            MenuState::Capturing { button, .. } => Some(button.index()),
            MenuState::Idle | MenuState::Network => None,
        }
    }

    fn open_bindings(&self, kind: DeviceKind) -> MenuState {
        MenuState::Bindings {
            kind,
            selected: self.selected().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hand the event to the normalizer.
    Forward,
    /// Drop the old binding while a capture is pending.
    Clear(DeviceKind, LogicalButton),
    Commit(DeviceKind, LogicalButton, Binding),
    Quit,
}

/// Next state and side effect for one event. `None` means the event was swallowed.
pub fn transition(
    state: MenuState,
    event: &RawEvent,
    keys: &MenuKeys,
    capture_deadzone: i32,
) -> (MenuState, Option<Effect>) {
    if let RawEvent::KeyDown(code) = *event {
        if code == keys.back {
            return match state {
                MenuState::Idle => (state, Some(Effect::Quit)),
                _ => (MenuState::Idle, None),
            };
        }
        if code == keys.open_keyboard {
            return (state.open_bindings(DeviceKind::Keyboard), None);
        }
        if code == keys.open_joypad {
            return (state.open_bindings(DeviceKind::Joypad), None);
        }
        if code == keys.open_network {
            return (MenuState::Network, None);
        }
    }

    match (state, *event) {
        (_, RawEvent::Quit) => (state, Some(Effect::Quit)),

        (MenuState::Idle, _) => (state, Some(Effect::Forward)),

        (MenuState::Bindings { kind, selected }, RawEvent::KeyDown(code)) => {
            if code == keys.up {
                let selected = selected.saturating_sub(1);
                (MenuState::Bindings { kind, selected }, None)
            } else if code == keys.down {
                let selected = (selected + 1).min(LogicalButton::COUNT - 1);
                (MenuState::Bindings { kind, selected }, None)
            } else if code == keys.confirm {
                match LogicalButton::from_index(selected) {
                    Some(button) => (
                        MenuState::Capturing { kind, button },
                        Some(Effect::Clear(kind, button)),
                    ),
                    None => (state, None),
                }
            } else {
                (state, None)
            }
        }

        (
            MenuState::Capturing {
                kind: DeviceKind::Keyboard,
                button,
            },
            RawEvent::KeyDown(code),
        ) => commit(DeviceKind::Keyboard, button, Binding::Key(code)),

        (
            MenuState::Capturing {
                kind: DeviceKind::Joypad,
                button,
            },
            joy,
        ) => match joy {
            RawEvent::JoyButtonDown(index) => {
                commit(DeviceKind::Joypad, button, Binding::Button(index))
            }
            RawEvent::JoyAxis { axis, value } => {
                let v = i32::from(value).max(-i32::from(i16::MAX));
                if v.abs() < capture_deadzone {
                    (state, None)
                } else {
                    let invert = v < 0;
                    commit(DeviceKind::Joypad, button, Binding::Axis { axis, invert })
                }
            }
            // A centered hat would never match anything.
            RawEvent::JoyHat(value) if value != 0 => {
                commit(DeviceKind::Joypad, button, Binding::Hat(value))
            }
            _ => (state, None),
        },

        _ => (state, None),
    }
}

fn commit(
    kind: DeviceKind,
    button: LogicalButton,
    binding: Binding,
) -> (MenuState, Option<Effect>) {
    (
        MenuState::Bindings {
            kind,
            selected: button.index(),
        },
        Some(Effect::Commit(kind, button, binding)),
    )
}

/// What the caller should do with the event after the menu saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Forward,
    Handled,
    Quit,
}

#[derive(Debug, Clone)]
pub struct CaptureMachine {
    state: MenuState,
    keys: MenuKeys,
    capture_deadzone: i32,
}

impl CaptureMachine {
    /// `deadzone` is the runtime axis deadzone; capture uses a stricter multiple of it.
    pub fn new(keys: MenuKeys, deadzone: i16) -> Self {
        Self {
            state: MenuState::Idle,
            keys,
            capture_deadzone: i32::from(deadzone).abs() * CAPTURE_DEADZONE_FACTOR,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn open_network(&mut self) {
        self.state = MenuState::Network;
    }

    pub fn handle(
        &mut self,
        event: &RawEvent,
        bindings: &mut BindingTable,
        store: &mut dyn BindingStore,
    ) -> Flow {
        let (next, effect) = transition(self.state, event, &self.keys, self.capture_deadzone);
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.state) {
            info!("Menu: {:?} -> {:?}", self.state, next);
        }
        self.state = next;

        match effect {
            None => Flow::Handled,
            Some(Effect::Forward) => Flow::Forward,
            Some(Effect::Quit) => Flow::Quit,
            Some(Effect::Clear(kind, button)) => {
                bindings.set(kind, button, Binding::None);
                Flow::Handled
            }
            Some(Effect::Commit(kind, button, binding)) => {
                debug!("Bound {} ({}) to {}", button.name(), kind.label(), binding);
                bindings.set(kind, button, binding);
                if let Err(e) = store.persist(bindings) {
                    warn!("Failed to save bindings: {}", e);
                }
                Flow::Handled
            }
        }
    }
}
