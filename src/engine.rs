use tracing::debug;

use crate::{
    binding::{Binding, BindingStore, BindingTable, DeviceKind},
    capture::{CaptureMachine, Flow, MenuKeys, MenuState},
    event::RawEvent,
    normalizer::normalize,
    pad_state::DeviceState,
};

/// Result of draining one batch of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pump {
    /// At least one event was processed, so a frame is due.
    pub dirty: bool,
    pub quit: bool,
}

/// Owns the binding table, device state and menu state for one polling loop.
pub struct Engine {
    bindings: BindingTable,
    state: DeviceState,
    menu: CaptureMachine,
    deadzone: i16,
}

impl Engine {
    pub fn new(bindings: BindingTable, keys: MenuKeys, deadzone: i16) -> Self {
        Self {
            bindings,
            state: DeviceState::new(),
            menu: CaptureMachine::new(keys, deadzone),
            deadzone,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn menu(&self) -> MenuState {
        self.menu.state()
    }

    pub fn open_network(&mut self) {
        self.menu.open_network();
    }

    /// Route one event through the menu and, when it passes, the normalizer.
    /// Returns `false` once the loop should stop.
    pub fn handle(&mut self, event: &RawEvent, store: &mut dyn BindingStore) -> bool {
        match self.menu.handle(event, &mut self.bindings, store) {
            Flow::Forward => {
                normalize(event, &self.bindings, &mut self.state, self.deadzone);
                true
            }
            Flow::Handled => true,
            Flow::Quit => false,
        }
    }

    /// Release every button driven by a joypad binding, for when the pad goes away.
    /// Returns whether the device state changed.
    pub fn release_joypad(&mut self) -> bool {
        let before = self.state;
        for (button, binding) in self.bindings.iter(DeviceKind::Joypad) {
            if binding != Binding::None {
                self.state.set(button, 0);
            }
        }
        self.state != before
    }

    pub fn pump<I>(&mut self, events: I, store: &mut dyn BindingStore) -> Pump
    where
        I: IntoIterator<Item = RawEvent>,
    {
        let mut pump = Pump::default();
        for ev in events {
            if !self.handle(&ev, store) {
                debug!("Quit requested");
                pump.quit = true;
                break;
            }
            pump.dirty = true;
        }
        pump
    }
}
