// poller_worker.rs
use gilrs::{EventType, GamepadId, Gilrs};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tracing::info;

use crate::{
    config::AppConfig, engine::Engine, event::RawEvent, joypad::JoypadTranslator,
    keyboard::menu_keys, network::Sender,
};

const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// PollerWorker drains gamepad events through the engine and sends frames in a separate thread.
pub struct PollerWorker {
    gilrs: Gilrs,
    active_id: GamepadId,
    cfg: AppConfig,
    engine: Engine,
    translator: JoypadTranslator,
    sender: Sender,
    running: Arc<AtomicBool>,
}

impl PollerWorker {
    pub fn new(
        gilrs: Gilrs,
        active_id: GamepadId,
        cfg: AppConfig,
        sender: Sender,
        running: Arc<AtomicBool>,
    ) -> Self {
        let engine = Engine::new(cfg.bindings.clone(), menu_keys(), cfg.deadzone);

        PollerWorker {
            gilrs,
            active_id,
            cfg,
            engine,
            translator: JoypadTranslator::new(),
            sender,
            running,
        }
    }

    /// Queue one gilrs event. Returns `true` if the active pad disconnected.
    fn collect(&mut self, ev: gilrs::Event, out: &mut Vec<RawEvent>) -> bool {
        if ev.id != self.active_id {
            return false;
        }
        if matches!(ev.event, EventType::Connected | EventType::Disconnected) {
            info!("Gamepad {:?} event: {:?}", ev.id, ev.event);
        }
        if let Some(raw) = self.translator.translate(ev.event) {
            out.push(raw);
        }
        ev.event == EventType::Disconnected
    }

    /// Runs the polling loop until `running` is cleared.
    /// One frame is sent per iteration that processed at least one event.
    pub fn run(&mut self) {
        let mut batch = Vec::new();
        while self.running.load(Ordering::SeqCst) {
            let mut disconnected = false;
            // Block briefly so the `running` flag is re-checked regularly.
            if let Some(ev) = self.gilrs.next_event_blocking(Some(POLL_TIMEOUT)) {
                disconnected |= self.collect(ev, &mut batch);
                while let Some(ev) = self.gilrs.next_event() {
                    disconnected |= self.collect(ev, &mut batch);
                }
            }

            let pump = self.engine.pump(batch.drain(..), &mut self.cfg);
            // Inputs held when the pad went away would otherwise stay pressed.
            let released = disconnected && self.engine.release_joypad();
            if pump.dirty || released {
                let window = self.cfg.window();
                self.sender.send_state(self.engine.state(), window);
            }
            if pump.quit {
                self.running.store(false, Ordering::SeqCst);
            }
        }
        info!("Poller stopped");
    }
}
