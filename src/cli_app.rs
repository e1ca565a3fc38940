// cli_app.rs
use anyhow::{Context, anyhow, bail};
use gilrs::Gilrs;
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread::{self, JoinHandle},
};
use tracing::{error, info, warn};

use crate::{
    binding::{Binding, DeviceKind},
    config::AppConfig,
    network::Sender,
    poller_worker::PollerWorker,
};

/// Headless joypad-only mode: owns the PollerWorker thread.
pub struct CliApp {
    running_signal: Arc<AtomicBool>,
    worker_handle: Option<JoinHandle<()>>,
}

impl CliApp {
    /// Initialize gilrs, pick the first gamepad, and spawn the PollerWorker.
    pub fn new(cfg: AppConfig) -> anyhow::Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| anyhow!("failed to initialize gilrs: {e}"))?;
        let (active_id, name) = match gilrs.gamepads().next() {
            Some((id, gamepad)) => (id, gamepad.name().to_string()),
            None => bail!("no gamepad connected, connect one and try again"),
        };

        info!("Using gamepad '{}' (id {:?})", name, active_id);
        info!("Deadzone: {}", cfg.deadzone);
        let bound = cfg
            .bindings
            .iter(DeviceKind::Joypad)
            .filter(|(_, b)| *b != Binding::None)
            .count();
        info!("Joypad bindings: {}", bound);
        if bound == 0 {
            warn!("No joypad bindings configured, set them up in the GUI");
        }

        let target = cfg.target().map(str::to_string);
        match &target {
            Some(host) => info!("Target: {}", host),
            None => warn!("No target configured; frames will not be sent"),
        }
        let sender = Sender::new(target.as_deref()).context("failed to open UDP sender")?;

        let running_signal = Arc::new(AtomicBool::new(true));
        let mut poller_worker =
            PollerWorker::new(gilrs, active_id, cfg, sender, running_signal.clone());

        let worker_handle = thread::spawn(move || {
            poller_worker.run();
        });

        Ok(CliApp {
            running_signal,
            worker_handle: Some(worker_handle),
        })
    }

    /// Sets up the Ctrl+C handler and waits for the PollerWorker.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let r = self.running_signal.clone();
        ctrlc::set_handler(move || {
            if r.load(Ordering::SeqCst) {
                info!("Ctrl+C pressed, stopping");
                r.store(false, Ordering::SeqCst);
            } else {
                info!("Ctrl+C pressed again, already stopping");
            }
        })?;

        info!("Running. Press Ctrl+C to stop.");

        if let Some(handle) = self.worker_handle.take() {
            if let Err(e) = handle.join() {
                error!("PollerWorker thread panicked: {:?}", e);
            }
        }

        info!("Stopped");
        Ok(())
    }
}
