//! Link service.
//!
//! Owns the session behind a single lock and funnels every mutation through
//! it: UI calls lock directly, radio events arrive via the pump task, and
//! the transmit worker takes the lock per write. The lock is never held
//! across an await, so the inter-byte delay cannot starve event handling.

use crate::domain::models::{AppEvent, Command, Device};
use crate::infrastructure::link::pipeline::{self, Transmitter};
use crate::infrastructure::link::session::Session;
use crate::infrastructure::link::transport::{LinkEventReceiver, RadioLink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct LinkService {
    session: Arc<Mutex<Session>>,
    commands: mpsc::UnboundedSender<Command>,
}

impl LinkService {
    /// Wire up the session actor: an event pump for the radio and the
    /// sequential transmit worker.
    pub fn new(
        radio: Arc<dyn RadioLink>,
        link_events: LinkEventReceiver,
        app_events: mpsc::UnboundedSender<AppEvent>,
        device_filter: String,
    ) -> Self {
        let session = Arc::new(Mutex::new(Session::new(
            radio,
            app_events.clone(),
            device_filter,
        )));

        let pump_session = session.clone();
        tokio::spawn(async move {
            let mut link_events = link_events;
            while let Some(event) = link_events.recv().await {
                pump_session
                    .lock()
                    .expect("session lock")
                    .handle_event(event);
            }
        });

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let transmitter = Transmitter::new(session.clone(), app_events);
        tokio::spawn(pipeline::run_transmit_worker(transmitter, command_rx));

        Self {
            session,
            commands: command_tx,
        }
    }

    pub fn start_scan(&self) {
        self.session.lock().expect("session lock").start_scan();
    }

    pub fn stop_scan(&self) {
        self.session.lock().expect("session lock").stop_scan();
    }

    pub fn connect(&self, device: Device) {
        self.session.lock().expect("session lock").connect(device);
    }

    pub fn disconnect(&self) {
        self.session.lock().expect("session lock").disconnect();
    }

    /// Queue one command for the transmit worker. Never blocks and never
    /// fails; precondition problems surface as reported conditions.
    pub fn send(&self, command: Command) {
        let _ = self.commands.send(command);
    }

    // ---- read-only observations ----

    pub fn is_connected(&self) -> bool {
        self.session.lock().expect("session lock").is_connected()
    }

    pub fn is_scanning(&self) -> bool {
        self.session.lock().expect("session lock").is_scanning()
    }

    pub fn discovered_devices(&self) -> Vec<Device> {
        self.session
            .lock()
            .expect("session lock")
            .discovered_devices()
    }

    pub fn connected_device(&self) -> Option<Device> {
        self.session
            .lock()
            .expect("session lock")
            .connected_device()
    }

    /// Synchronous connection poll with drift reconciliation.
    pub fn check_connection(&self) -> bool {
        self.session
            .lock()
            .expect("session lock")
            .check_connection()
    }

    pub fn set_device_filter(&self, filter: impl Into<String>) {
        self.session
            .lock()
            .expect("session lock")
            .set_device_filter(filter);
    }

    /// Payloads swallowed by the simulated device, for diagnostics.
    pub fn simulated_transcript(&self) -> Vec<String> {
        self.session
            .lock()
            .expect("session lock")
            .simulated_transcript()
    }

    /// Periodic connection poll. The cadence is the caller's policy; the
    /// poll itself funnels through the session lock like everything else.
    pub fn spawn_connection_poll(&self, interval: Duration) -> JoinHandle<()> {
        let session = self.session.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                session.lock().expect("session lock").check_connection();
            }
        })
    }
}
