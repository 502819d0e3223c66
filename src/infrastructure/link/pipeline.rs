//! Transmit pipeline.
//!
//! A simple sequential sender: commands are drained in submission order and
//! every failure degrades to a reported condition. The caller never gets an
//! error back because the UI has no synchronous recovery to run.

use crate::domain::models::{AppEvent, Command, MessageSeverity, StatusMessage};
use crate::infrastructure::link::session::Session;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Mandatory minimum gap between consecutive bytes of one `RawBytes`
/// command. The remote serial bridge ingests one command at a time; batching
/// the bytes into a single write is not equivalent.
pub const INTER_BYTE_DELAY: Duration = Duration::from_millis(10);

pub struct Transmitter {
    session: Arc<Mutex<Session>>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl Transmitter {
    pub fn new(session: Arc<Mutex<Session>>, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { session, events }
    }

    /// Transmit one command. For `RawBytes` every byte goes out as its own
    /// `C:<value>` text command, with the inter-byte delay between
    /// consecutive bytes (not before the first or after the last). Once
    /// started the sequence runs to the end; bytes attempted after a link
    /// drop fail and are reported individually.
    pub async fn send(&self, command: Command) {
        match command {
            Command::Text(payload) => self.send_text(&payload),
            Command::RawBytes(bytes) => {
                for (index, byte) in bytes.iter().enumerate() {
                    if index > 0 {
                        tokio::time::sleep(INTER_BYTE_DELAY).await;
                    }
                    self.send_text(&format!("C:{byte}"));
                }
            }
        }
    }

    fn send_text(&self, payload: &str) {
        if !payload.is_ascii() {
            self.report(format!("dropping non-ASCII payload: {payload:?}"));
            return;
        }

        // The session lock is released before the write; the inter-byte
        // sleep never holds it, so radio events keep flowing.
        let target = self.session.lock().expect("session lock").write_target();
        let Some(target) = target else {
            self.report(format!("no active session, dropped: {payload}"));
            return;
        };

        match target
            .link
            .write(target.device, target.channel, payload.as_bytes(), target.mode)
        {
            Ok(()) => trace!(payload, "sent"),
            Err(e) => self.report(format!("write failed ({e}), dropped: {payload}")),
        }
    }

    fn report(&self, message: String) {
        warn!("{message}");
        let _ = self.events.send(AppEvent::LogMessage(StatusMessage::new(
            message,
            MessageSeverity::Warning,
        )));
    }
}

/// Worker loop draining the command queue in submission order.
pub async fn run_transmit_worker(transmitter: Transmitter, mut commands: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        transmitter.send(command).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ChannelId, Device, DeviceId};
    use crate::infrastructure::link::session::Session;
    use crate::infrastructure::link::testing::MockLink;
    use crate::infrastructure::link::transport::{ChannelInfo, LinkEvent, ServiceId, WriteMode};

    fn ready_session(mock: Arc<MockLink>, ack: bool) -> Arc<Mutex<Session>> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = Session::new(mock, tx, "ESP32Roomba".to_string());
        let device = Device::new(DeviceId(9), "ESP32Roomba");
        session.connect(device.clone());
        session.handle_event(LinkEvent::Connected(device.id));
        session.handle_event(LinkEvent::ServicesFound {
            device: device.id,
            services: vec![ServiceId(1)],
        });
        session.handle_event(LinkEvent::CharacteristicsFound {
            device: device.id,
            service: ServiceId(1),
            channels: vec![ChannelInfo {
                id: ChannelId(7),
                write: ack,
                write_without_response: !ack,
            }],
        });
        assert!(session.is_connected());
        Arc::new(Mutex::new(session))
    }

    fn transmitter(session: Arc<Mutex<Session>>) -> (Transmitter, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Transmitter::new(session, tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn raw_bytes_frame_as_one_text_command_per_byte() {
        let mock = Arc::new(MockLink::new());
        let session = ready_session(mock.clone(), false);
        let (tx, _events) = transmitter(session);

        tx.send(Command::RawBytes(vec![138, 6, 0])).await;

        let writes = mock.writes();
        let payloads: Vec<_> = writes.iter().map(|w| w.payload.as_str()).collect();
        assert_eq!(payloads, vec!["C:138", "C:6", "C:0"]);

        for pair in writes.windows(2) {
            let gap = pair[1].at - pair[0].at;
            assert!(gap >= INTER_BYTE_DELAY, "gap {gap:?} below minimum");
        }
    }

    #[tokio::test]
    async fn text_uses_the_channel_write_mode() {
        let mock = Arc::new(MockLink::new());
        let session = ready_session(mock.clone(), true);
        let (tx, _events) = transmitter(session);

        tx.send(Command::text("V:100 R:32768")).await;

        let writes = mock.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].mode, WriteMode::Acknowledged);
        assert_eq!(writes[0].channel, ChannelId(7));
    }

    #[tokio::test]
    async fn unacknowledged_channel_falls_back_to_unack_write() {
        let mock = Arc::new(MockLink::new());
        let session = ready_session(mock.clone(), false);
        let (tx, _events) = transmitter(session);

        tx.send(Command::text("V:0 R:32768")).await;
        assert_eq!(mock.writes()[0].mode, WriteMode::Unacknowledged);
    }

    #[tokio::test]
    async fn send_without_session_is_a_reported_no_op() {
        let mock = Arc::new(MockLink::new());
        let (tx_events, _rx) = mpsc::unbounded_channel();
        let session = Arc::new(Mutex::new(Session::new(
            mock.clone(),
            tx_events,
            "ESP32Roomba".to_string(),
        )));
        let (tx, mut events) = transmitter(session);

        tx.send(Command::text("V:100 R:100")).await;

        assert!(mock.writes().is_empty());
        match events.try_recv() {
            Ok(AppEvent::LogMessage(msg)) => {
                assert_eq!(msg.severity, MessageSeverity::Warning);
            }
            other => panic!("expected a warning, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn raw_bytes_keep_attempting_after_a_mid_sequence_drop() {
        let mock = Arc::new(MockLink::new());
        let session = ready_session(mock.clone(), false);
        let (tx, mut events) = transmitter(session);

        mock.set_link_up(false);
        tx.send(Command::RawBytes(vec![1, 2, 3])).await;

        // Every byte was attempted and individually reported, none written.
        assert!(mock.writes().is_empty());
        let mut warnings = 0;
        while let Ok(event) = events.try_recv() {
            if matches!(event, AppEvent::LogMessage(_)) {
                warnings += 1;
            }
        }
        assert_eq!(warnings, 3);
    }

    #[tokio::test]
    async fn simulated_session_records_but_never_touches_the_radio() {
        let mock = Arc::new(MockLink::new());
        let (tx_events, _rx) = mpsc::unbounded_channel();
        let mut session = Session::new(mock.clone(), tx_events, "ESP32Roomba".to_string());
        session.connect(Device::simulated());
        let session = Arc::new(Mutex::new(session));
        let (tx, _events) = transmitter(session.clone());

        tx.send(Command::text("V:200 R:32768")).await;
        tx.send(Command::RawBytes(vec![131])).await;

        assert!(mock.writes().is_empty());
        let transcript = session.lock().unwrap().simulated_transcript();
        assert_eq!(transcript, vec!["V:200 R:32768", "C:131"]);
    }

    #[tokio::test]
    async fn non_ascii_payload_is_reported_and_dropped() {
        let mock = Arc::new(MockLink::new());
        let session = ready_session(mock.clone(), false);
        let (tx, mut events) = transmitter(session);

        tx.send(Command::text("V:0 R:32768 \u{1F916}")).await;

        assert!(mock.writes().is_empty());
        assert!(matches!(events.try_recv(), Ok(AppEvent::LogMessage(_))));
    }
}
