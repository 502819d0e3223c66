use esp32_robot_controller::encoder::MotorKind;
use esp32_robot_controller::infrastructure::logging;
use esp32_robot_controller::{
    AppEvent, Command, Device, JoystickSampler, JoystickVector, LinkService, MotorToggles,
    RobotProfile, SettingsService, SimulatedLink, SAMPLE_INTERVAL,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Headless demo: drives the simulated robot through the full core, so the
/// session machine, encoder and transmit pipeline can be exercised without
/// any radio hardware.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = SettingsService::new()?;
    let _logging_guard = logging::init_logger(&settings.get().log_settings)?;
    info!("Starting ESP32 robot controller (simulated demo)");

    let (app_tx, mut app_rx) = mpsc::unbounded_channel();
    // The demo never talks to a platform radio; the null transport stands in.
    let (_link_tx, link_rx) = mpsc::unbounded_channel();
    let radio = Arc::new(SimulatedLink::new());

    let service = LinkService::new(
        radio,
        link_rx,
        app_tx,
        settings.get().device_filter.clone(),
    );
    let _poll = service.spawn_connection_poll(Duration::from_secs(5));

    tokio::spawn(async move {
        while let Some(event) = app_rx.recv().await {
            match event {
                AppEvent::DeviceFound(device) => info!(name = %device.name, "device found"),
                AppEvent::ConnectionStatus(status) => info!(?status, "connection status"),
                AppEvent::LogMessage(msg) => info!(severity = ?msg.severity, "{}", msg.message),
            }
        }
    });

    let simulated = service
        .discovered_devices()
        .into_iter()
        .find(|d| d.is_simulated)
        .unwrap_or_else(Device::simulated);
    service.connect(simulated);
    anyhow::ensure!(service.is_connected(), "simulated connect failed");

    // Roomba profile: enter the default mode, then spin up two motors.
    let profile = RobotProfile::Roomba;
    if let Some(mode) = profile.default_mode() {
        info!(mode = mode.title, "selecting mode");
        service.send(mode.command);
    }

    let mut motors = MotorToggles::new();
    service.send(motors.toggle(MotorKind::Vacuum));
    service.send(motors.toggle(MotorKind::MainBrush));

    // A short drag gesture through the debounce sampler.
    let mut sampler = JoystickSampler::new();
    let mut ticker = tokio::time::interval(SAMPLE_INTERVAL);
    for step in 0..5 {
        sampler.update(JoystickVector::new(-0.2 * step as f32, 0.2 * step as f32));
        ticker.tick().await;
        if let Some(drive) = sampler.tick() {
            service.send(Command::Text(drive));
        }
    }
    service.send(Command::Text(sampler.release()));

    // Give the transmit worker time to drain (raw bytes pace at 10 ms).
    tokio::time::sleep(Duration::from_millis(200)).await;

    for line in service.simulated_transcript() {
        info!(%line, "simulated robot received");
    }

    service.disconnect();
    Ok(())
}
