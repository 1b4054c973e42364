//! DoorCtl — garage door opener controller.
//!
//! Process wiring only: logger, configuration, GPIO adapter, and the poll
//! loop. All door logic lives in the library.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  EspGpio/SimGpio   LogEventSink   NVS/file config        │
//! │  (GpioPort)        (EventSink)    (ConfigPort)           │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        DoorService (pure logic)                │      │
//! │  │  gate · pulse · reconcile · timeout            │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The service lives behind an `Arc<Mutex<_>>`: the poll loop and any
//! remote-control adapter (out of scope here) lock the same door, so
//! commands, poll reconciliation, and timeout firing are serialized.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use log::{info, warn};

use doorctl::adapters::log_sink::LogEventSink;
use doorctl::adapters::time::MonotonicClock;
use doorctl::app::events::AppEvent;
use doorctl::app::ports::{ConfigPort, EventSink, GpioPort};
use doorctl::app::service::DoorService;
use doorctl::config::DoorConfig;
use doorctl::poller::Poller;

/// Emit a status snapshot every this many poll cycles.
const STATUS_EVERY_CYCLES: u32 = 30;

/// Main-loop idle granularity between poll-due checks.
const IDLE_SLICE_MS: u32 = 50;

/// Everything that must be mutated under one lock: the door model and the
/// GPIO port it exclusively owns.
struct SharedDoor<G: GpioPort> {
    service: DoorService,
    gpio: G,
}

fn main() -> Result<()> {
    init_platform()?;

    let config = load_config();
    info!(
        "doorctl starting: '{}' (budget {}s, poll {}ms)",
        config.name, config.transition_budget_secs, config.poll_interval_ms
    );

    let gpio = make_gpio();
    run(config, gpio)
}

fn run(config: DoorConfig, mut gpio: impl GpioPort) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    let service = DoorService::initialize(&config, &mut gpio, &mut sink)
        .map_err(|e| anyhow!("door initialization failed: {e}"))?;
    let door = Arc::new(Mutex::new(SharedDoor { service, gpio }));

    // A remote-control adapter would clone `door` here and serve
    // get/set calls against the same mutex.

    let mut poller = Poller::new(config.poll_interval_ms);
    let mut cycles: u32 = 0;

    #[cfg(not(target_os = "espidf"))]
    let mut demo_commanded = false;

    loop {
        let now = clock.now_ms();

        // Host-only demo stimulus: command the door open a few seconds in
        // so a bare `cargo run` shows a full transition.
        #[cfg(not(target_os = "espidf"))]
        if !demo_commanded && now >= 3000 {
            demo_commanded = true;
            let mut guard = door
                .lock()
                .map_err(|_| anyhow!("door mutex poisoned"))?;
            let SharedDoor { service, gpio } = &mut *guard;
            match service.set_target(doorctl::door::TargetState::Open, now, gpio, &mut sink) {
                Ok(()) => info!("demo: commanded door open"),
                Err(e) => warn!("demo: command rejected: {e}"),
            }
        }

        if poller.due(now) {
            let mut guard = door
                .lock()
                .map_err(|_| anyhow!("door mutex poisoned"))?;
            let SharedDoor { service, gpio } = &mut *guard;
            service.poll_cycle(now, gpio, &mut sink);

            cycles = cycles.wrapping_add(1);
            if cycles % STATUS_EVERY_CYCLES == 0 {
                sink.emit(&AppEvent::Status(service.status()));
            }
        }

        idle_ms(IDLE_SLICE_MS);
    }
}

// ── Platform wiring ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_platform() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_platform() -> Result<()> {
    use anyhow::Context;

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .context("logger init failed")?;
    info!("running in host simulation mode");
    Ok(())
}

#[cfg(target_os = "espidf")]
fn load_config() -> DoorConfig {
    use doorctl::adapters::nvs::NvsConfigAdapter;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    let loaded = EspDefaultNvsPartition::take()
        .map_err(|e| warn!("NVS partition unavailable: {e}"))
        .ok()
        .and_then(|partition| NvsConfigAdapter::new(partition).ok())
        .map(|adapter| adapter.load());

    match loaded {
        Some(Ok(config)) => config,
        Some(Err(doorctl::app::ports::ConfigError::NotFound)) | None => {
            info!("no stored config, using defaults");
            DoorConfig::default()
        }
        Some(Err(e)) => {
            warn!("stored config unusable ({e}), using defaults");
            DoorConfig::default()
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn load_config() -> DoorConfig {
    use doorctl::adapters::config_file::FileConfigAdapter;
    use doorctl::app::ports::ConfigError;

    match FileConfigAdapter::new("doorctl.json").load() {
        Ok(config) => config,
        Err(ConfigError::NotFound) => {
            info!("no doorctl.json, using defaults");
            DoorConfig::default()
        }
        Err(e) => {
            warn!("doorctl.json unusable ({e}), using defaults");
            DoorConfig::default()
        }
    }
}

#[cfg(target_os = "espidf")]
fn make_gpio() -> impl GpioPort {
    doorctl::adapters::gpio::EspGpio::new()
}

#[cfg(not(target_os = "espidf"))]
fn make_gpio() -> impl GpioPort {
    doorctl::adapters::gpio::SimGpio::new()
}

#[cfg(target_os = "espidf")]
fn idle_ms(ms: u32) {
    esp_idf_hal::delay::FreeRtos::delay_ms(ms);
}

#[cfg(not(target_os = "espidf"))]
fn idle_ms(ms: u32) {
    std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
}
