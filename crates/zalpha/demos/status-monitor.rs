//! Polls vehicle status once a second and prints changes in safety state.
//!
//! Run with:
//!   cargo run --example status-monitor -- 192.168.1.10 [v1|v2]

use std::thread;
use std::time::Duration;

use zalpha::client::{Client, ClientConfig, ProtocolGeneration, SafetyFlags};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(host) = args.next() else {
        eprintln!("Usage: status-monitor <server_ip_address> [v1|v2]");
        return Ok(());
    };
    let generation = match args.next().as_deref() {
        Some("v1") => ProtocolGeneration::V1,
        _ => ProtocolGeneration::V2,
    };

    let config = ClientConfig::default()
        .with_generation(generation)
        .with_recv_timeout(Duration::from_secs(2));
    let mut agv = Client::with_config(config)?;
    agv.connect(&host)?;

    let (server, compatible) = agv.check_compatibility()?;
    eprintln!(
        "API server {server} ({})",
        if compatible { "compatible" } else { "incompatible" }
    );

    let mut last: Option<SafetyFlags> = None;
    loop {
        let sample = agv.get_encoder_and_safety_flag()?;
        let battery = agv.get_battery()?;
        println!(
            "encoder=({:.3}, {:.3}) m battery={battery:.1}%",
            sample.encoder.left, sample.encoder.right
        );

        if last != Some(sample.safety) {
            let active = sample.safety.active();
            if active.is_empty() {
                println!("  safety: clear");
            }
            for condition in active {
                let severity = if condition.is_critical() { "critical" } else { "warning" };
                println!("  safety: {condition} ({severity})");
            }
            last = Some(sample.safety);
        }

        thread::sleep(Duration::from_secs(1));
    }
}
