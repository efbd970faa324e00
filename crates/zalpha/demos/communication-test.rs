//! Measures request/reply throughput against a live API server.
//!
//! Run with:
//!   cargo run --example communication-test -- 192.168.1.10

use std::time::Instant;

use zalpha::client::Client;

const NUM_CYCLES: u32 = 1000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(host) = std::env::args().nth(1) else {
        eprintln!("Usage: communication-test <server_ip_address>");
        return Ok(());
    };

    let mut agv = Client::new()?;
    agv.connect(&host)?;

    println!(
        "Running GET_ENCODER_AND_SAFETY_FLAG and SET_TARGET_SPEED for {NUM_CYCLES} cycles"
    );

    let start = Instant::now();
    for _ in 0..NUM_CYCLES {
        agv.get_encoder_and_safety_flag()?;
        agv.set_target_speed(0.0, 0.0)?;
    }
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!("Total elapsed time: {elapsed_ms:.1} ms.");
    println!(
        "Average frequency: {:.1} Hz.",
        f64::from(NUM_CYCLES) * 1000.0 / elapsed_ms
    );

    agv.disconnect();
    Ok(())
}
