use std::time::Instant;

use crate::cmd::BenchArgs;
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Report};

/// Each cycle samples encoders and safety flags, then commands zero speed,
/// mirroring a minimal control loop.
pub fn run(args: BenchArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;

    let start = Instant::now();
    for _ in 0..args.cycles {
        client
            .get_encoder_and_safety_flag()
            .map_err(|err| client_error("encoder and safety query failed", err))?;
        client
            .set_target_speed(0.0, 0.0)
            .map_err(|err| client_error("set target speed failed", err))?;
    }
    let elapsed = start.elapsed();

    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let frequency_hz = if elapsed_ms > 0.0 {
        f64::from(args.cycles) * 1000.0 / elapsed_ms
    } else {
        0.0
    };
    Report::new()
        .field("cycles", args.cycles)
        .field_with("elapsed_ms", elapsed_ms, format!("{elapsed_ms:.1} ms"))
        .field_with("frequency_hz", frequency_hz, format!("{frequency_hz:.1} Hz"))
        .print(format);
    Ok(SUCCESS)
}
