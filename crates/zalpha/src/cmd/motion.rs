use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use zalpha_client::{BezierPath, Point, ZmqClient};

use crate::cmd::{
    AccelArgs, ActionArgs, ActionOp, BezierArgs, DriveArgs, RotateArgs, SpeedArgs, StraightArgs,
};
use crate::exit::{client_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{OutputFormat, Report};

pub fn accel(args: AccelArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    if let Some([acc, dec]) = args.set.as_deref().and_then(pair) {
        client
            .set_acceleration(acc, dec)
            .map_err(|err| client_error("set acceleration failed", err))?;
    }
    let acc = client
        .get_acceleration()
        .map_err(|err| client_error("acceleration query failed", err))?;
    Report::new()
        .field("acceleration", acc.acceleration)
        .field("deceleration", acc.deceleration)
        .print(format);
    Ok(SUCCESS)
}

pub fn speed(args: SpeedArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    if let Some([left, right]) = args.set.as_deref().and_then(pair) {
        client
            .set_target_speed(left, right)
            .map_err(|err| client_error("set target speed failed", err))?;
    }
    let speeds = client
        .get_target_speed()
        .map_err(|err| client_error("target speed query failed", err))?;
    Report::new()
        .field("left", speeds.left)
        .field("right", speeds.right)
        .print(format);
    Ok(SUCCESS)
}

/// Refresh the target speed until the duration elapses or Ctrl-C, then stop.
///
/// The socket runs in relaxed mode so the stop request can still be sent
/// after an interrupted or failed receive.
pub fn drive(args: DriveArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args
        .connect
        .connect_with(args.connect.config().with_relaxed_requests())?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let start = Instant::now();
    let mut updates = 0u64;
    let held = hold_speed(&mut client, &args, &running, start, &mut updates);

    // Always try to stop, even if holding failed part-way.
    let stopped = client.set_target_speed(0.0, 0.0);
    held.map_err(|err| client_error("set target speed failed", err))?;
    stopped.map_err(|err| client_error("stop failed", err))?;

    tracing::debug!(updates, "drive finished");
    Report::new()
        .field("left", args.left)
        .field("right", args.right)
        .field_with(
            "elapsed_ms",
            start.elapsed().as_millis() as u64,
            format!("{} ms", start.elapsed().as_millis()),
        )
        .field("updates", updates)
        .field("interrupted", !running.load(Ordering::SeqCst))
        .print(format);
    Ok(SUCCESS)
}

fn hold_speed(
    client: &mut ZmqClient,
    args: &DriveArgs,
    running: &AtomicBool,
    start: Instant,
    updates: &mut u64,
) -> zalpha_client::Result<()> {
    while running.load(Ordering::SeqCst) && start.elapsed() < args.duration {
        client.set_target_speed(args.left, args.right)?;
        *updates += 1;
        std::thread::sleep(args.interval);
    }
    Ok(())
}

pub fn straight(args: StraightArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    client
        .move_straight(args.speed, args.distance, args.laser_area)
        .map_err(|err| client_error("move straight failed", err))?;
    Report::new()
        .field("action", "move_straight")
        .field("started", true)
        .print(format);
    Ok(SUCCESS)
}

pub fn bezier(args: BezierArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    let point = |xy: &[f32]| Point::new(xy[0], xy[1]);
    let path = BezierPath {
        end: point(&args.end),
        cp1: point(&args.cp1),
        cp2: point(&args.cp2),
    };
    client
        .move_bezier(args.speed, &path, args.laser_area)
        .map_err(|err| client_error("move bezier failed", err))?;
    Report::new()
        .field("action", "move_bezier")
        .field("started", true)
        .print(format);
    Ok(SUCCESS)
}

pub fn rotate(args: RotateArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    client
        .rotate(args.speed, args.degrees.to_radians(), args.laser_area)
        .map_err(|err| client_error("rotate failed", err))?;
    Report::new()
        .field("action", "rotate")
        .field("started", true)
        .print(format);
    Ok(SUCCESS)
}

pub fn action(args: ActionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    let result = match args.op {
        ActionOp::Status => {
            let status = client
                .get_action_status()
                .map_err(|err| client_error("action status query failed", err))?;
            Report::new().field_with("status", status, status.as_str()).print(format);
            return Ok(SUCCESS);
        }
        ActionOp::Pause => client.pause_action().map(|()| "paused"),
        ActionOp::Resume => client.resume_action().map(|()| "resumed"),
        ActionOp::Stop => client.stop_action().map(|()| "stopped"),
    };
    let outcome = result.map_err(|err| client_error("action control failed", err))?;
    Report::new().field("action", outcome).print(format);
    Ok(SUCCESS)
}

fn pair(values: &[f32]) -> Option<[f32; 2]> {
    match values {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
