#![cfg(feature = "cli")]

use std::process::{Command, Output};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use zalpha::frame::command::{v2, RESULT_ERROR_BUSY, RESULT_OK};
use zalpha::frame::Frame;

/// Answer `count` requests on an ephemeral loopback REP socket.
fn responder<F>(count: usize, respond: F) -> (u16, JoinHandle<Vec<u16>>)
where
    F: Fn(&Frame) -> Frame + Send + 'static,
{
    let context = zmq::Context::new();
    let socket = context.socket(zmq::REP).expect("rep socket");
    socket.bind("tcp://127.0.0.1:*").expect("bind");
    let last = socket.get_last_endpoint().expect("endpoint").expect("utf8");
    let port = last.rsplit(':').next().expect("port").parse().expect("port number");

    let handle = thread::spawn(move || {
        let _context = context;
        let mut commands = Vec::new();
        for _ in 0..count {
            let raw = socket.recv_bytes(0).expect("recv");
            let request = Frame::from_bytes(&raw).expect("request frame");
            commands.push(request.command());
            socket.send(&respond(&request).as_bytes()[..], 0).expect("send");
        }
        commands
    });
    (port, handle)
}

/// Acknowledge every request until none arrives for `idle`, keeping each one.
fn recorder(idle: Duration) -> (u16, JoinHandle<Vec<Frame>>) {
    let context = zmq::Context::new();
    let socket = context.socket(zmq::REP).expect("rep socket");
    socket.set_rcvtimeo(idle.as_millis() as i32).expect("rcvtimeo");
    socket.bind("tcp://127.0.0.1:*").expect("bind");
    let last = socket.get_last_endpoint().expect("endpoint").expect("utf8");
    let port = last.rsplit(':').next().expect("port").parse().expect("port number");

    let handle = thread::spawn(move || {
        let _context = context;
        let mut requests = Vec::new();
        while let Ok(raw) = socket.recv_bytes(0) {
            let request = Frame::from_bytes(&raw).expect("request frame");
            let reply = result(request.command(), RESULT_OK);
            socket.send(&reply.as_bytes()[..], 0).expect("send");
            requests.push(request);
        }
        requests
    });
    (port, handle)
}

fn zalpha(port: u16, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zalpha"))
        .env_remove("ZALPHA_HOST")
        .env_remove("ZALPHA_GENERATION")
        .env_remove("ZALPHA_TIMEOUT")
        .env("ZALPHA_PORT", port.to_string())
        .args(["--log-level", "off", "--format", "json"])
        .args(args)
        .args(["--host", "127.0.0.1", "--timeout", "5s"])
        .output()
        .expect("zalpha should run")
}

fn result(code: u16, result: u16) -> Frame {
    let mut reply = Frame::with_command(code);
    reply.write(0, result).expect("result");
    reply
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_zalpha"))
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("zalpha {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn battery_reports_json() {
    let (port, server) = responder(1, |request| {
        let mut reply = Frame::with_command(request.command());
        reply.write(0, 64.5f32).expect("battery");
        reply
    });

    let output = zalpha(port, &["battery"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), r#"{"battery_percent":64.5}"#);
    assert_eq!(server.join().expect("server"), vec![v2::GET_BATTERY]);
}

#[test]
fn outputs_set_then_reads_back() {
    let (port, server) = responder(2, |request| match request.command() {
        v2::SET_OUTPUTS => result(v2::SET_OUTPUTS, RESULT_OK),
        _ => {
            let mut reply = Frame::with_command(v2::GET_OUTPUTS);
            reply.write(0, 0x05u32).expect("outputs");
            reply
        }
    });

    let output = zalpha(port, &["outputs", "--set", "0x05", "--mask", "0x0F"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), r#"{"outputs":5}"#);
    assert_eq!(
        server.join().expect("server"),
        vec![v2::SET_OUTPUTS, v2::GET_OUTPUTS]
    );
}

#[test]
fn drive_refreshes_speed_then_stops() {
    let (port, server) = recorder(Duration::from_secs(2));

    let output = zalpha(port, &["drive", "0.2", "0.2", "--duration", "50ms"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""interrupted":false"#), "{stdout}");

    let requests = server.join().expect("server");
    assert!(requests.len() > 2, "only {} requests", requests.len());
    assert!(requests.iter().all(|r| r.command() == v2::SET_TARGET_SPEED));

    let speeds = |frame: &Frame| {
        (
            frame.read::<f32, _>(0).expect("left"),
            frame.read::<f32, _>(1).expect("right"),
        )
    };
    assert_eq!(speeds(&requests[0]), (0.2, 0.2));
    assert_eq!(speeds(&requests[requests.len() - 2]), (0.2, 0.2));
    assert_eq!(speeds(&requests[requests.len() - 1]), (0.0, 0.0));
}

#[test]
fn busy_device_exits_40() {
    let (port, server) = responder(1, |request| result(request.command(), RESULT_ERROR_BUSY));

    let output = zalpha(port, &["action", "stop"]);
    assert_eq!(output.status.code(), Some(40));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("target is busy"), "{stderr}");
    server.join().expect("server");
}

#[test]
fn unsupported_command_exits_64_without_traffic() {
    let output = Command::new(env!("CARGO_BIN_EXE_zalpha"))
        .env_remove("ZALPHA_HOST")
        .args(["--log-level", "off", "rotate", "0.4", "90"])
        .args(["--host", "127.0.0.1", "--port", "1", "--generation", "v1"])
        .output()
        .expect("zalpha should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ROTATE"), "{stderr}");
}

#[test]
fn silent_server_exits_124() {
    let context = zmq::Context::new();
    let socket = context.socket(zmq::REP).expect("rep socket");
    socket.bind("tcp://127.0.0.1:*").expect("bind");
    let last = socket.get_last_endpoint().expect("endpoint").expect("utf8");
    let port = last.rsplit(':').next().expect("port");

    let output = Command::new(env!("CARGO_BIN_EXE_zalpha"))
        .env_remove("ZALPHA_HOST")
        .args(["--log-level", "off", "inputs"])
        .args(["--host", "127.0.0.1", "--port", port, "--timeout", "200ms"])
        .output()
        .expect("zalpha should run");

    assert_eq!(output.status.code(), Some(124));
    drop(socket);
}

#[test]
fn missing_host_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_zalpha"))
        .env_remove("ZALPHA_HOST")
        .arg("battery")
        .output()
        .expect("zalpha should run");

    assert_eq!(output.status.code(), Some(2));
}
