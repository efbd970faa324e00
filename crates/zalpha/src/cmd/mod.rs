use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use zalpha_client::{ClientConfig, ProtocolGeneration, ZmqClient};
use zalpha_transport::DEFAULT_PORT;

use crate::exit::{client_error, CliResult};
use crate::output::OutputFormat;

pub mod bench;
pub mod info;
pub mod io;
pub mod motion;
pub mod power;
pub mod sensors;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show library version information.
    Version(VersionArgs),
    /// Query the API server version and check compatibility.
    Info(ConnectArgs),
    /// Read or set acceleration limits.
    Accel(AccelArgs),
    /// Read or set wheel target speeds.
    Speed(SpeedArgs),
    /// Hold a wheel speed for a while, then stop.
    Drive(DriveArgs),
    /// Start a straight-line move.
    Straight(StraightArgs),
    /// Start a cubic Bézier move.
    Bezier(BezierArgs),
    /// Start an in-place rotation.
    Rotate(RotateArgs),
    /// Query or control the current action.
    Action(ActionArgs),
    /// Read or reset the wheel encoders.
    Encoder(EncoderArgs),
    /// Read the safety flags.
    Safety(SafetyArgs),
    /// Read the battery level.
    Battery(ConnectArgs),
    /// Read or switch the charger.
    Charging(ChargingArgs),
    /// Read the digital inputs.
    Inputs(ConnectArgs),
    /// Read or write the digital outputs.
    Outputs(OutputsArgs),
    /// Measure round-trip throughput.
    Bench(BenchArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Version(args) => version::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Accel(args) => motion::accel(args, format),
        Command::Speed(args) => motion::speed(args, format),
        Command::Drive(args) => motion::drive(args, format),
        Command::Straight(args) => motion::straight(args, format),
        Command::Bezier(args) => motion::bezier(args, format),
        Command::Rotate(args) => motion::rotate(args, format),
        Command::Action(args) => motion::action(args, format),
        Command::Encoder(args) => sensors::encoder(args, format),
        Command::Safety(args) => sensors::safety(args, format),
        Command::Battery(args) => power::battery(args, format),
        Command::Charging(args) => power::charging(args, format),
        Command::Inputs(args) => io::inputs(args, format),
        Command::Outputs(args) => io::outputs(args, format),
        Command::Bench(args) => bench::run(args, format),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Generation {
    V1,
    V2,
}

impl From<Generation> for ProtocolGeneration {
    fn from(generation: Generation) -> Self {
        match generation {
            Generation::V1 => ProtocolGeneration::V1,
            Generation::V2 => ProtocolGeneration::V2,
        }
    }
}

/// Where and how to reach the API server.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// API server host name or address.
    #[arg(long, short = 'H', env = "ZALPHA_HOST")]
    pub host: String,
    /// API server port.
    #[arg(long, env = "ZALPHA_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Protocol generation spoken by the server.
    #[arg(long, env = "ZALPHA_GENERATION", value_enum, default_value = "v2")]
    pub generation: Generation,
    /// Reply timeout (e.g. 5s, 500ms). Blocks indefinitely when unset.
    #[arg(long, env = "ZALPHA_TIMEOUT", value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

impl ConnectArgs {
    pub fn config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_port(self.port)
            .with_generation(self.generation.into());
        match self.timeout {
            Some(timeout) => config.with_recv_timeout(timeout).with_send_timeout(timeout),
            None => config,
        }
    }

    /// Create a client and connect it.
    pub fn connect(&self) -> CliResult<ZmqClient> {
        self.connect_with(self.config())
    }

    /// Create a client from `config` and connect it.
    pub fn connect_with(&self, config: ClientConfig) -> CliResult<ZmqClient> {
        let mut client = ZmqClient::with_config(config)
            .map_err(|err| client_error("client setup failed", err))?;
        client
            .connect(&self.host)
            .map_err(|err| client_error("connect failed", err))?;
        Ok(client)
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug)]
pub struct AccelArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Set acceleration and deceleration (m/s²) instead of reading them.
    #[arg(long, num_args = 2, value_names = ["ACC", "DEC"], allow_negative_numbers = true)]
    pub set: Option<Vec<f32>>,
}

#[derive(Args, Debug)]
pub struct SpeedArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Set left and right target speeds (m/s) instead of reading them.
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"], allow_negative_numbers = true)]
    pub set: Option<Vec<f32>>,
}

#[derive(Args, Debug)]
pub struct DriveArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Left wheel speed (m/s).
    #[arg(allow_negative_numbers = true)]
    pub left: f32,
    /// Right wheel speed (m/s).
    #[arg(allow_negative_numbers = true)]
    pub right: f32,
    /// How long to hold the speed (e.g. 3s, 500ms).
    #[arg(long, default_value = "3s", value_parser = parse_duration)]
    pub duration: Duration,
    /// Interval between speed refreshes (e.g. 10ms).
    #[arg(long, default_value = "10ms", value_parser = parse_duration)]
    pub interval: Duration,
}

#[derive(Args, Debug)]
pub struct StraightArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Travel speed (m/s).
    pub speed: f32,
    /// Distance to travel (m); negative drives backwards.
    #[arg(allow_negative_numbers = true)]
    pub distance: f32,
    /// Laser area profile to apply during the move.
    #[arg(long, default_value_t = 1)]
    pub laser_area: u8,
}

#[derive(Args, Debug)]
pub struct BezierArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Travel speed (m/s).
    pub speed: f32,
    /// End point as X Y (m).
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true, required = true)]
    pub end: Vec<f32>,
    /// First control point as X Y (m).
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true, required = true)]
    pub cp1: Vec<f32>,
    /// Second control point as X Y (m).
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true, required = true)]
    pub cp2: Vec<f32>,
    /// Laser area profile to apply during the move.
    #[arg(long, default_value_t = 1)]
    pub laser_area: u8,
}

#[derive(Args, Debug)]
pub struct RotateArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Angular speed (rad/s).
    pub speed: f32,
    /// Rotation angle in degrees; positive is counter-clockwise.
    #[arg(allow_negative_numbers = true)]
    pub degrees: f32,
    /// Laser area profile to apply during the rotation.
    #[arg(long, default_value_t = 1)]
    pub laser_area: u8,
}

#[derive(Args, Debug)]
pub struct ActionArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    #[arg(value_enum, default_value = "status")]
    pub op: ActionOp,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ActionOp {
    Status,
    Pause,
    Resume,
    Stop,
}

#[derive(Args, Debug)]
pub struct EncoderArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Report pulse counts instead of distances.
    #[arg(long)]
    pub raw: bool,
    /// Zero both encoders instead of reading them.
    #[arg(long, conflicts_with = "raw")]
    pub reset: bool,
}

#[derive(Args, Debug)]
pub struct SafetyArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Sample encoders in the same transaction.
    #[arg(long)]
    pub with_encoder: bool,
    /// With --with-encoder, report pulse counts instead of distances.
    #[arg(long, requires = "with_encoder")]
    pub raw: bool,
}

#[derive(Args, Debug)]
pub struct ChargingArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Activate charging.
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,
    /// Deactivate charging.
    #[arg(long)]
    pub disable: bool,
}

#[derive(Args, Debug)]
pub struct OutputsArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Output bits to write (decimal, 0x hex or 0b binary).
    #[arg(long, value_parser = parse_u32)]
    pub set: Option<u32>,
    /// Bits affected by --set. Defaults to all bits.
    #[arg(long, value_parser = parse_u32, requires = "set")]
    pub mask: Option<u32>,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
    /// Number of request cycles.
    #[arg(long, default_value_t = 1000)]
    pub cycles: u32,
}

/// Parse `500ms`, `5s` or bare seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration value: {input}"))?;
    if value == 0 {
        return Err("duration must be greater than zero".to_string());
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}

/// Parse a 32-bit word given in decimal, `0x` hex or `0b` binary.
pub fn parse_u32(input: &str) -> Result<u32, String> {
    let input = input.trim().replace('_', "");
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = input.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else {
        input.parse()
    };
    parsed.map_err(|err| format!("invalid 32-bit value '{input}': {err}"))
}
