use zalpha_client::LIBRARY_VERSION;
use zalpha_transport::DEFAULT_PORT;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{OutputFormat, Report};

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("zalpha {LIBRARY_VERSION}");
        return Ok(SUCCESS);
    }

    Report::new()
        .field("name", "zalpha")
        .field("version", LIBRARY_VERSION)
        .field("target", option_env!("ZALPHA_BUILD_TARGET").unwrap_or("unknown"))
        .field("profile", option_env!("ZALPHA_BUILD_PROFILE").unwrap_or("unknown"))
        .field("target_os", std::env::consts::OS)
        .field("target_arch", std::env::consts::ARCH)
        .field("default_port", DEFAULT_PORT)
        .field("transport", if cfg!(feature = "zmq") { "zmq" } else { "none" })
        .print(format);

    Ok(SUCCESS)
}
