use zalpha_client::LIBRARY_VERSION;

use crate::cmd::ConnectArgs;
use crate::exit::{client_error, CliResult, FAILURE, SUCCESS};
use crate::output::{OutputFormat, Report};

pub fn run(args: ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect()?;
    let (server, compatible) = client
        .check_compatibility()
        .map_err(|err| client_error("version query failed", err))?;

    let endpoint = client.endpoint().map(|e| e.url()).unwrap_or_default();
    Report::new()
        .field("endpoint", endpoint)
        .field("generation", client.generation().as_str())
        .field("server_version", server.to_string())
        .field("library_version", LIBRARY_VERSION)
        .field_with(
            "compatible",
            compatible,
            if compatible { "compatible" } else { "incompatible" },
        )
        .print(format);

    client.disconnect();
    Ok(if compatible { SUCCESS } else { FAILURE })
}
