use crate::cmd::{ConnectArgs, OutputsArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{format_bits, OutputFormat, Report};

pub fn inputs(args: ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect()?;
    let inputs = client
        .get_inputs()
        .map_err(|err| client_error("inputs query failed", err))?;
    Report::new()
        .field_with("inputs", inputs, format_bits(inputs))
        .print(format);
    Ok(SUCCESS)
}

pub fn outputs(args: OutputsArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    if let Some(value) = args.set {
        let mask = args.mask.unwrap_or(u32::MAX);
        client
            .set_outputs(value, mask)
            .map_err(|err| client_error("set outputs failed", err))?;
    }

    let outputs = client
        .get_outputs()
        .map_err(|err| client_error("outputs query failed", err))?;
    Report::new()
        .field_with("outputs", outputs, format_bits(outputs))
        .print(format);
    Ok(SUCCESS)
}
