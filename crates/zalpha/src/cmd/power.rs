use crate::cmd::{ChargingArgs, ConnectArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Report};

pub fn battery(args: ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect()?;
    let level = client
        .get_battery()
        .map_err(|err| client_error("battery query failed", err))?;
    Report::new()
        .field_with("battery_percent", level, format!("{level:.1}%"))
        .print(format);
    Ok(SUCCESS)
}

pub fn charging(args: ChargingArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    if args.enable || args.disable {
        client
            .set_charging(args.enable)
            .map_err(|err| client_error("set charging failed", err))?;
        Report::new().field("charging", args.enable).print(format);
        return Ok(SUCCESS);
    }

    let state = client
        .get_charging()
        .map_err(|err| client_error("charging query failed", err))?;
    let plug_mode = match state.plug_mode() {
        zalpha_client::PlugMode::Auto => "auto",
        zalpha_client::PlugMode::Manual => "manual",
    };
    Report::new()
        .field("plug_mode", plug_mode)
        .field("charging", state.is_charging())
        .field("battery_full", state.is_battery_full())
        .print(format);
    Ok(SUCCESS)
}
