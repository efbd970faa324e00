use zalpha_client::{SafetyCondition, SafetyFlags};

use crate::cmd::{EncoderArgs, SafetyArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Report};

pub fn encoder(args: EncoderArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;
    if args.reset {
        client
            .reset_encoder()
            .map_err(|err| client_error("encoder reset failed", err))?;
        Report::new().field("reset", true).print(format);
        return Ok(SUCCESS);
    }

    let report = if args.raw {
        let count = client
            .get_raw_encoder()
            .map_err(|err| client_error("raw encoder query failed", err))?;
        Report::new()
            .field("left_pulses", count.left)
            .field("right_pulses", count.right)
    } else {
        let distance = client
            .get_encoder()
            .map_err(|err| client_error("encoder query failed", err))?;
        Report::new()
            .field("left_m", distance.left)
            .field("right_m", distance.right)
    };
    report.print(format);
    Ok(SUCCESS)
}

pub fn safety(args: SafetyArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = args.connect.connect()?;

    let report = match (args.with_encoder, args.raw) {
        (false, _) => {
            let flags = client
                .get_safety_flag()
                .map_err(|err| client_error("safety flag query failed", err))?;
            safety_report(Report::new(), &flags)
        }
        (true, false) => {
            let sample = client
                .get_encoder_and_safety_flag()
                .map_err(|err| client_error("encoder and safety query failed", err))?;
            let report = Report::new()
                .field("left_m", sample.encoder.left)
                .field("right_m", sample.encoder.right);
            safety_report(report, &sample.safety)
        }
        (true, true) => {
            let sample = client
                .get_raw_encoder_and_safety_flag()
                .map_err(|err| client_error("raw encoder and safety query failed", err))?;
            let report = Report::new()
                .field("left_pulses", sample.encoder.left)
                .field("right_pulses", sample.encoder.right);
            safety_report(report, &sample.safety)
        }
    };
    report.print(format);
    Ok(SUCCESS)
}

fn safety_report(report: Report, flags: &SafetyFlags) -> Report {
    let active = flags.active();
    let (critical, other): (Vec<SafetyCondition>, Vec<SafetyCondition>) =
        active.into_iter().partition(|c| c.is_critical());
    report
        .field_with("flags", flags.bits(), format!("{:#06X}", flags.bits()))
        .field_with("critical", &critical, describe(&critical))
        .field_with("non_critical", &other, describe(&other))
}

fn describe(conditions: &[SafetyCondition]) -> String {
    if conditions.is_empty() {
        return "none".to_string();
    }
    conditions
        .iter()
        .map(|c| c.description())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use zalpha_client::ProtocolGeneration;

    use super::*;

    #[test]
    fn safety_report_splits_critical_conditions() {
        let flags = SafetyFlags::new(0x0105, ProtocolGeneration::V2);
        let json = safety_report(Report::new(), &flags).render(OutputFormat::Json);
        assert_eq!(
            json,
            r#"{"critical":["bumper_front","emergency"],"flags":261,"non_critical":["laser_far"]}"#
        );
    }

    #[test]
    fn describe_empty_is_none() {
        assert_eq!(describe(&[]), "none");
        assert_eq!(
            describe(&[SafetyCondition::MotorFault, SafetyCondition::LaserNear]),
            "motor fault, laser near area blocked"
        );
    }
}
