//! Per-generation protocol layout.
//!
//! Everything that differs between deployed protocol generations lives in a
//! [`ProtocolLayout`]: which commands exist and their codes, how wide the
//! safety flag field is and what each bit means, where the flag field sits
//! in combined encoder replies, and which result codes mean what. A client
//! picks its layout once, at construction.

use std::fmt;

use zalpha_frame::command::{self, v1, v2};
use zalpha_frame::Frame;

use crate::error::RejectReason;
use crate::types::{SafetyCondition, SafetyFlags};

/// Deployed protocol generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolGeneration {
    /// Differential base only, 8-bit safety flags.
    V1,
    /// Path actions and raw encoders, 16-bit safety flags.
    #[default]
    V2,
}

impl ProtocolGeneration {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolGeneration::V1 => "v1",
            ProtocolGeneration::V2 => "v2",
        }
    }

    /// The layout descriptor for this generation.
    pub fn layout(self) -> &'static ProtocolLayout {
        match self {
            ProtocolGeneration::V1 => &V1_LAYOUT,
            ProtocolGeneration::V2 => &V2_LAYOUT,
        }
    }
}

impl fmt::Display for ProtocolGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical API command, independent of its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    VersionInfo,
    SetAcceleration,
    GetAcceleration,
    SetTargetSpeed,
    GetTargetSpeed,
    MoveStraight,
    MoveBezier,
    Rotate,
    GetActionStatus,
    PauseAction,
    ResumeAction,
    StopAction,
    ResetEncoder,
    GetEncoder,
    GetRawEncoder,
    GetSafetyFlag,
    GetEncoderAndSafetyFlag,
    GetRawEncoderAndSafetyFlag,
    GetBattery,
    SetCharging,
    GetCharging,
    GetInputs,
    SetOutputs,
    GetOutputs,
}

impl Command {
    /// Wire-style name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Command::VersionInfo => "VERSION_INFO",
            Command::SetAcceleration => "SET_ACCELERATION",
            Command::GetAcceleration => "GET_ACCELERATION",
            Command::SetTargetSpeed => "SET_TARGET_SPEED",
            Command::GetTargetSpeed => "GET_TARGET_SPEED",
            Command::MoveStraight => "MOVE_STRAIGHT",
            Command::MoveBezier => "MOVE_BEZIER",
            Command::Rotate => "ROTATE",
            Command::GetActionStatus => "GET_ACTION_STATUS",
            Command::PauseAction => "PAUSE_ACTION",
            Command::ResumeAction => "RESUME_ACTION",
            Command::StopAction => "STOP_ACTION",
            Command::ResetEncoder => "RESET_ENCODER",
            Command::GetEncoder => "GET_ENCODER",
            Command::GetRawEncoder => "GET_RAW_ENCODER",
            Command::GetSafetyFlag => "GET_SAFETY_FLAG",
            Command::GetEncoderAndSafetyFlag => "GET_ENCODER_AND_SAFETY_FLAG",
            Command::GetRawEncoderAndSafetyFlag => "GET_RAW_ENCODER_AND_SAFETY_FLAG",
            Command::GetBattery => "GET_BATTERY",
            Command::SetCharging => "SET_CHARGING",
            Command::GetCharging => "GET_CHARGING",
            Command::GetInputs => "GET_INPUTS",
            Command::SetOutputs => "SET_OUTPUTS",
            Command::GetOutputs => "GET_OUTPUTS",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width of the safety flag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagWidth {
    U8,
    U16,
}

impl FlagWidth {
    /// Field size in bytes.
    pub fn size(self) -> usize {
        match self {
            FlagWidth::U8 => 1,
            FlagWidth::U16 => 2,
        }
    }
}

/// Decoded meaning of a reply result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Rejected(RejectReason),
    Unknown(u16),
}

/// Static description of one protocol generation.
#[derive(Debug)]
pub struct ProtocolLayout {
    generation: ProtocolGeneration,
    commands: &'static [(Command, u16)],
    flag_width: FlagWidth,
    safety_bits: &'static [(SafetyCondition, u16)],
    combined_flag_offset: usize,
    rejections: &'static [(u16, RejectReason)],
}

impl ProtocolLayout {
    pub fn generation(&self) -> ProtocolGeneration {
        self.generation
    }

    /// Wire code for `command`, or `None` if this generation lacks it.
    pub fn code(&self, command: Command) -> Option<u16> {
        self.commands
            .iter()
            .find(|(c, _)| *c == command)
            .map(|&(_, code)| code)
    }

    pub fn supports(&self, command: Command) -> bool {
        self.code(command).is_some()
    }

    /// Reverse lookup of a wire code.
    pub fn command_for_code(&self, code: u16) -> Option<Command> {
        self.commands
            .iter()
            .find(|(_, c)| *c == code)
            .map(|&(command, _)| command)
    }

    /// Every command this generation carries, in table order.
    pub fn commands(&self) -> impl Iterator<Item = (Command, u16)> + '_ {
        self.commands.iter().copied()
    }

    pub fn flag_width(&self) -> FlagWidth {
        self.flag_width
    }

    /// Payload byte offset of the flag field in combined encoder replies.
    pub fn combined_flag_offset(&self) -> usize {
        self.combined_flag_offset
    }

    /// Bit mask for `condition`, or `None` if this generation cannot report it.
    pub fn safety_mask(&self, condition: SafetyCondition) -> Option<u16> {
        self.safety_bits
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|&(_, mask)| mask)
    }

    /// Conditions this generation reports, lowest bit first.
    pub fn safety_conditions(&self) -> impl Iterator<Item = (SafetyCondition, u16)> + '_ {
        self.safety_bits.iter().copied()
    }

    /// Interpret a reply result code.
    pub fn decode_result(&self, code: u16) -> ResultCode {
        if code == command::RESULT_OK {
            return ResultCode::Ok;
        }
        self.rejections
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(ResultCode::Unknown(code), |&(_, reason)| {
                ResultCode::Rejected(reason)
            })
    }

    /// Read the safety flag field starting at payload byte `offset`.
    ///
    /// `offset` need not be aligned to the flag width.
    pub fn read_safety_flags(&self, frame: &Frame, offset: usize) -> zalpha_frame::Result<SafetyFlags> {
        let bits = match self.flag_width {
            FlagWidth::U8 => u16::from(frame.read::<u8, _>(offset)?),
            FlagWidth::U16 => {
                let low = frame.read::<u8, _>(offset)?;
                let high = frame.read::<u8, _>(offset.saturating_add(1))?;
                u16::from_le_bytes([low, high])
            }
        };
        Ok(SafetyFlags::new(bits, self.generation))
    }
}

static V1_COMMANDS: [(Command, u16); 15] = [
    (Command::VersionInfo, v1::VERSION_INFO),
    (Command::SetAcceleration, v1::SET_ACCELERATION),
    (Command::GetAcceleration, v1::GET_ACCELERATION),
    (Command::SetTargetSpeed, v1::SET_TARGET_SPEED),
    (Command::GetTargetSpeed, v1::GET_TARGET_SPEED),
    (Command::ResetEncoder, v1::RESET_ENCODER),
    (Command::GetEncoder, v1::GET_ENCODER),
    (Command::GetSafetyFlag, v1::GET_SAFETY_FLAG),
    (Command::GetEncoderAndSafetyFlag, v1::GET_ENCODER_AND_SAFETY_FLAG),
    (Command::GetBattery, v1::GET_BATTERY),
    (Command::SetCharging, v1::SET_CHARGING),
    (Command::GetCharging, v1::GET_CHARGING),
    (Command::GetInputs, v1::GET_INPUTS),
    (Command::SetOutputs, v1::SET_OUTPUTS),
    (Command::GetOutputs, v1::GET_OUTPUTS),
];

static V2_COMMANDS: [(Command, u16); 24] = [
    (Command::VersionInfo, v2::VERSION_INFO),
    (Command::SetAcceleration, v2::SET_ACCELERATION),
    (Command::GetAcceleration, v2::GET_ACCELERATION),
    (Command::SetTargetSpeed, v2::SET_TARGET_SPEED),
    (Command::GetTargetSpeed, v2::GET_TARGET_SPEED),
    (Command::MoveStraight, v2::MOVE_STRAIGHT),
    (Command::MoveBezier, v2::MOVE_BEZIER),
    (Command::Rotate, v2::ROTATE),
    (Command::GetActionStatus, v2::GET_ACTION_STATUS),
    (Command::PauseAction, v2::PAUSE_ACTION),
    (Command::ResumeAction, v2::RESUME_ACTION),
    (Command::StopAction, v2::STOP_ACTION),
    (Command::ResetEncoder, v2::RESET_ENCODER),
    (Command::GetEncoder, v2::GET_ENCODER),
    (Command::GetRawEncoder, v2::GET_RAW_ENCODER),
    (Command::GetSafetyFlag, v2::GET_SAFETY_FLAG),
    (Command::GetEncoderAndSafetyFlag, v2::GET_ENCODER_AND_SAFETY_FLAG),
    (Command::GetRawEncoderAndSafetyFlag, v2::GET_RAW_ENCODER_AND_SAFETY_FLAG),
    (Command::GetBattery, v2::GET_BATTERY),
    (Command::SetCharging, v2::SET_CHARGING),
    (Command::GetCharging, v2::GET_CHARGING),
    (Command::GetInputs, v2::GET_INPUTS),
    (Command::SetOutputs, v2::SET_OUTPUTS),
    (Command::GetOutputs, v2::GET_OUTPUTS),
];

static V1_SAFETY_BITS: [(SafetyCondition, u16); 5] = [
    (SafetyCondition::BumperFront, 0x01),
    (SafetyCondition::BumperRear, 0x02),
    (SafetyCondition::Emergency, 0x04),
    (SafetyCondition::ExternalInput, 0x08),
    (SafetyCondition::ChargerConnected, 0x20),
];

static V2_SAFETY_BITS: [(SafetyCondition, u16); 11] = [
    (SafetyCondition::BumperFront, 0x0001),
    (SafetyCondition::BumperRear, 0x0002),
    (SafetyCondition::Emergency, 0x0004),
    (SafetyCondition::ExternalInput, 0x0008),
    (SafetyCondition::MotorFault, 0x0010),
    (SafetyCondition::WheelSlippage, 0x0020),
    (SafetyCondition::ChargerConnected, 0x0040),
    (SafetyCondition::LaserFar, 0x0100),
    (SafetyCondition::LaserMiddle, 0x0200),
    (SafetyCondition::LaserNear, 0x0400),
    (SafetyCondition::LaserMalfunction, 0x0800),
];

/// First-generation layout.
pub static V1_LAYOUT: ProtocolLayout = ProtocolLayout {
    generation: ProtocolGeneration::V1,
    commands: &V1_COMMANDS,
    flag_width: FlagWidth::U8,
    safety_bits: &V1_SAFETY_BITS,
    combined_flag_offset: 16,
    rejections: &[(command::RESULT_ERROR, RejectReason::Error)],
};

/// Second-generation layout.
pub static V2_LAYOUT: ProtocolLayout = ProtocolLayout {
    generation: ProtocolGeneration::V2,
    commands: &V2_COMMANDS,
    flag_width: FlagWidth::U16,
    safety_bits: &V2_SAFETY_BITS,
    combined_flag_offset: 16,
    rejections: &[
        (command::RESULT_ERROR_INVALID_COMMAND, RejectReason::InvalidParameters),
        (command::RESULT_ERROR_BUSY, RejectReason::Busy),
    ],
};
