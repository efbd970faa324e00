//! Command and result codes.
//!
//! Requests and replies share one 16-bit code space. Request codes are
//! grouped by category (`0xFA0x` general, `0xFA1x` differential base,
//! `0xFA3x` safety, `0xFA4x` power, `0xFA5x` I/O). Codes in `0xF9xx` only
//! ever appear as result values inside reply payloads.
//!
//! Two protocol generations are deployed. Codes shared by both live at the
//! top of this module; [`v1`] and [`v2`] each re-export the shared codes and
//! add their own, so either module is a complete command table.

/// Query the API server version string.
pub const VERSION_INFO: u16 = 0xFA00;

/// Set acceleration and deceleration (m/s²).
pub const SET_ACCELERATION: u16 = 0xFA10;
/// Read acceleration and deceleration.
pub const GET_ACCELERATION: u16 = 0xFA11;
/// Set left/right wheel target speeds (m/s).
pub const SET_TARGET_SPEED: u16 = 0xFA12;
/// Read left/right wheel target speeds.
pub const GET_TARGET_SPEED: u16 = 0xFA13;

/// Read the safety flag bitfield.
pub const GET_SAFETY_FLAG: u16 = 0xFA30;
/// Read encoder distances and the safety flag bitfield in one reply.
pub const GET_ENCODER_AND_SAFETY_FLAG: u16 = 0xFA31;

/// Read battery percentage.
pub const GET_BATTERY: u16 = 0xFA40;
/// Activate or deactivate charging.
pub const SET_CHARGING: u16 = 0xFA41;
/// Read the charging state bitfield.
pub const GET_CHARGING: u16 = 0xFA42;

/// Read digital inputs.
pub const GET_INPUTS: u16 = 0xFA50;
/// Write digital outputs under a mask.
pub const SET_OUTPUTS: u16 = 0xFA51;
/// Read digital outputs.
pub const GET_OUTPUTS: u16 = 0xFA52;

/// Request accepted.
pub const RESULT_OK: u16 = 0xF900;
/// First-generation generic rejection.
pub const RESULT_ERROR: u16 = 0xF901;
/// Request parameters rejected.
pub const RESULT_ERROR_INVALID_COMMAND: u16 = 0xF901;
/// Device busy, request rejected.
pub const RESULT_ERROR_BUSY: u16 = 0xF902;

/// First-generation command table: differential base, 8-bit safety flags.
pub mod v1 {
    pub use super::{
        GET_ACCELERATION, GET_BATTERY, GET_CHARGING, GET_ENCODER_AND_SAFETY_FLAG, GET_INPUTS,
        GET_OUTPUTS, GET_SAFETY_FLAG, GET_TARGET_SPEED, SET_ACCELERATION, SET_CHARGING,
        SET_OUTPUTS, SET_TARGET_SPEED, VERSION_INFO,
    };

    /// Zero both encoders.
    pub const RESET_ENCODER: u16 = 0xFA14;
    /// Read encoder distances (m).
    pub const GET_ENCODER: u16 = 0xFA15;
}

/// Second-generation command table: path actions, raw encoders, 16-bit
/// safety flags.
pub mod v2 {
    pub use super::{
        GET_ACCELERATION, GET_BATTERY, GET_CHARGING, GET_ENCODER_AND_SAFETY_FLAG, GET_INPUTS,
        GET_OUTPUTS, GET_SAFETY_FLAG, GET_TARGET_SPEED, SET_ACCELERATION, SET_CHARGING,
        SET_OUTPUTS, SET_TARGET_SPEED, VERSION_INFO,
    };

    /// Start a straight-line move.
    pub const MOVE_STRAIGHT: u16 = 0xFA14;
    /// Start a cubic Bézier move.
    pub const MOVE_BEZIER: u16 = 0xFA15;
    /// Start an in-place rotation.
    pub const ROTATE: u16 = 0xFA16;
    /// Read the status of the current action.
    pub const GET_ACTION_STATUS: u16 = 0xFA17;
    /// Pause the current action.
    pub const PAUSE_ACTION: u16 = 0xFA18;
    /// Resume a paused action.
    pub const RESUME_ACTION: u16 = 0xFA19;
    /// Abort the current action.
    pub const STOP_ACTION: u16 = 0xFA1A;
    /// Zero both encoders.
    pub const RESET_ENCODER: u16 = 0xFA1B;
    /// Read encoder distances (m).
    pub const GET_ENCODER: u16 = 0xFA1C;
    /// Read encoder pulse counts.
    pub const GET_RAW_ENCODER: u16 = 0xFA1D;
    /// Read encoder pulse counts and the safety flag bitfield in one reply.
    pub const GET_RAW_ENCODER_AND_SAFETY_FLAG: u16 = 0xFA32;
}

/// Coarse grouping of a code for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Motion,
    Safety,
    Power,
    Io,
    Result,
    Unknown,
}

impl Category {
    /// Lower-case name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Motion => "motion",
            Category::Safety => "safety",
            Category::Power => "power",
            Category::Io => "io",
            Category::Result => "result",
            Category::Unknown => "unknown",
        }
    }
}

/// Classify a code by its range.
pub fn category(code: u16) -> Category {
    match code {
        0xFA00..=0xFA0F => Category::General,
        0xFA10..=0xFA2F => Category::Motion,
        0xFA30..=0xFA3F => Category::Safety,
        0xFA40..=0xFA4F => Category::Power,
        0xFA50..=0xFA5F => Category::Io,
        0xF900..=0xF9FF => Category::Result,
        _ => Category::Unknown,
    }
}

/// Returns true if the code lives in the reply-only result namespace.
pub fn is_result_code(code: u16) -> bool {
    category(code) == Category::Result
}
