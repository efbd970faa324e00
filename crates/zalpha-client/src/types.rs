//! Typed values returned by client operations.

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::Serialize;

use crate::error::ProtocolViolation;
use crate::layout::ProtocolGeneration;

/// Acceleration and deceleration limits (m/s²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Acceleration {
    pub acceleration: f32,
    pub deceleration: f32,
}

/// Left and right wheel speeds (m/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelSpeeds {
    pub left: f32,
    pub right: f32,
}

/// Accumulated wheel travel since the last encoder reset (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncoderDistance {
    pub left: f64,
    pub right: f64,
}

/// Accumulated encoder pulses since the last encoder reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderCount {
    pub left: i64,
    pub right: i64,
}

/// Encoder reading paired with the safety flags sampled in the same reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncoderAndSafety<E> {
    pub encoder: E,
    pub safety: SafetyFlags,
}

/// A point in the vehicle frame (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Cubic Bézier path from the current pose to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BezierPath {
    pub end: Point,
    pub cp1: Point,
    pub cp2: Point,
}

/// State of the motion action most recently started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Completed = 0,
    InProgress = 1,
    Paused = 2,
    SafetyTriggered = 3,
}

impl ActionStatus {
    /// Decode the status byte of an action status reply.
    pub fn from_byte(byte: u8) -> Result<Self, ProtocolViolation> {
        Self::try_from(byte).map_err(|e| ProtocolViolation::UnknownActionStatus(e.number))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Completed => "completed",
            ActionStatus::InProgress => "in progress",
            ActionStatus::Paused => "paused",
            ActionStatus::SafetyTriggered => "safety triggered",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition reported through the safety flag field.
///
/// Not every generation reports every condition; see
/// [`ProtocolLayout::safety_mask`](crate::ProtocolLayout::safety_mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCondition {
    BumperFront,
    BumperRear,
    Emergency,
    ExternalInput,
    MotorFault,
    WheelSlippage,
    ChargerConnected,
    LaserFar,
    LaserMiddle,
    LaserNear,
    LaserMalfunction,
}

impl SafetyCondition {
    pub fn description(self) -> &'static str {
        match self {
            SafetyCondition::BumperFront => "bumper front",
            SafetyCondition::BumperRear => "bumper rear",
            SafetyCondition::Emergency => "emergency button",
            SafetyCondition::ExternalInput => "external input",
            SafetyCondition::MotorFault => "motor fault",
            SafetyCondition::WheelSlippage => "wheel slippage",
            SafetyCondition::ChargerConnected => "charger connected",
            SafetyCondition::LaserFar => "laser far area blocked",
            SafetyCondition::LaserMiddle => "laser middle area blocked",
            SafetyCondition::LaserNear => "laser near area blocked",
            SafetyCondition::LaserMalfunction => "laser malfunction",
        }
    }

    /// Critical conditions stop the vehicle; laser zone conditions only slow it.
    pub fn is_critical(self) -> bool {
        !matches!(
            self,
            SafetyCondition::LaserFar
                | SafetyCondition::LaserMiddle
                | SafetyCondition::LaserNear
                | SafetyCondition::LaserMalfunction
        )
    }
}

impl fmt::Display for SafetyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Raw safety flag bits together with the generation that defines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetyFlags {
    bits: u16,
    #[serde(skip)]
    generation: ProtocolGeneration,
}

impl SafetyFlags {
    pub fn new(bits: u16, generation: ProtocolGeneration) -> Self {
        Self { bits, generation }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn generation(&self) -> ProtocolGeneration {
        self.generation
    }

    /// Returns true if `condition` is reported and its bit is set.
    pub fn contains(&self, condition: SafetyCondition) -> bool {
        self.generation
            .layout()
            .safety_mask(condition)
            .is_some_and(|mask| self.bits & mask != 0)
    }

    /// Active conditions, lowest bit first. Bits the generation does not
    /// assign are ignored.
    pub fn active(&self) -> Vec<SafetyCondition> {
        self.generation
            .layout()
            .safety_conditions()
            .filter(|&(_, mask)| self.bits & mask != 0)
            .map(|(condition, _)| condition)
            .collect()
    }

    /// Returns true if any critical condition is active.
    pub fn has_critical(&self) -> bool {
        self.active().into_iter().any(SafetyCondition::is_critical)
    }
}

/// Charger plug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlugMode {
    Auto,
    Manual,
}

/// Charging state bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargingState(u8);

impl ChargingState {
    const MANUAL_PLUG: u8 = 0x01;
    const CHARGING: u8 = 0x02;
    const BATTERY_FULL: u8 = 0x04;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn plug_mode(&self) -> PlugMode {
        if self.0 & Self::MANUAL_PLUG != 0 {
            PlugMode::Manual
        } else {
            PlugMode::Auto
        }
    }

    pub fn is_charging(&self) -> bool {
        self.0 & Self::CHARGING != 0
    }

    pub fn is_battery_full(&self) -> bool {
        self.0 & Self::BATTERY_FULL != 0
    }
}

impl Serialize for ChargingState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ChargingState", 3)?;
        state.serialize_field("plug_mode", &self.plug_mode())?;
        state.serialize_field("charging", &self.is_charging())?;
        state.serialize_field("battery_full", &self.is_battery_full())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_status_decodes_known_bytes() {
        assert_eq!(ActionStatus::from_byte(0), Ok(ActionStatus::Completed));
        assert_eq!(ActionStatus::from_byte(3), Ok(ActionStatus::SafetyTriggered));
        assert_eq!(
            ActionStatus::from_byte(4),
            Err(ProtocolViolation::UnknownActionStatus(4))
        );
    }

    #[test]
    fn same_bits_read_differently_per_generation() {
        // 0x20 is charger connected in v1 and wheel slippage in v2.
        let v1 = SafetyFlags::new(0x20, ProtocolGeneration::V1);
        let v2 = SafetyFlags::new(0x20, ProtocolGeneration::V2);
        assert_eq!(v1.active(), vec![SafetyCondition::ChargerConnected]);
        assert_eq!(v2.active(), vec![SafetyCondition::WheelSlippage]);
        assert!(!v2.contains(SafetyCondition::ChargerConnected));
    }

    #[test]
    fn v1_cannot_report_laser_conditions() {
        let flags = SafetyFlags::new(0x0F00, ProtocolGeneration::V1);
        assert!(flags.active().is_empty());
        assert!(!flags.contains(SafetyCondition::LaserNear));
    }

    #[test]
    fn laser_conditions_are_not_critical() {
        let laser = SafetyFlags::new(0x0300, ProtocolGeneration::V2);
        assert_eq!(
            laser.active(),
            vec![SafetyCondition::LaserFar, SafetyCondition::LaserMiddle]
        );
        assert!(!laser.has_critical());

        let emergency = SafetyFlags::new(0x0304, ProtocolGeneration::V2);
        assert!(emergency.has_critical());
    }

    #[test]
    fn charging_state_bits() {
        let state = ChargingState::from_bits(0x06);
        assert_eq!(state.plug_mode(), PlugMode::Auto);
        assert!(state.is_charging());
        assert!(state.is_battery_full());

        let manual = ChargingState::from_bits(0x01);
        assert_eq!(manual.plug_mode(), PlugMode::Manual);
        assert!(!manual.is_charging());
    }
}
