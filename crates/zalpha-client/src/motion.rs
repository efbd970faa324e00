//! Differential base control and path actions.
//!
//! Speed and acceleration commands exist in every generation. Path actions
//! (straight move, Bézier move, rotation) and their pause/resume/stop
//! controls are second-generation only; on a first-generation client they
//! fail with [`ClientError::Unsupported`](crate::ClientError::Unsupported)
//! without touching the wire.

use zalpha_frame::Frame;
use zalpha_transport::Transport;

use crate::client::Client;
use crate::error::Result;
use crate::layout::Command;
use crate::types::{Acceleration, ActionStatus, BezierPath, WheelSpeeds};

/// Payload byte carrying the laser area profile for straight moves and rotations.
const LASER_AREA_BYTE: usize = 8;
/// Payload byte carrying the laser area profile for Bézier moves.
const BEZIER_LASER_AREA_BYTE: usize = 28;

impl<T: Transport> Client<T> {
    /// Set acceleration and deceleration limits (m/s²).
    pub fn set_acceleration(&mut self, acceleration: f32, deceleration: f32) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, acceleration)?;
        request.write(1, deceleration)?;
        self.acknowledge(Command::SetAcceleration, request)
    }

    pub fn get_acceleration(&mut self) -> Result<Acceleration> {
        let reply = self.transact(Command::GetAcceleration, Frame::new())?;
        Ok(Acceleration {
            acceleration: reply.read(0)?,
            deceleration: reply.read(1)?,
        })
    }

    /// Set left and right wheel target speeds (m/s).
    ///
    /// The controller stops the wheels if the target is not refreshed
    /// periodically; callers holding a speed must resend it.
    pub fn set_target_speed(&mut self, left: f32, right: f32) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, left)?;
        request.write(1, right)?;
        self.acknowledge(Command::SetTargetSpeed, request)
    }

    pub fn get_target_speed(&mut self) -> Result<WheelSpeeds> {
        let reply = self.transact(Command::GetTargetSpeed, Frame::new())?;
        Ok(WheelSpeeds {
            left: reply.read(0)?,
            right: reply.read(1)?,
        })
    }

    /// Drive `distance` metres in a straight line at `speed` m/s.
    pub fn move_straight(&mut self, speed: f32, distance: f32, laser_area: u8) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, speed)?;
        request.write(1, distance)?;
        request.write(LASER_AREA_BYTE, laser_area)?;
        self.acknowledge(Command::MoveStraight, request)
    }

    /// Follow a cubic Bézier curve at `speed` m/s.
    pub fn move_bezier(&mut self, speed: f32, path: &BezierPath, laser_area: u8) -> Result<()> {
        let mut request = Frame::new();
        let fields = [
            speed,
            path.end.x,
            path.end.y,
            path.cp1.x,
            path.cp1.y,
            path.cp2.x,
            path.cp2.y,
        ];
        for (index, value) in fields.into_iter().enumerate() {
            request.write(index, value)?;
        }
        request.write(BEZIER_LASER_AREA_BYTE, laser_area)?;
        self.acknowledge(Command::MoveBezier, request)
    }

    /// Rotate in place by `angle` radians at `speed` rad/s.
    pub fn rotate(&mut self, speed: f32, angle: f32, laser_area: u8) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, speed)?;
        request.write(1, angle)?;
        request.write(LASER_AREA_BYTE, laser_area)?;
        self.acknowledge(Command::Rotate, request)
    }

    pub fn get_action_status(&mut self) -> Result<ActionStatus> {
        let reply = self.transact(Command::GetActionStatus, Frame::new())?;
        Ok(ActionStatus::from_byte(reply.read(0)?)?)
    }

    pub fn pause_action(&mut self) -> Result<()> {
        self.acknowledge(Command::PauseAction, Frame::new())
    }

    pub fn resume_action(&mut self) -> Result<()> {
        self.acknowledge(Command::ResumeAction, Frame::new())
    }

    pub fn stop_action(&mut self) -> Result<()> {
        self.acknowledge(Command::StopAction, Frame::new())
    }
}
