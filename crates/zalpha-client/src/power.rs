//! Battery and charger control.

use zalpha_frame::Frame;
use zalpha_transport::Transport;

use crate::client::Client;
use crate::error::Result;
use crate::layout::Command;
use crate::types::ChargingState;

impl<T: Transport> Client<T> {
    /// Battery level in percent.
    pub fn get_battery(&mut self) -> Result<f32> {
        let reply = self.transact(Command::GetBattery, Frame::new())?;
        Ok(reply.read(0)?)
    }

    /// Activate or deactivate the charging contacts.
    pub fn set_charging(&mut self, enable: bool) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, u8::from(enable))?;
        self.acknowledge(Command::SetCharging, request)
    }

    pub fn get_charging(&mut self) -> Result<ChargingState> {
        let reply = self.transact(Command::GetCharging, Frame::new())?;
        Ok(ChargingState::from_bits(reply.read(0)?))
    }
}
