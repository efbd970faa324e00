//! Digital inputs and outputs, bit 0 first.

use zalpha_frame::Frame;
use zalpha_transport::Transport;

use crate::client::Client;
use crate::error::Result;
use crate::layout::Command;

impl<T: Transport> Client<T> {
    pub fn get_inputs(&mut self) -> Result<u32> {
        let reply = self.transact(Command::GetInputs, Frame::new())?;
        Ok(reply.read(0)?)
    }

    /// Write `outputs` to the output bits selected by `mask`; other bits keep
    /// their state.
    pub fn set_outputs(&mut self, outputs: u32, mask: u32) -> Result<()> {
        let mut request = Frame::new();
        request.write(0, outputs)?;
        request.write(1, mask)?;
        self.acknowledge(Command::SetOutputs, request)
    }

    pub fn get_outputs(&mut self) -> Result<u32> {
        let reply = self.transact(Command::GetOutputs, Frame::new())?;
        Ok(reply.read(0)?)
    }
}
