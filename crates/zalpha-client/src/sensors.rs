//! Wheel encoders and safety flags.

use zalpha_frame::Frame;
use zalpha_transport::Transport;

use crate::client::Client;
use crate::error::Result;
use crate::layout::Command;
use crate::types::{EncoderAndSafety, EncoderCount, EncoderDistance, SafetyFlags};

impl<T: Transport> Client<T> {
    /// Zero both wheel encoders.
    pub fn reset_encoder(&mut self) -> Result<()> {
        self.acknowledge(Command::ResetEncoder, Frame::new())
    }

    /// Wheel travel since the last reset (m).
    pub fn get_encoder(&mut self) -> Result<EncoderDistance> {
        let reply = self.transact(Command::GetEncoder, Frame::new())?;
        decode_distance(&reply)
    }

    /// Encoder pulses since the last reset.
    pub fn get_raw_encoder(&mut self) -> Result<EncoderCount> {
        let reply = self.transact(Command::GetRawEncoder, Frame::new())?;
        decode_count(&reply)
    }

    pub fn get_safety_flag(&mut self) -> Result<SafetyFlags> {
        let reply = self.transact(Command::GetSafetyFlag, Frame::new())?;
        Ok(self.layout().read_safety_flags(&reply, 0)?)
    }

    /// Encoder distances and safety flags sampled in one transaction.
    pub fn get_encoder_and_safety_flag(&mut self) -> Result<EncoderAndSafety<EncoderDistance>> {
        let reply = self.transact(Command::GetEncoderAndSafetyFlag, Frame::new())?;
        Ok(EncoderAndSafety {
            encoder: decode_distance(&reply)?,
            safety: self.combined_flags(&reply)?,
        })
    }

    /// Encoder pulse counts and safety flags sampled in one transaction.
    pub fn get_raw_encoder_and_safety_flag(&mut self) -> Result<EncoderAndSafety<EncoderCount>> {
        let reply = self.transact(Command::GetRawEncoderAndSafetyFlag, Frame::new())?;
        Ok(EncoderAndSafety {
            encoder: decode_count(&reply)?,
            safety: self.combined_flags(&reply)?,
        })
    }

    fn combined_flags(&self, reply: &Frame) -> Result<SafetyFlags> {
        let layout = self.layout();
        Ok(layout.read_safety_flags(reply, layout.combined_flag_offset())?)
    }
}

fn decode_distance(reply: &Frame) -> Result<EncoderDistance> {
    Ok(EncoderDistance {
        left: reply.read(0)?,
        right: reply.read(1)?,
    })
}

fn decode_count(reply: &Frame) -> Result<EncoderCount> {
    Ok(EncoderCount {
        left: reply.read(0)?,
        right: reply.read(1)?,
    })
}

#[cfg(test)]
mod tests {
    use zalpha_frame::command::{v1, v2, RESULT_OK};

    use super::*;
    use crate::error::ClientError;
    use crate::layout::ProtocolGeneration;
    use crate::mock::{connected_client, connected_client_for, reply_with, result_reply};
    use crate::types::SafetyCondition;

    #[test]
    fn get_encoder_decodes_exactly() {
        let mut client = connected_client(vec![reply_with(v2::GET_ENCODER, |f| {
            f.write(0, 1.25f64).unwrap();
            f.write(1, -0.75f64).unwrap();
        })]);
        let encoder = client.get_encoder().unwrap();
        assert_eq!(encoder.left, 1.25);
        assert_eq!(encoder.right, -0.75);
        assert_eq!(client.transport().last_request().command(), 0xFA1C);
    }

    #[test]
    fn v1_uses_its_own_encoder_codes() {
        let mut client = connected_client_for(
            ProtocolGeneration::V1,
            vec![
                result_reply(v1::RESET_ENCODER, RESULT_OK),
                reply_with(v1::GET_ENCODER, |f| f.write(0, 3.5f64).unwrap()),
            ],
        );
        client.reset_encoder().unwrap();
        assert_eq!(client.get_encoder().unwrap().left, 3.5);
        let codes: Vec<u8> = client.transport().sent.iter().map(|raw| raw[0]).collect();
        assert_eq!(codes, vec![0x14, 0x15]);
    }

    #[test]
    fn raw_encoder_keeps_sign() {
        let mut client = connected_client(vec![reply_with(v2::GET_RAW_ENCODER, |f| {
            f.write(0, -123_456_789_012i64).unwrap();
            f.write(1, 42i64).unwrap();
        })]);
        let count = client.get_raw_encoder().unwrap();
        assert_eq!(count, EncoderCount { left: -123_456_789_012, right: 42 });
    }

    #[test]
    fn safety_flag_width_follows_generation() {
        let reply = |code| {
            reply_with(code, |f| {
                f.write::<u16, _>(0, 0x0144).unwrap();
            })
        };

        let mut v1_client = connected_client_for(
            ProtocolGeneration::V1,
            vec![reply(v1::GET_SAFETY_FLAG)],
        );
        let v1_flags = v1_client.get_safety_flag().unwrap();
        assert_eq!(v1_flags.bits(), 0x44);
        assert_eq!(v1_flags.active(), vec![SafetyCondition::Emergency]);

        let mut v2_client = connected_client(vec![reply(v2::GET_SAFETY_FLAG)]);
        let v2_flags = v2_client.get_safety_flag().unwrap();
        assert_eq!(v2_flags.bits(), 0x0144);
        assert_eq!(
            v2_flags.active(),
            vec![
                SafetyCondition::Emergency,
                SafetyCondition::ChargerConnected,
                SafetyCondition::LaserFar
            ]
        );
    }

    #[test]
    fn combined_reply_reads_flags_at_byte_16() {
        let mut client = connected_client(vec![reply_with(
            v2::GET_ENCODER_AND_SAFETY_FLAG,
            |f| {
                f.write(0, 0.5f64).unwrap();
                f.write(1, 0.25f64).unwrap();
                f.write::<u16, _>(8, 0x0401).unwrap();
            },
        )]);
        let sample = client.get_encoder_and_safety_flag().unwrap();
        assert_eq!(sample.encoder.left, 0.5);
        assert!(sample.safety.contains(SafetyCondition::BumperFront));
        assert!(sample.safety.contains(SafetyCondition::LaserNear));
    }

    #[test]
    fn raw_combined_reply() {
        let mut client = connected_client(vec![reply_with(
            v2::GET_RAW_ENCODER_AND_SAFETY_FLAG,
            |f| {
                f.write(0, 1000i64).unwrap();
                f.write(1, 1001i64).unwrap();
                f.write::<u16, _>(8, 0x0010).unwrap();
            },
        )]);
        let sample = client.get_raw_encoder_and_safety_flag().unwrap();
        assert_eq!(sample.encoder.right, 1001);
        assert_eq!(sample.safety.active(), vec![SafetyCondition::MotorFault]);
    }

    #[test]
    fn v1_has_no_raw_encoder() {
        let mut client = connected_client_for(ProtocolGeneration::V1, vec![]);
        assert!(matches!(
            client.get_raw_encoder_and_safety_flag(),
            Err(ClientError::Unsupported { .. })
        ));
    }
}
