//! Serial transport
//!
//! Owns the serial port and the frame parser, turning the raw byte stream
//! into typed messages and acknowledgements. Valid inbound frames are
//! acknowledged immediately; corrupt ones are counted and dropped, and the
//! peer's retry timer is trusted to resend them.

use std::collections::VecDeque;

use tracing::{debug, warn};

use wire_protocol::{FrameParser, Message, WireError, ACK_BYTE};

use crate::hal::SerialPort;

pub struct Transport {
    port: Box<dyn SerialPort>,
    parser: FrameParser,
    inbox: VecDeque<Message>,
    pending_acks: u32,
    /// Frames sent, including retransmissions
    pub frames_sent: u64,
    /// Retransmissions alone
    pub retransmits: u64,
    /// Inbound frames dropped for a bad checksum
    pub checksum_failures: u64,
    /// Inbound frames dropped for a malformed header or operand
    pub decode_failures: u64,
}

impl Transport {
    pub fn new(port: Box<dyn SerialPort>) -> Transport {
        Transport {
            port,
            parser: FrameParser::new(),
            inbox: VecDeque::new(),
            pending_acks: 0,
            frames_sent: 0,
            retransmits: 0,
            checksum_failures: 0,
            decode_failures: 0,
        }
    }

    /// Transmit a frame for the first time
    pub fn send(&mut self, message: &Message) {
        debug!(?message, "sending frame");
        self.port.write(&message.encode());
        self.frames_sent += 1;
    }

    /// Transmit a frame again after an acknowledgement timeout
    pub fn resend(&mut self, message: &Message) {
        warn!(?message, "no acknowledgement, retransmitting");
        self.port.write(&message.encode());
        self.frames_sent += 1;
        self.retransmits += 1;
    }

    /// Drain the receive side; decoded frames are acknowledged and queued
    pub fn poll(&mut self) {
        while let Some(byte) = self.port.read_byte() {
            if self.parser.is_idle() && byte == ACK_BYTE {
                self.pending_acks += 1;
                continue;
            }
            match self.parser.push_byte(byte) {
                Ok(None) => {}
                Ok(Some(message)) => {
                    debug!(?message, "received frame");
                    self.port.write(&[ACK_BYTE]);
                    self.inbox.push_back(message);
                }
                Err(err @ WireError::ChecksumMismatch { .. }) => {
                    warn!(%err, "dropping corrupt frame");
                    self.checksum_failures += 1;
                }
                Err(err) => {
                    warn!(%err, "dropping malformed frame");
                    self.decode_failures += 1;
                }
            }
        }
    }

    /// Take the oldest decoded message, if any
    pub fn take_message(&mut self) -> Option<Message> {
        self.inbox.pop_front()
    }

    /// Consume one pending acknowledgement
    pub fn take_ack(&mut self) -> bool {
        if self.pending_acks > 0 {
            self.pending_acks -= 1;
            true
        } else {
            false
        }
    }

    /// Forget any partial frame, queued messages, and acknowledgements
    pub fn reset(&mut self) {
        self.parser.reset();
        self.inbox.clear();
        self.pending_acks = 0;
    }
}
