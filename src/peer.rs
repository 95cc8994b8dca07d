//! Scripted engine peer
//!
//! Plays the far end of the serial link in simulations and tests. It
//! decodes the controller's frames, acknowledges them, and answers each
//! one with the next canned reply from its script. Muting it turns off
//! acknowledgements entirely, which is how retransmission behavior gets
//! exercised.

use std::collections::VecDeque;

use tracing::debug;

use wire_protocol::{FrameParser, Message, ACK_BYTE};

use crate::hal::sim::SimSerialPort;
use crate::hal::SerialPort;

pub struct ScriptedEngine {
    port: SimSerialPort,
    parser: FrameParser,
    replies: VecDeque<Vec<Message>>,
    /// Every frame the controller has sent us, in order
    pub received: Vec<Message>,
    /// Bare acknowledgements the controller sent for our frames
    pub acks_seen: u32,
    /// While muted, inbound frames are recorded but never acknowledged
    /// or answered
    pub mute: bool,
}

impl ScriptedEngine {
    pub fn new(port: SimSerialPort) -> ScriptedEngine {
        ScriptedEngine {
            port,
            parser: FrameParser::new(),
            replies: VecDeque::new(),
            received: Vec::new(),
            acks_seen: 0,
            mute: false,
        }
    }

    /// Queue the messages to send back when the next frame arrives. An
    /// empty entry means acknowledge only.
    pub fn reply_with(&mut self, messages: Vec<Message>) {
        self.replies.push_back(messages);
    }

    /// Send frames unprompted, the way the engine opens when it has white
    pub fn send_now(&mut self, messages: &[Message]) {
        for message in messages {
            self.port.write(&message.encode());
        }
    }

    /// Put raw bytes on the wire, corruption and all
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.port.write(bytes);
    }

    /// Drain the link and respond per the script
    pub fn poll(&mut self) {
        while let Some(byte) = self.port.read_byte() {
            if self.parser.is_idle() && byte == ACK_BYTE {
                self.acks_seen += 1;
                continue;
            }
            match self.parser.push_byte(byte) {
                Ok(Some(message)) => {
                    debug!(?message, "engine received frame");
                    self.received.push(message);
                    if self.mute {
                        continue;
                    }
                    self.port.write(&[ACK_BYTE]);
                    if let Some(replies) = self.replies.pop_front() {
                        for reply in replies {
                            self.port.write(&reply.encode());
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => debug!(%err, "engine dropped a frame"),
            }
        }
    }

    /// Frames received so far of one instruction, for assertions
    pub fn received_count(&self) -> usize {
        self.received.len()
    }
}
