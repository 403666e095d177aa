//! Wire messages and the stream multiplexer
//!
//! The physical stream carries oneof-tagged JSON frames: three client
//! variants in, six server variants out. Audio payload bytes travel as
//! base64 strings. The codec is stateless in both directions.

mod codec;
mod messages;

pub use codec::StreamCodec;
pub use messages::{ClientMessage, ServerMessage};
