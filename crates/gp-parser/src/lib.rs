//! Transcript parsing for GLaMpress.
//!
//! Turns exported chat text into a [`Transcript`] of dated message groups.
//! Lines that do not match the message pattern extend the previous message;
//! system notices are filtered out.

pub mod junk;
pub mod normalize;
pub mod traits;
pub mod transcript;

pub use gp_core::Transcript;
pub use junk::JunkFilter;
pub use normalize::{normalize_line, split_lines};
pub use traits::TranscriptParser;
pub use transcript::{match_message_line, ChatExportParser, MessageLine, ParseStats};

#[cfg(test)]
mod tests;
