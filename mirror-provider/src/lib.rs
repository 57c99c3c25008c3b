#![deny(missing_docs)]
//! Network side of Mind Mirror.
//!
//! [`MirrorClient`] speaks either an OpenAI-compatible chat-completions
//! dialect or the Anthropic Messages dialect, chosen from the credential.
//! It runs streaming chat turns through the incremental [`FrameDecoder`]
//! into a [`ChatSink`], and non-streaming structured extraction into
//! [`SummaryRecord`](mirror_types::SummaryRecord) and
//! [`MindMapRecord`](mirror_types::MindMapRecord).
//!
//! [`run_turn`] ties one turn to a [`Conversation`](mirror_types::Conversation).

pub mod client;
pub mod config;
pub mod decoder;
pub(crate) mod error;
pub mod extraction;
pub mod mode;
pub mod streaming;
pub mod turn;

pub use client::MirrorClient;
pub use config::ClientConfig;
pub use decoder::{FrameDecoder, Frames};
pub use extraction::{parse_mind_map, parse_summary, recover_json};
pub use mode::ProviderMode;
pub use streaming::{CallbackSink, ChatSink, DeltaStream};
pub use turn::run_turn;

// Re-export mirror-types for convenience
pub use mirror_types::ChatError;
