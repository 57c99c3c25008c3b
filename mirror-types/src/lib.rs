#![deny(missing_docs)]
//! Core types for Mind Mirror.
//!
//! Transcript messages, control flags, the two extraction artifacts
//! ([`SummaryRecord`], [`MindMapRecord`]), the shared [`ChatError`], and the
//! explicit [`Conversation`] state machine owned by the calling context.

pub mod conversation;
pub mod error;
pub mod types;

pub use conversation::{Conversation, MIN_ARTIFACT_MESSAGES, Phase, TurnRequest, View};
pub use error::{ChatError, ConversationError};
pub use types::*;
