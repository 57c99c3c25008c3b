#![deny(missing_docs)]
//! # mirror: umbrella crate
//!
//! Single import surface for Mind Mirror. Re-exports the member crates
//! behind feature flags, plus a `prelude` for the happy path:
//!
//! - `core`: transcript types, the conversation state machine, personas and
//!   the system-prompt orchestrator.
//! - `provider`: streaming chat turns and summary / mind-map extraction.
//! - `layout`: positioned mind-map graphs.

#[cfg(feature = "layout")]
pub use mirror_layout as layout;
#[cfg(feature = "core")]
pub use mirror_prompt as prompt;
#[cfg(feature = "provider")]
pub use mirror_provider as provider;
#[cfg(feature = "core")]
pub use mirror_types as types;

/// Happy-path imports.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use mirror_types::{
        ChatError, ControlFlags, Conversation, ConversationError, Message, MindMapRecord, Phase,
        Role, SummaryRecord, View,
    };

    #[cfg(feature = "core")]
    pub use mirror_prompt::{Intake, PersonaId, build_system_prompt};

    #[cfg(feature = "provider")]
    pub use mirror_provider::{CallbackSink, ChatSink, ClientConfig, MirrorClient, run_turn};

    #[cfg(feature = "layout")]
    pub use mirror_layout::{LayoutGraph, layout_mind_map};
}
