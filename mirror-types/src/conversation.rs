//! Explicit conversation state machine.
//!
//! The conversation context owns the transcript and the control flags and
//! moves through a small set of phases:
//!
//! ```text
//! Intake --begin_turn--> Streaming --finish_turn / fail_turn--> Ready
//! Ready  --begin_turn--> Streaming
//! Intake | Ready --pause--> Paused --resume--> Intake | Ready
//! any --new_session--> Intake
//! ```
//!
//! A turn cannot begin while paused or while another turn is streaming.
//! Deltas go into a pending reply that only joins the transcript when the
//! turn completes; a failed turn leaves the transcript with just the user's
//! message appended.

use crate::error::ConversationError;
use crate::types::{ControlFlags, Message};

/// Where the conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No messages yet; the first turn is the intake message.
    Intake,
    /// Idle between turns.
    Ready,
    /// A turn is in flight.
    Streaming,
    /// The writer paused the conversation; no turn may start.
    Paused,
}

/// Which surface the writer is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// The live chat.
    #[default]
    Chat,
    /// The structured summary.
    Summary,
    /// The mind-map graph.
    MindMap,
}

/// Everything a streaming turn needs from the conversation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    /// Transcript including the new user message.
    pub messages: Vec<Message>,
    /// Flags for this turn; `redirect` has already been consumed in the context.
    pub flags: ControlFlags,
}

/// Minimum transcript length before a summary or mind map makes sense.
pub const MIN_ARTIFACT_MESSAGES: usize = 2;

/// The calling conversation context: transcript, flags, phase and view.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    flags: ControlFlags,
    phase: Phase,
    view: View,
    pending_reply: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A fresh, empty conversation in the intake phase.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            flags: ControlFlags::default(),
            phase: Phase::Intake,
            view: View::Chat,
            pending_reply: String::new(),
        }
    }

    /// The transcript so far (completed turns only).
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current control flags.
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Text streamed so far for the in-flight turn.
    pub fn pending_reply(&self) -> &str {
        &self.pending_reply
    }

    /// Whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Streaming
    }

    /// Start a turn: append the trimmed user message, consume the one-shot
    /// redirect flag and enter [`Phase::Streaming`].
    pub fn begin_turn(&mut self, text: &str) -> Result<TurnRequest, ConversationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }
        match self.phase {
            Phase::Streaming => return Err(ConversationError::Busy),
            Phase::Paused => return Err(ConversationError::Paused),
            Phase::Intake | Phase::Ready => {}
        }

        self.messages.push(Message::user(text));
        let flags = self.flags.take_for_turn();
        self.pending_reply.clear();
        self.phase = Phase::Streaming;

        Ok(TurnRequest {
            messages: self.messages.clone(),
            flags,
        })
    }

    /// Append a streamed fragment to the pending reply.
    pub fn push_delta(&mut self, delta: &str) -> Result<(), ConversationError> {
        self.expect_streaming()?;
        self.pending_reply.push_str(delta);
        Ok(())
    }

    /// Complete the in-flight turn, moving the pending reply into the transcript.
    pub fn finish_turn(&mut self) -> Result<(), ConversationError> {
        self.expect_streaming()?;
        let reply = std::mem::take(&mut self.pending_reply);
        if !reply.is_empty() {
            self.messages.push(Message::assistant(reply));
        }
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Abandon the in-flight turn. The partial reply is discarded; the user's
    /// message stays in the transcript.
    pub fn fail_turn(&mut self) -> Result<(), ConversationError> {
        self.expect_streaming()?;
        self.pending_reply.clear();
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Pause the conversation. Not allowed while a turn is streaming.
    pub fn pause(&mut self) -> Result<(), ConversationError> {
        match self.phase {
            Phase::Streaming => Err(ConversationError::Busy),
            Phase::Paused => Ok(()),
            Phase::Intake | Phase::Ready => {
                self.phase = Phase::Paused;
                Ok(())
            }
        }
    }

    /// Leave [`Phase::Paused`]. No-op in any other phase.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = self.idle_phase();
        }
    }

    /// Flip the persistent "don't repeat" flag, returning its new value.
    pub fn toggle_dont_repeat(&mut self) -> bool {
        self.flags.dont_repeat = !self.flags.dont_repeat;
        self.flags.dont_repeat
    }

    /// Arm the one-shot redirect for the next turn.
    pub fn request_redirect(&mut self) {
        self.flags.redirect = true;
    }

    /// Switch the visible surface. Does not touch the transcript.
    pub fn switch_view(&mut self, view: View) {
        self.view = view;
    }

    /// Whether the transcript is long enough for a summary or mind map.
    pub fn can_generate_artifacts(&self) -> bool {
        self.messages.len() >= MIN_ARTIFACT_MESSAGES
    }

    /// The transcript to hand to structured extraction, if long enough.
    pub fn artifact_transcript(&self) -> Result<&[Message], ConversationError> {
        if self.can_generate_artifacts() {
            Ok(&self.messages)
        } else {
            Err(ConversationError::TooShort)
        }
    }

    /// Clear transcript, flags, pause and view.
    pub fn new_session(&mut self) {
        *self = Self::new();
    }

    fn expect_streaming(&self) -> Result<(), ConversationError> {
        if self.phase == Phase::Streaming {
            Ok(())
        } else {
            Err(ConversationError::NoTurnInFlight)
        }
    }

    fn idle_phase(&self) -> Phase {
        if self.messages.is_empty() {
            Phase::Intake
        } else {
            Phase::Ready
        }
    }
}
