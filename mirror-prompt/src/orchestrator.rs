//! Per-turn system prompt orchestration.
//!
//! [`build_system_prompt`] rebuilds the full instruction text from the
//! persona, the transcript and the control flags. It is pure: identical
//! inputs always produce byte-identical output. Sections are appended in a
//! fixed order (base template, explored angles, difficulty, repetition
//! directive, redirect directive), each separated by a blank line.

use mirror_types::{ControlFlags, Message, Role};

use crate::persona::PersonaId;

/// Characters of each prior question kept in the explored-angles log.
/// Counted in `char`s, with no word-boundary adjustment.
pub const EXCERPT_CHARS: usize = 60;

/// User turns (inclusive) that still get the general-ideas directive.
pub const GENERAL_TURN_LIMIT: usize = 5;

const SECTION_BREAK: &str = "\n\n";

const EXPLORED_HEADER: &str = "ANGLES ALREADY EXPLORED (DO NOT REVISIT):";

const DONT_REPEAT_DIRECTIVE: &str = "URGENT: The user has flagged that your questions feel repetitive. Review the conversation carefully and ensure your next question explores a COMPLETELY NEW angle that has not been touched at all. Acknowledge briefly that you're shifting direction.";

const REDIRECT_DIRECTIVE: &str = "The user wants you to change your line of questioning. Shift to a meaningfully different angle or dimension of their writer's block. Do NOT continue the current thread. Start fresh from a new direction.";

/// Questioning depth derived from how many user turns have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Turns 1 through [`GENERAL_TURN_LIMIT`].
    General,
    /// Every turn after that.
    Deeper,
}

impl Difficulty {
    /// Level for the given number of user turns in the transcript.
    pub fn for_user_turns(user_turns: usize) -> Self {
        if user_turns <= GENERAL_TURN_LIMIT {
            Difficulty::General
        } else {
            Difficulty::Deeper
        }
    }

    /// Directive text spliced into the difficulty line.
    pub fn directive(self) -> &'static str {
        match self {
            Difficulty::General => {
                "GENERAL IDEAS — Ask broad questions about purpose, audience, structure, and core content"
            }
            Difficulty::Deeper => {
                "DEEPER IDEAS — Ask specific questions about details, connections, gaps, and refinements"
            }
        }
    }
}

/// One log line per prior assistant message, in transcript order.
pub fn explored_angles(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .enumerate()
        .map(|(idx, m)| {
            let excerpt: String = m.content.chars().take(EXCERPT_CHARS).collect();
            format!("- Question {}: Asked about \"{excerpt}...\"", idx + 1)
        })
        .collect()
}

/// Number of user turns in the transcript.
pub fn user_turns(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.role == Role::User).count()
}

/// Build the system prompt for the next request.
///
/// The caller owns the one-shot redirect flag and must clear it after this
/// call regardless of how the request turns out.
pub fn build_system_prompt(persona: PersonaId, messages: &[Message], flags: ControlFlags) -> String {
    let mut prompt = String::from(persona.profile().system_prompt);

    let angles = explored_angles(messages);
    if !angles.is_empty() {
        prompt.push_str(SECTION_BREAK);
        prompt.push_str(EXPLORED_HEADER);
        prompt.push('\n');
        prompt.push_str(&angles.join("\n"));
    }

    let difficulty = Difficulty::for_user_turns(user_turns(messages));
    prompt.push_str(SECTION_BREAK);
    prompt.push_str(&format!(
        "CURRENT DIFFICULTY LEVEL: {}. Adjust your questioning depth accordingly.",
        difficulty.directive()
    ));

    if flags.dont_repeat {
        prompt.push_str(SECTION_BREAK);
        prompt.push_str(DONT_REPEAT_DIRECTIVE);
    }

    if flags.redirect {
        prompt.push_str(SECTION_BREAK);
        prompt.push_str(REDIRECT_DIRECTIVE);
    }

    prompt
}
