//! Transcript, flag and artifact types shared by every Mind Mirror crate.
//!
//! These are the lingua franca between the conversation context, the prompt
//! orchestrator, the provider client and the layout engine. Wire formats
//! (provider-specific request/response shapes) are NOT modelled here; the
//! provider crate converts to and from these.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The writer using the app.
    User,
    /// The persona-constrained model.
    Assistant,
}

impl Role {
    /// Wire name of the role (`"user"` / `"assistant"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry. The ordered `Vec<Message>` is the conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// Plain-text body.
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// User-set switches folded into the next outgoing system prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlFlags {
    /// Persistent until toggled off: ask the model for a fresh angle.
    pub dont_repeat: bool,
    /// One-shot: change the line of questioning on the next turn only.
    pub redirect: bool,
}

impl ControlFlags {
    /// Consume the one-shot redirect flag, returning the flags to send with
    /// the outgoing prompt. `self` is left with `redirect == false`.
    pub fn take_for_turn(&mut self) -> ControlFlags {
        let outgoing = *self;
        self.redirect = false;
        outgoing
    }
}

/// Structured summary of a finished conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// What the writer initially described.
    pub starting_point: String,
    /// Key insights, in the order the model listed them.
    pub assumptions: Vec<String>,
    /// Where the conversation led.
    pub end_result: String,
}

/// Root of a mind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapRoot {
    /// Unique node id.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// First-level theme hanging off the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapBranch {
    /// Unique node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Should equal the root id. Empty when the model leaves it out.
    #[serde(default)]
    pub parent_id: String,
    /// Optional free-form tag (`"theme"` in practice).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Leaves of this branch, in display order.
    #[serde(default)]
    pub children: Vec<MindMapLeaf>,
}

/// Second-level insight under a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapLeaf {
    /// Unique node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Should equal the enclosing branch id. Empty when the model leaves it out.
    #[serde(default)]
    pub parent_id: String,
    /// Optional free-form tag (`"insight"` in practice).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Transcript index the insight came from, when the model supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_index: Option<usize>,
}

/// Thematic decomposition of a conversation: root, branches, leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapRecord {
    /// The writing project itself.
    pub root_node: MindMapRoot,
    /// Themes, in display order.
    pub branches: Vec<MindMapBranch>,
}

/// A broken tree invariant found by [`MindMapRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeViolation {
    /// A node's `parentId` does not name its structural parent.
    ParentMismatch {
        /// The offending node.
        id: String,
        /// Id of the structural parent.
        expected: String,
        /// The `parentId` the record carries.
        found: String,
    },
    /// The same id is used by more than one node.
    DuplicateId(String),
}

impl MindMapRecord {
    /// Total number of nodes (root + branches + leaves).
    pub fn node_count(&self) -> usize {
        1 + self
            .branches
            .iter()
            .map(|b| 1 + b.children.len())
            .sum::<usize>()
    }

    /// Check the parent/child id invariants. Returns every violation found,
    /// in document order; an empty list means the record is well formed.
    pub fn validate(&self) -> Vec<TreeViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        let mut note_id = |id: &str, violations: &mut Vec<TreeViolation>| {
            if !seen.insert(id.to_string()) {
                violations.push(TreeViolation::DuplicateId(id.to_string()));
            }
        };

        note_id(&self.root_node.id, &mut violations);
        for branch in &self.branches {
            note_id(&branch.id, &mut violations);
            if branch.parent_id != self.root_node.id {
                violations.push(TreeViolation::ParentMismatch {
                    id: branch.id.clone(),
                    expected: self.root_node.id.clone(),
                    found: branch.parent_id.clone(),
                });
            }
            for leaf in &branch.children {
                note_id(&leaf.id, &mut violations);
                if leaf.parent_id != branch.id {
                    violations.push(TreeViolation::ParentMismatch {
                        id: leaf.id.clone(),
                        expected: branch.id.clone(),
                        found: leaf.parent_id.clone(),
                    });
                }
            }
        }
        violations
    }
}
