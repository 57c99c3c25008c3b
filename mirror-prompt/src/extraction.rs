//! Fixed instructions for the post-conversation structured extraction calls.
//!
//! Both demand a bare JSON object in a specific schema; the provider crate
//! still recovers from fenced or prose-wrapped answers.

/// Which artifact an extraction call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `{ startingPoint, assumptions, endResult }`.
    Summary,
    /// `{ rootNode, branches[] }`.
    MindMap,
}

impl ArtifactKind {
    /// System instruction sent with the transcript.
    pub fn instruction(self) -> &'static str {
        match self {
            ArtifactKind::Summary => SUMMARY_INSTRUCTION,
            ArtifactKind::MindMap => MIND_MAP_INSTRUCTION,
        }
    }

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::MindMap => "mind map",
        }
    }
}

/// Summary extraction instruction.
pub const SUMMARY_INSTRUCTION: &str = r#"Based on this conversation about writing, generate a structured summary.

CRITICAL: You MUST respond with ONLY valid JSON. No explanation, no markdown, no code blocks. Just pure JSON.

Format:
{
  "startingPoint": "What the user initially described about their writing project (1-2 sentences)",
  "assumptions": ["Key insight 1", "Key insight 2", "Key insight 3"],
  "endResult": "Where the conversation led them (1-2 sentences)"
}

Respond with ONLY the JSON object, nothing else."#;

/// Mind-map extraction instruction.
pub const MIND_MAP_INSTRUCTION: &str = r#"Analyze this conversation about writing and generate a mind map structure.

CRITICAL: You MUST respond with ONLY valid JSON. No explanation, no markdown, no code blocks. Just pure JSON.

Format:
{
  "rootNode": { "label": "User's writing project topic", "id": "root" },
  "branches": [
    {
      "id": "branch-1",
      "label": "Main theme or question explored",
      "parentId": "root",
      "type": "theme",
      "children": [
        { "id": "leaf-1", "label": "Specific insight or detail discussed", "parentId": "branch-1", "type": "insight" }
      ]
    }
  ]
}

Create 3-5 main branches representing key themes discussed. Each branch should have 1-3 children representing specific insights.
Keep labels concise (under 50 characters).

Respond with ONLY the JSON object, nothing else."#;
