#![deny(missing_docs)]
//! Prompt side of Mind Mirror.
//!
//! Provides the fixed [`PersonaProfile`] catalogue, the pure
//! [`build_system_prompt`] orchestrator that rebuilds the instruction text on
//! every turn, the session-opening [`Intake`] message, and the extraction
//! instructions for the summary and mind-map artifacts.

pub mod extraction;
pub mod intake;
pub mod orchestrator;
pub mod persona;

pub use extraction::ArtifactKind;
pub use intake::Intake;
pub use orchestrator::{Difficulty, build_system_prompt, explored_angles};
pub use persona::{PersonaId, PersonaProfile, UnknownPersona, personas};
