//! Adaptive training suggestions.

pub mod engine;

pub use engine::{evaluate, Suggestion, SuggestionContext, SuggestionKind, MAX_SUGGESTIONS};
