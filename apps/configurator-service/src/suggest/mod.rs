//! AI-assisted configuration suggestions.
//!
//! The generator proposes a configuration; the validator and calculator have
//! the final word on validity and price. Generator trouble never blocks a
//! response, it only downgrades the suggestion to a deterministic fallback.

mod client;
mod fallback;
mod parse;
mod preferences;
mod prompt;
mod retry;
mod service;

pub use client::{GeminiClient, GeneratorError, TextGenerator};
pub use fallback::{FALLBACK_WARNING, fallback_reply};
pub use parse::{ReplyParseError, parse_reply};
pub use preferences::{analyze_preferences, model_recommendations};
pub use prompt::{PromptContext, build_compare_prompt, build_prompt, format_constraints};
pub use service::{SuggestError, SuggestionService};
