//! LinkProbe Insights Module
//!
//! Turns a link-validation report into a severity, a one-line summary and
//! recommended actions, either through an OpenAI-compatible text-generation
//! service or through deterministic rules.

pub mod adapters;
pub mod config;
pub mod fallback;
pub mod generator;
pub mod parse;
pub mod prompt;

pub use adapters::{AdapterError, FakeTransport, OpenAiAdapter, Transport};
pub use config::InsightConfig;
pub use fallback::fallback_insight;
pub use generator::InsightGenerator;
pub use parse::{extract_json_object, parse_ai_reply};
pub use prompt::build_prompt;
