// Interview question generation.
// Flow: request decode → prompt → LLM → extract (or fallback) → record → store → envelope.
// All LLM calls go through llm_client via the TextGenerator trait.

pub mod covers;
pub mod denylist;
pub mod extractor;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod record;
pub mod request;
pub mod response;
pub mod store;
pub mod strategies;
