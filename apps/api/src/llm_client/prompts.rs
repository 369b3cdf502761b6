// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Output is read aloud by a voice assistant.
pub const VOICE_SAFE_INSTRUCTION: &str = "The questions are going to be read by a voice assistant \
    so do not use \"/\" or \"*\" or any other special characters which might break the voice assistant.";

/// Asks for a bare JSON array of strings and nothing else.
pub const JSON_ARRAY_ONLY_INSTRUCTION: &str = "Please return only the questions, without any additional text.";
