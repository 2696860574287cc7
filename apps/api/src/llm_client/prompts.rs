// Shared prompt constants.
// Each feature module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt sent with every generation call.
pub const ASSISTANT_SYSTEM: &str = "You are an experienced career coach and hiring specialist. \
    Answer exactly what is asked, in the requested format, without preamble.";

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    IMPORTANT: Return ONLY the JSON. No additional text, notes, or markdown formatting.";
