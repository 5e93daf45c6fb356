// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose answer is shown to a human verbatim.
pub const NO_PREAMBLE_INSTRUCTION: &str = "\
    Return ONLY the requested text. Do NOT add a preamble, a title, \
    or commentary about what you wrote.";
