// Shared prompt fragments.
// Endpoint-specific templates live next to their handlers.

/// Instruction appended to extraction prompts so the model does not invent content.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Extract only what the text states. Do NOT infer, interpolate, or invent \
    employers, titles, dates, degrees, or skills. If a field is not present, use null \
    (or an empty list for list fields).";
