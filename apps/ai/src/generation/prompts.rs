// All LLM prompt constants for the Generation module.

/// System prompt for job description writing.
/// Replace: {locale}, {title}, {company_name}
pub const JOB_DESCRIPTION_SYSTEM_TEMPLATE: &str = "You are an expert job description writer. \
    Generate a professional, comprehensive job description for the following position. \
    Write in {locale} locale.

Job Title: {title}
Company: {company_name}";

/// Opening of the user prompt. Replace: {title}, {company_name}
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str =
    "Please create a detailed job description for a {title} position at {company_name}.";

/// Block appended when the caller supplies extra requirements. Replace: {prompts}
pub const ADDITIONAL_REQUIREMENTS_TEMPLATE: &str = "\n\nAdditional requirements:\n{prompts}";

/// Section list every generated description must cover.
pub const JOB_DESCRIPTION_SECTIONS: &str = "\n\nInclude sections for: Job Overview, \
    Key Responsibilities, Required Qualifications, Preferred Qualifications, \
    and Benefits/Compensation if applicable.";
