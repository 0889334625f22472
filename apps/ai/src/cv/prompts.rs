// CV analysis LLM prompt templates.

pub const CV_PARSE_SYSTEM: &str = "\
You are a precise resume data extractor. \
Parse raw CV text into structured JSON. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

/// Replace: {no_invention_instruction}, {cv_text}
pub const CV_PARSE_PROMPT: &str = r#"Parse the following CV into a structured JSON object.

{no_invention_instruction}

OUTPUT SCHEMA (return exactly this structure):
{
  "name": "string" | null,
  "email": "string" | null,
  "phone": "string" | null,
  "summary": "string" | null,
  "skills": ["string"],
  "experiences": [
    {
      "company": "string",
      "title": "string",
      "start_date": "YYYY-MM" | null,
      "end_date": "YYYY-MM" | "Present" | null,
      "summary": "string"
    }
  ],
  "education": [
    {
      "institution": "string",
      "degree": "string" | null,
      "field": "string" | null,
      "year": "YYYY" | null
    }
  ]
}

RULES:
1. "skills" lists individual skills (languages, frameworks, tools, methods) — one per item, no sentences
2. List experiences and education in the order they appear in the CV
3. Use "Present" as end_date for the current position
4. "summary" of an experience is one or two sentences of what the person did there
5. Return ONLY the JSON object — nothing else, no code fences.

CV TEXT:
{cv_text}"#;
