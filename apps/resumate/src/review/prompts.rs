//! Prompt constants for the resume review call.

pub const REVIEW_SYSTEM: &str = "You are an AI resume expert. You review resumes \
and return concrete, field-targeted improvements as strict JSON. You never \
return prose outside the JSON object.";

/// User prompt template. `{resume_text}` is replaced with the serialized
/// resume before sending.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Review the following resume and provide concrete suggestions for improving wording, structure, and content.
For each suggestion, you MUST provide the improved text in the 'suggestion' field.
For each suggestion, specify the exact 'field' it pertains to, using dot notation for nested items like 'projects.0.description' or 'education.1.degree'.

Do not just give advice. Provide the actual rewritten text.

Example:
If the resume has 'Title: web dev', you should suggest a better title.
Your output for this would be:
{
  "field": "title",
  "suggestion": "Frontend Developer"
}

Return a JSON object of the form {"suggestions": [{"field": ..., "suggestion": ...}, ...]}.

Resume:
{resume_text}"#;
