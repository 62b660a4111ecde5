// All LLM prompt templates for the AI features.
// Placeholders are `{name}` and are filled once by `builder::fill_template`;
// other braces (JSON schema examples) are left untouched.

/// Resume ↔ job description match. Replace: {style_directive}, {json_only},
/// {delimiter_instruction}, {resume_block}, {job_description_block}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the alignment between the following resume and job description.

{style_directive}

Provide your response as a JSON object with exactly these keys:
{
  "matchScore": integer from 0 to 100 representing how well the resume matches the job description requirements,
  "missingKeywords": array of important skills or keywords found in the job description but missing or poorly represented in the resume,
  "matchingKeywords": array of important skills or keywords found in both the job description and the resume,
  "suggestions": array of specific, actionable suggestions (strings) for tailoring the resume to the job description
}

Use the keyword spelling that appears in the job description.

{json_only}

{delimiter_instruction}

Resume:
{resume_block}

Job Description:
{job_description_block}

JSON Response:"#;

/// Standalone resume quality analysis. Replace: {style_directive}, {json_only},
/// {delimiter_instruction}, {resume_block}
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"You are a resume analysis engine.
Analyze the following resume.

{style_directive}

Use this schema:
{
  "overallScore": number (0-100),
  "categoryScores": {
    "formatting": number (0-100),
    "content": number (0-100),
    "keywords": number (0-100),
    "impact": number (0-100)
  },
  "suggestions": string[],
  "strengths": string[]
}

{json_only}

{delimiter_instruction}

Resume:
{resume_block}

JSON Response:"#;

/// Cover letter generation. Replace: {role_name}, {company_name},
/// {style_directive}, {prose_only}, {delimiter_instruction}, {resume_block},
/// {job_description_block}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional cover letter tailored for the position of **{role_name}** at **{company_name}** based strictly on the following resume and job description.

Tone: {style_directive}

Rules:
- Highlight relevant skills and experiences from the resume that match the job description.
- Do not invent information not in the resume.
- Format as a traditional cover letter: intro, experience connection, and closing.
- Address it to "Dear Hiring Manager".
- Use clean paragraph breaks (blank lines between paragraphs).
- {prose_only}

{delimiter_instruction}

{resume_block}

{job_description_block}

Final Output: Full cover letter text only."#;

pub const ROLE_NAME_FALLBACK: &str = "[Role Name]";
pub const COMPANY_NAME_FALLBACK: &str = "[Company Name]";
