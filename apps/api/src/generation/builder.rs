//! Prompt Builder: deterministic prompt assembly for each AI feature.
//!
//! Pure function of its input: no retries, no caching, no I/O.

use thiserror::Error;

use crate::generation::prompts::{
    ANALYZE_PROMPT_TEMPLATE, COMPANY_NAME_FALLBACK, COVER_LETTER_PROMPT_TEMPLATE,
    MATCH_PROMPT_TEMPLATE, ROLE_NAME_FALLBACK,
};
use crate::generation::tone::StylePreset;
use crate::generation::Feature;
use crate::llm_client::prompts::{
    ALL_MARKERS, DELIMITER_INSTRUCTION, JOB_DESCRIPTION_END, JOB_DESCRIPTION_START,
    JSON_ONLY_INSTRUCTION, PROSE_ONLY_INSTRUCTION, RESUME_END, RESUME_START,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("resume text is empty")]
    MissingResumeText,

    #[error("job description is required for {0}")]
    MissingJobDescription(&'static str),
}

/// Ephemeral per-request inputs to prompt assembly.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub company_name: Option<String>,
    pub role_name: Option<String>,
    pub style: StylePreset,
}

impl PromptContext {
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            ..Self::default()
        }
    }

    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }

    pub fn with_company(mut self, company_name: Option<String>) -> Self {
        self.company_name = company_name;
        self
    }

    pub fn with_role(mut self, role_name: Option<String>) -> Self {
        self.role_name = role_name;
        self
    }

    pub fn with_style(mut self, style: StylePreset) -> Self {
        self.style = style;
        self
    }
}

/// Builds the prompt for `feature`.
pub fn build_prompt(feature: Feature, ctx: &PromptContext) -> Result<String, PromptError> {
    if ctx.resume_text.trim().is_empty() {
        return Err(PromptError::MissingResumeText);
    }

    let resume_block = fence(RESUME_START, RESUME_END, &ctx.resume_text);
    let style_directive = ctx.style.directive(feature);

    let prompt = match feature {
        Feature::Analyze => fill_template(
            ANALYZE_PROMPT_TEMPLATE,
            &[
                ("style_directive", style_directive),
                ("json_only", JSON_ONLY_INSTRUCTION),
                ("delimiter_instruction", DELIMITER_INSTRUCTION),
                ("resume_block", &resume_block),
            ],
        ),
        Feature::Match => {
            let jd_block = job_description_block(feature, ctx)?;
            fill_template(
                MATCH_PROMPT_TEMPLATE,
                &[
                    ("style_directive", style_directive),
                    ("json_only", JSON_ONLY_INSTRUCTION),
                    ("delimiter_instruction", DELIMITER_INSTRUCTION),
                    ("resume_block", &resume_block),
                    ("job_description_block", &jd_block),
                ],
            )
        }
        Feature::CoverLetter => {
            let jd_block = job_description_block(feature, ctx)?;
            let role_name = inline_value(ctx.role_name.as_deref(), ROLE_NAME_FALLBACK);
            let company_name = inline_value(ctx.company_name.as_deref(), COMPANY_NAME_FALLBACK);
            fill_template(
                COVER_LETTER_PROMPT_TEMPLATE,
                &[
                    ("role_name", &role_name),
                    ("company_name", &company_name),
                    ("style_directive", style_directive),
                    ("prose_only", PROSE_ONLY_INSTRUCTION),
                    ("delimiter_instruction", DELIMITER_INSTRUCTION),
                    ("resume_block", &resume_block),
                    ("job_description_block", &jd_block),
                ],
            )
        }
    };

    Ok(prompt)
}

fn job_description_block(feature: Feature, ctx: &PromptContext) -> Result<String, PromptError> {
    let jd = ctx
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty())
        .ok_or(PromptError::MissingJobDescription(feature.as_str()))?;
    Ok(fence(JOB_DESCRIPTION_START, JOB_DESCRIPTION_END, jd))
}

/// Embeds user text between literal start/end markers. Markers already in the
/// text are removed until none remain, so nested fragments cannot reassemble one.
fn fence(start: &str, end: &str, text: &str) -> String {
    let mut cleaned = text.to_string();
    loop {
        let next = ALL_MARKERS
            .iter()
            .fold(cleaned.clone(), |acc, marker| acc.replace(marker, ""));
        if next == cleaned {
            break;
        }
        cleaned = next;
    }
    format!("{start}\n{}\n{end}", cleaned.trim())
}

/// Single-line values (names) interpolated outside the fenced blocks.
fn inline_value(value: Option<&str>, fallback: &str) -> String {
    match value.map(|v| v.split_whitespace().collect::<Vec<_>>().join(" ")) {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Substitutes `{key}` placeholders in a single pass over the template.
/// Substituted values are never rescanned, so user text containing
/// `{resume_block}` or similar stays literal.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let replacement = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}
