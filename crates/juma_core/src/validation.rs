//! crates/juma_core/src/validation.rs
//!
//! Turns a raw provider payload into typed sermon content, or rejects it.
//! Nothing reaches the collection without passing through here.

use crate::domain::GeneratedSermonContent;
use crate::ports::GenerationError;
use tracing::warn;

/// The number of messages the generator is asked for. Fewer is accepted.
pub const EXPECTED_MESSAGES: usize = 3;

/// Parses and checks a generated sermon.
///
/// The payload may be wrapped in a Markdown code fence. Any missing or
/// mistyped field, and any blank required text, is a `MalformedResponse`
/// carrying the detail.
pub fn parse_generated_content(raw: &str) -> Result<GeneratedSermonContent, GenerationError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "the response was empty".to_string(),
        ));
    }

    let content: GeneratedSermonContent = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid JSON: {e}")))?;

    check_required_text(&content)?;

    if content.primary.messages.len() < EXPECTED_MESSAGES {
        warn!(
            messages = content.primary.messages.len(),
            "Generated sermon has fewer messages than requested"
        );
    }
    Ok(content)
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // Drop the info string (`json`) up to the end of the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, tail)| tail);
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

fn check_required_text(content: &GeneratedSermonContent) -> Result<(), GenerationError> {
    let primary = &content.primary;
    let secondary = &content.secondary;
    let fields = [
        ("title", content.title.as_str()),
        ("verses", content.verses.as_str()),
        ("khutbah1.title", primary.title.as_str()),
        ("khutbah1.verses", primary.verses.as_str()),
        ("khutbah1.tafsir", primary.tafsir.as_str()),
        ("khutbah1.reflections", primary.reflections.as_str()),
        ("khutbah1.repentance", primary.repentance.as_str()),
        ("khutbah2.hadith.text", secondary.hadith.text.as_str()),
        ("khutbah2.hadithReflection", secondary.hadith_reflection.as_str()),
        ("khutbah2.dua", secondary.dua.as_str()),
    ];

    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(GenerationError::MalformedResponse(format!(
            "required field `{name}` is blank"
        )));
    }

    if primary.messages.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "khutbah1.messages is empty".to_string(),
        ));
    }
    if let Some(i) = primary
        .messages
        .iter()
        .position(|m| m.message.trim().is_empty() || m.explanation.trim().is_empty())
    {
        return Err(GenerationError::MalformedResponse(format!(
            "khutbah1.messages[{i}] is incomplete"
        )));
    }
    Ok(())
}
