use crate::domain::{
    common::entities::app_errors::CoreError,
    intent::entities::{GREETING_PHRASES, GREETING_WORDS, Intent},
};

/// Decides whether the user text is small talk or something to analyze.
///
/// Only whole leading tokens count, so "hello there" is a greeting while
/// "yohan likes sugar" and "hiking is my hobby" are not.
pub fn classify_intent(text: &str) -> Result<Intent, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(
            "ingredients must be a non-empty string".to_string(),
        ));
    }

    let lowered = trimmed.to_lowercase();
    let mut tokens = lowered.split_whitespace().map(strip_punctuation);

    let first = tokens.next().unwrap_or_default();
    if GREETING_WORDS.contains(&first) {
        return Ok(Intent::Greeting);
    }

    if let Some(second) = tokens.next() {
        let phrase = format!("{first} {second}");
        if GREETING_PHRASES.contains(&phrase.as_str()) {
            return Ok(Intent::Greeting);
        }
    }

    Ok(Intent::AnalysisRequest)
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}
