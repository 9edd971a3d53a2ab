use serde::{Deserialize, Serialize};

/// Single-token openers that mark a message as conversational.
pub const GREETING_WORDS: [&str; 6] = ["hi", "hello", "hey", "hii", "hiii", "yo"];

/// Two-token openers, matched against the first two words together.
pub const GREETING_PHRASES: [&str; 3] = ["good morning", "good afternoon", "good evening"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    AnalysisRequest,
}
