//! Suggested prompts shown under an empty transcript
//!
//! Activating one goes through [`crate::SessionHandle::activate_prompt`],
//! which submits the text exactly like typed input.

/// A canned query with the glyph rendered next to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedPrompt {
    pub glyph: &'static str,
    pub text: &'static str,
}

pub const SUGGESTED_PROMPTS: &[SuggestedPrompt] = &[
    SuggestedPrompt {
        glyph: "📄",
        text: "Summarize the most recently uploaded document",
    },
    SuggestedPrompt {
        glyph: "🔎",
        text: "Which documents mention pricing or costs?",
    },
    SuggestedPrompt {
        glyph: "🗓️",
        text: "List the deadlines mentioned in the documents",
    },
    SuggestedPrompt {
        glyph: "💡",
        text: "What kinds of questions can you answer?",
    },
];

pub fn get(index: usize) -> Option<&'static SuggestedPrompt> {
    SUGGESTED_PROMPTS.get(index)
}
