//! Prompt construction for the generation service.

mod composer;
mod library;

pub use composer::{
    ComposedPrompt, FIRST_MESSAGE_SENTINEL, PromptComposer, TRANSCRIPT_HEADER, style_instruction,
    tone_instruction,
};
pub use library::{QuickPrompt, find_quick_prompt, prompt_library};
