//! Prompt composition.
//!
//! Turns a profile, the per-request options, the conversation so far and the
//! new inbound message into the two strings sent to the generation service:
//! a system instruction (persona, language, tone, style) and a user prompt
//! (transcript, fenced new message, drafting directive).
//!
//! Composition is a pure function of its inputs. It never fails: enum values
//! that could not be parsed have already degraded to their defaults.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conversation::HistoryItem;
use crate::generation::{GenerationOptions, ResponseStyle, Tone};
use crate::profile::{Profile, UserRole};

/// Stands in for the transcript when there is no history yet.
pub const FIRST_MESSAGE_SENTINEL: &str = "This is the first message from the client.";

/// Heading of the transcript block.
pub const TRANSCRIPT_HEADER: &str =
    "Here is the previous conversation history for context (in chronological order):";

const TURN_SEPARATOR: &str = "\n---\n";

/// The two strings handed to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPrompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Builds prompts for one profile.
///
/// ```
/// use responder_core::generation::GenerationOptions;
/// use responder_core::profile::Profile;
/// use responder_core::prompt::{FIRST_MESSAGE_SENTINEL, PromptComposer};
///
/// let profile = Profile::default();
/// let composer = PromptComposer::new(&profile);
/// let prompt = composer.compose(&GenerationOptions::default(), &[], "Are you free next week?");
/// assert!(prompt.user_prompt.contains(FIRST_MESSAGE_SENTINEL));
/// assert!(prompt.system_instruction.contains("You MUST respond in English"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer<'a> {
    profile: &'a Profile,
}

impl<'a> PromptComposer<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self { profile }
    }

    /// Composes the system instruction and user prompt.
    ///
    /// `history` is newest-first, as stored on a conversation.
    pub fn compose(
        &self,
        options: &GenerationOptions,
        history: &[HistoryItem],
        new_message: &str,
    ) -> ComposedPrompt {
        let prompt = ComposedPrompt {
            system_instruction: self.system_instruction(options),
            user_prompt: self.user_prompt(history, new_message),
        };
        debug!(
            role = %self.profile.role,
            history_len = history.len(),
            system_len = prompt.system_instruction.len(),
            prompt_len = prompt.user_prompt.len(),
            "Composed prompt"
        );
        prompt
    }

    /// Persona block, language directive, then the per-request overrides.
    pub fn system_instruction(&self, options: &GenerationOptions) -> String {
        format!(
            "{persona}{language}\n\nFor this specific response, follow these stylistic overrides:\n- Tone: {tone}\n- Style: {style}",
            persona = self.persona_block(),
            language = self.language_directive(),
            tone = tone_instruction(options.tone),
            style = style_instruction(options.style),
        )
    }

    /// Transcript (or first-message sentinel), the fenced message, and the
    /// drafting directive.
    pub fn user_prompt(&self, history: &[HistoryItem], new_message: &str) -> String {
        format!(
            "{context}\n\nNow, the client has sent a new message:\n\"---\n{new_message}\n---\"\n\nDraft the next response as {name}.",
            context = self.conversation_context(history),
            name = self.profile.name,
        )
    }

    /// Chronological transcript of `history`, or the sentinel when empty.
    pub fn conversation_context(&self, history: &[HistoryItem]) -> String {
        if history.is_empty() {
            return FIRST_MESSAGE_SENTINEL.to_string();
        }

        let turns = history
            .iter()
            .rev()
            .map(|item| {
                format!(
                    "Client: {}\nYou ({}): {}",
                    item.client_message, self.profile.name, item.generated_response
                )
            })
            .collect::<Vec<_>>()
            .join(TURN_SEPARATOR);

        format!("{TRANSCRIPT_HEADER}{TURN_SEPARATOR}{turns}{TURN_SEPARATOR}")
            .trim_end_matches('\n')
            .to_string()
    }

    fn language_directive(&self) -> String {
        format!(
            "\nIMPORTANT: You MUST respond in {}.",
            self.profile.language
        )
    }

    fn portfolio_sentence(&self) -> String {
        match self.profile.portfolio() {
            Some(url) => format!(
                "\nMy portfolio/website is available at: {url}. You can share this link if it's relevant."
            ),
            None => String::new(),
        }
    }

    fn persona_block(&self) -> String {
        let Profile {
            name,
            skills,
            experience,
            ..
        } = self.profile;
        let portfolio = self.portfolio_sentence();

        match self.profile.role {
            UserRole::Student => format!(
                "You are a dedicated and bright student named {name}.
Your areas of study are: {skills}.
Here is a summary of your relevant projects and coursework: {experience}.{portfolio}

Your task is to draft clear, respectful, and professional messages for academic purposes (e.g., emailing professors, group project coordination).
- Always consider the conversation history for context.
- Clearly state the purpose of your message.
- Ask questions if you need clarification.
- Maintain a respectful and slightly formal tone.
- End with a polite closing.
- IMPORTANT: Do not introduce yourself as an AI. You are responding as {name}, the student."
            ),
            UserRole::BusinessOwner => format!(
                "You are {name}, the owner or a representative of a business.
Your business specializes in: {skills}.
About the business: {experience}.{portfolio}

Your task is to draft professional responses to customers, partners, or other stakeholders.
- Use the conversation history to understand the stakeholder's needs and previous interactions.
- Maintain a professional, helpful, and customer-centric brand voice.
- Address inquiries or issues directly and offer clear solutions or next steps.
- End with a clear call to action or a polite closing that strengthens the business relationship.
- IMPORTANT: Do not introduce yourself as an AI. You are responding on behalf of the business as {name}."
            ),
            UserRole::Freelancer => format!(
                "You are a highly skilled and professional freelance developer named {name}.
Your key skills are: {skills}.
Here is a brief summary of your experience: {experience}.{portfolio}

Your task is to draft professional, context-aware responses to clients.
- Consider the entire conversation history to avoid repetition and maintain context.
- Acknowledge the client's message and express enthusiasm for the project.
- Briefly mention how your skills are a great fit for their needs.
- Ask one or two insightful clarifying questions to encourage a conversation.
- End with a clear and positive call to action.
- IMPORTANT: Do not introduce yourself as an AI. You are responding as {name}, the developer."
            ),
        }
    }
}

/// Register, contractions and affect for a tone.
pub fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => {
            "Adopt a formal and professional tone. Use complete sentences and avoid contractions (e.g., \"I am\" instead of \"I'm\")."
        }
        Tone::Enthusiastic => {
            "Adopt an energetic and enthusiastic tone. Feel free to use exclamation points where appropriate. Show genuine excitement about the project."
        }
        Tone::Casual => {
            "Adopt a friendly and casual tone, as if you are talking to a colleague. You can use contractions (e.g., \"I'm\", \"let's\"). Keep it approachable."
        }
    }
}

/// Target length for a response style.
pub fn style_instruction(style: ResponseStyle) -> &'static str {
    match style {
        ResponseStyle::ShortAndSweet => {
            "Keep the response concise and to the point. Aim for 2-3 sentences."
        }
        ResponseStyle::DetailedExplanation => {
            "Provide a more detailed and thorough response. Elaborate on your points and explain your reasoning clearly."
        }
        ResponseStyle::Default => "Write a balanced response of a standard length.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ModelId;
    use crate::profile::Language;
    use strum::IntoEnumIterator;

    fn item(id: i64, message: &str, response: &str) -> HistoryItem {
        HistoryItem {
            id,
            client_message: message.to_string(),
            generated_response: response.to_string(),
            tone: Tone::Casual,
            response_style: ResponseStyle::Default,
            model_id: ModelId::Flash,
            search_results: Vec::new(),
            feedback: None,
        }
    }

    fn ana() -> Profile {
        Profile {
            name: "Ana".to_string(),
            role: UserRole::Student,
            language: Language::Spanish,
            skills: "Biology".to_string(),
            experience: "Lab assistant 2 yrs".to_string(),
            portfolio_url: None,
        }
    }

    #[test]
    fn test_every_role_produces_non_empty_output() {
        let roles = UserRole::iter().chain([UserRole::from("Pirate"), UserRole::from("")]);
        for role in roles {
            let profile = Profile {
                role,
                ..Profile::default()
            };
            let prompt = PromptComposer::new(&profile).compose(
                &GenerationOptions::default(),
                &[],
                "Hello",
            );
            assert!(!prompt.system_instruction.is_empty());
            assert!(!prompt.user_prompt.is_empty());
        }
    }

    #[test]
    fn test_unknown_role_uses_freelancer_persona() {
        let profile = Profile {
            role: UserRole::from("Pirate"),
            ..Profile::default()
        };
        let instruction =
            PromptComposer::new(&profile).system_instruction(&GenerationOptions::default());
        assert!(instruction.contains("freelance developer"));
    }

    #[test]
    fn test_language_directive_survives_every_option() {
        let profile = Profile {
            language: Language::Japanese,
            ..Profile::default()
        };
        let composer = PromptComposer::new(&profile);
        for tone in Tone::iter() {
            for style in ResponseStyle::iter() {
                let options = GenerationOptions {
                    tone,
                    style,
                    ..GenerationOptions::default()
                };
                let instruction = composer.system_instruction(&options);
                assert!(instruction.contains("You MUST respond in Japanese."));
                assert!(instruction.contains(tone_instruction(tone)));
                assert!(instruction.contains(style_instruction(style)));
            }
        }
    }

    #[test]
    fn test_tone_and_style_are_layered_after_persona() {
        let profile = Profile::default();
        let instruction = PromptComposer::new(&profile).system_instruction(&GenerationOptions {
            tone: Tone::Enthusiastic,
            style: ResponseStyle::DetailedExplanation,
            ..GenerationOptions::default()
        });
        let persona_end = instruction.find("the developer.").unwrap();
        let tone_pos = instruction.find("- Tone: Adopt an energetic").unwrap();
        let style_pos = instruction.find("- Style: Provide a more detailed").unwrap();
        assert!(persona_end < tone_pos && tone_pos < style_pos);
    }

    #[test]
    fn test_portfolio_sentence_only_when_present() {
        let mut profile = Profile::default();
        let composer = PromptComposer::new(&profile);
        assert!(!composer
            .system_instruction(&GenerationOptions::default())
            .contains("portfolio/website"));

        profile.portfolio_url = Some("https://ana.dev".to_string());
        let instruction =
            PromptComposer::new(&profile).system_instruction(&GenerationOptions::default());
        assert!(instruction.contains("My portfolio/website is available at: https://ana.dev."));
    }

    #[test]
    fn test_empty_history_uses_sentinel() {
        let profile = Profile::default();
        let prompt = PromptComposer::new(&profile).user_prompt(&[], "New message");
        assert!(prompt.starts_with(FIRST_MESSAGE_SENTINEL));
        assert!(!prompt.contains(TRANSCRIPT_HEADER));
        assert!(!prompt.contains("Client: "));
    }

    #[test]
    fn test_transcript_is_chronological() {
        let profile = ana();
        // Newest first, as stored.
        let history = vec![
            item(3, "third question", "third answer"),
            item(2, "second question", "second answer"),
            item(1, "first question", "first answer"),
        ];
        let prompt = PromptComposer::new(&profile).user_prompt(&history, "fourth question");

        assert!(!prompt.contains(FIRST_MESSAGE_SENTINEL));
        assert!(prompt.starts_with(TRANSCRIPT_HEADER));
        let first = prompt.find("Client: first question").unwrap();
        let second = prompt.find("Client: second question").unwrap();
        let third = prompt.find("Client: third question").unwrap();
        let new = prompt.find("fourth question").unwrap();
        assert!(first < second && second < third && third < new);
        assert!(prompt.contains("Client: first question\nYou (Ana): first answer\n---\nClient: second question"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let profile = ana();
        let history = vec![item(1, "q", "a")];
        let options = GenerationOptions {
            tone: Tone::Formal,
            style: ResponseStyle::ShortAndSweet,
            ..GenerationOptions::default()
        };
        let composer = PromptComposer::new(&profile);
        let first = composer.compose(&options, &history, "again?");
        let second = composer.compose(&options, &history, "again?");
        assert_eq!(first.system_instruction.as_bytes(), second.system_instruction.as_bytes());
        assert_eq!(first.user_prompt.as_bytes(), second.user_prompt.as_bytes());
    }

    #[test]
    fn test_student_reschedule_scenario() {
        let profile = ana();
        let options = GenerationOptions {
            tone: Tone::Formal,
            style: ResponseStyle::from("Short & Sweet"),
            ..GenerationOptions::default()
        };
        let message = "Can we reschedule our meeting?";
        let prompt = PromptComposer::new(&profile).compose(&options, &[], message);

        assert!(prompt.system_instruction.contains("Ana"));
        assert!(prompt.system_instruction.contains("student named Ana"));
        assert!(prompt.system_instruction.contains("academic purposes"));
        assert!(prompt.system_instruction.contains("You MUST respond in Spanish."));
        assert!(prompt.system_instruction.contains("Aim for 2-3 sentences."));
        assert!(prompt.system_instruction.contains("avoid contractions"));

        assert!(prompt.user_prompt.contains(message));
        assert!(prompt.user_prompt.contains(FIRST_MESSAGE_SENTINEL));
        assert!(prompt.user_prompt.ends_with("Draft the next response as Ana."));
        assert!(prompt.user_prompt.contains("\"---\nCan we reschedule our meeting?\n---\""));
    }
}
