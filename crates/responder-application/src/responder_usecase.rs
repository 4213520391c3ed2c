//! Responder use case implementation.
//!
//! `ResponderUseCase` is the single entry point front ends talk to. It wires
//! the repositories, the rate limiter, the prompt composer and the
//! generation client, and owns every read-modify-write of the stored
//! conversation list.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use responder_core::conversation::{Conversation, ConversationRepository, Feedback, HistoryItem};
use responder_core::error::{ResponderError, Result};
use responder_core::generation::{GenerationClient, GenerationError, GenerationOptions, GenerationRequest};
use responder_core::profile::{Profile, ProfileRepository};
use responder_core::prompt::{PromptComposer, QuickPrompt, prompt_library};
use responder_core::rate_limit::{Clock, RateLimitDecision, RateLimiter};
use responder_core::settings::{SettingsRepository, Theme};
use responder_infrastructure::config::DEFAULT_SHARE_BASE_URL;
use responder_infrastructure::conversation_codec::{export_json, parse_conversations};
use responder_infrastructure::share::{decode_share_link, encode_share_link};

/// State after [`ResponderUseCase::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub profile: Profile,
    pub conversations: Vec<Conversation>,
    pub active_conversation_id: i64,
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// The conversation after the new exchange was added
    pub conversation: Conversation,
    pub item: HistoryItem,
}

/// Where the API key in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    Environment,
    Stored,
}

/// Use case for drafting replies and managing conversations.
///
/// # Responsibilities
///
/// - Running the generate flow: validate, rate-limit, compose, call, record
/// - Creating, selecting, renaming, deleting and clearing conversations
/// - Export, import and share links
/// - Profile and settings access for the front end
///
/// # Thread Safety
///
/// Mutations of the conversation list are serialized through an internal
/// lock. The lock is not held across the network call.
pub struct ResponderUseCase {
    profile_repository: Arc<dyn ProfileRepository>,
    conversation_repository: Arc<dyn ConversationRepository>,
    settings_repository: Arc<dyn SettingsRepository>,
    rate_limiter: RateLimiter,
    client: Arc<dyn GenerationClient>,
    clock: Arc<dyn Clock>,
    api_key_override: Option<String>,
    share_base_url: String,
    mutation_lock: Mutex<()>,
}

impl ResponderUseCase {
    /// Creates a new `ResponderUseCase`.
    ///
    /// # Arguments
    ///
    /// * `profile_repository` - Storage of the active profile
    /// * `conversation_repository` - Storage of conversations and the selection
    /// * `settings_repository` - Theme and API key storage
    /// * `rate_limiter` - Client-side request limiter
    /// * `client` - Generation backend
    /// * `clock` - Source of IDs and timestamps
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        conversation_repository: Arc<dyn ConversationRepository>,
        settings_repository: Arc<dyn SettingsRepository>,
        rate_limiter: RateLimiter,
        client: Arc<dyn GenerationClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profile_repository,
            conversation_repository,
            settings_repository,
            rate_limiter,
            client,
            clock,
            api_key_override: None,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            mutation_lock: Mutex::new(()),
        }
    }

    /// Uses `key` instead of the stored API key when set.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        self.api_key_override = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_share_base_url(mut self, url: impl Into<String>) -> Self {
        self.share_base_url = url.into();
        self
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Ensures a profile, at least one conversation and a valid selection.
    pub async fn initialize(&self) -> Result<Snapshot> {
        let _guard = self.mutation_lock.lock().await;

        let profile = self.profile_repository.load_or_init()?;

        let mut conversations = self.conversation_repository.get_all()?;
        if conversations.is_empty() {
            let first = Conversation::new(self.clock.now_millis(), Conversation::default_name(1));
            info!("Creating initial conversation {}", first.id);
            conversations.push(first);
            self.conversation_repository.save_all(&conversations)?;
        }

        let active_conversation_id = self.resolve_active_id(&conversations)?;

        Ok(Snapshot {
            profile,
            conversations,
            active_conversation_id,
        })
    }

    /// Returns the stored selection if it still exists, otherwise selects the
    /// first conversation.
    fn resolve_active_id(&self, conversations: &[Conversation]) -> Result<i64> {
        let stored = self.conversation_repository.active_id()?;
        if let Some(id) = stored.filter(|id| conversations.iter().any(|c| c.id == *id)) {
            return Ok(id);
        }

        let first = conversations
            .first()
            .map(|c| c.id)
            .ok_or_else(|| ResponderError::not_found("conversation", "any"))?;
        if stored.is_some() {
            warn!("Stored active conversation no longer exists, selecting {}", first);
        }
        self.conversation_repository.set_active_id(first)?;
        Ok(first)
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Drafts a reply to `message` in the active conversation.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank message
    /// - `Config` when no API key is available
    /// - `RateLimited` when the local request budget is exhausted
    /// - `Generation` when the service fails; an invalid stored key is cleared
    pub async fn generate(&self, message: &str, options: GenerationOptions) -> Result<GenerationResult> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ResponderError::validation("Message must not be empty"));
        }

        let (api_key, key_source) = self.require_api_key()?;
        let conversation = self.active_conversation().await?;

        let decision = self.rate_limiter.check_limit();
        if decision.is_limited {
            info!("Request blocked by local rate limit ({} ms)", decision.wait_ms);
            return Err(ResponderError::RateLimited {
                wait_ms: decision.wait_ms,
            });
        }
        if let Err(e) = self.rate_limiter.record_request() {
            warn!("Failed to record request timestamp: {}", e);
        }

        let profile = self.profile_repository.load_or_init()?;
        let prompt = PromptComposer::new(&profile).compose(&options, &conversation.history, message);
        let request = GenerationRequest::new(prompt, &options);

        debug!(
            client = self.client.name(),
            model = %options.model,
            conversation_id = conversation.id,
            "Dispatching generation request"
        );

        let output = match self.client.generate(&api_key, request).await {
            Ok(output) => output,
            Err(e) => {
                error!("Generation failed: {}", e);
                if e == GenerationError::InvalidApiKey && key_source == KeySource::Stored {
                    warn!("Clearing rejected API key");
                    if let Err(clear_err) = self.settings_repository.clear_api_key() {
                        warn!("Failed to clear API key: {}", clear_err);
                    }
                }
                return Err(e.into());
            }
        };

        let _guard = self.mutation_lock.lock().await;
        let now = self.clock.now_millis();
        let mut created = None;
        let conversation = self.conversation_repository.update(conversation.id, &mut |c: &mut Conversation| {
            let item = HistoryItem {
                id: next_id(now, c.history.iter().map(|i| i.id)),
                client_message: message.to_string(),
                generated_response: output.text.clone(),
                tone: options.tone,
                response_style: options.style,
                model_id: options.model,
                search_results: output.citations.clone(),
                feedback: None,
            };
            created = Some(item.clone());
            c.push_item(item);
        })?;
        let item = created.ok_or_else(|| ResponderError::internal("History item was not created"))?;

        info!(
            "Added response {} to conversation {} ({} citations)",
            item.id,
            conversation.id,
            item.search_results.len()
        );
        Ok(GenerationResult { conversation, item })
    }

    fn require_api_key(&self) -> Result<(String, KeySource)> {
        if let Some(key) = &self.api_key_override {
            return Ok((key.clone(), KeySource::Environment));
        }
        self.settings_repository
            .api_key()?
            .map(|key| (key, KeySource::Stored))
            .ok_or_else(|| ResponderError::config("No API key configured"))
    }

    /// Current limiter decision, without recording a request.
    pub fn rate_limit_status(&self) -> RateLimitDecision {
        self.rate_limiter.check_limit()
    }

    // ========================================================================
    // Conversations
    // ========================================================================

    pub fn conversations(&self) -> Result<Vec<Conversation>> {
        self.conversation_repository.get_all()
    }

    /// The selected conversation, falling back to the first one.
    pub async fn active_conversation(&self) -> Result<Conversation> {
        let conversations = self.conversation_repository.get_all()?;
        let id = {
            let _guard = self.mutation_lock.lock().await;
            self.resolve_active_id(&conversations)?
        };
        conversations
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ResponderError::not_found("conversation", id.to_string()))
    }

    /// Starts a new conversation and selects it.
    ///
    /// When the last conversation is still empty and default-named it is
    /// selected instead of adding another one.
    pub async fn new_conversation(&self) -> Result<Conversation> {
        let _guard = self.mutation_lock.lock().await;
        let mut conversations = self.conversation_repository.get_all()?;

        if let Some(last) = conversations.last() {
            if last.is_empty() && last.has_default_name() {
                debug!("Reusing empty conversation {}", last.id);
                self.conversation_repository.set_active_id(last.id)?;
                return Ok(last.clone());
            }
        }

        let id = next_id(self.clock.now_millis(), conversations.iter().map(|c| c.id));
        let conversation = Conversation::new(id, Conversation::default_name(conversations.len() + 1));
        conversations.push(conversation.clone());
        self.conversation_repository.save_all(&conversations)?;
        self.conversation_repository.set_active_id(id)?;

        info!("Created conversation {} '{}'", id, conversation.name);
        Ok(conversation)
    }

    pub async fn select(&self, id: i64) -> Result<Conversation> {
        let _guard = self.mutation_lock.lock().await;
        let conversation = self.find(id)?;
        self.conversation_repository.set_active_id(id)?;
        debug!("Selected conversation {}", id);
        Ok(conversation)
    }

    /// Renames a conversation. The name is trimmed and must not be empty.
    pub async fn rename(&self, id: i64, name: &str) -> Result<Conversation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ResponderError::validation("Conversation name must not be empty"));
        }

        let _guard = self.mutation_lock.lock().await;
        let conversation = self
            .conversation_repository
            .update(id, &mut |c: &mut Conversation| c.name = name.to_string())?;
        info!("Renamed conversation {} to '{}'", id, name);
        Ok(conversation)
    }

    /// Deletes a conversation.
    ///
    /// Deleting the selected conversation selects the first remaining one;
    /// deleting the last one leaves a fresh empty conversation.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let mut conversations = self.conversation_repository.get_all()?;
        let before = conversations.len();
        conversations.retain(|c| c.id != id);
        if conversations.len() == before {
            return Err(ResponderError::not_found("conversation", id.to_string()));
        }

        if conversations.is_empty() {
            conversations.push(Conversation::new(
                next_id(self.clock.now_millis(), std::iter::once(id)),
                Conversation::default_name(1),
            ));
        }
        self.conversation_repository.save_all(&conversations)?;

        if self.conversation_repository.active_id()? == Some(id) {
            self.conversation_repository.set_active_id(conversations[0].id)?;
        }

        info!("Deleted conversation {}", id);
        Ok(())
    }

    /// Removes every exchange of a conversation, keeping its name.
    pub async fn clear_history(&self, id: i64) -> Result<Conversation> {
        let _guard = self.mutation_lock.lock().await;
        let conversation = self
            .conversation_repository
            .update(id, &mut |c: &mut Conversation| c.clear_history())?;
        info!("Cleared history of conversation {}", id);
        Ok(conversation)
    }

    /// Records feedback on an exchange of the selected conversation.
    pub async fn set_feedback(&self, item_id: i64, feedback: Feedback) -> Result<HistoryItem> {
        let active = self.active_conversation().await?;

        let _guard = self.mutation_lock.lock().await;
        let mut found = false;
        let conversation = self
            .conversation_repository
            .update(active.id, &mut |c: &mut Conversation| {
                found = c.set_feedback(item_id, feedback)
            })?;
        if !found {
            return Err(ResponderError::not_found("history item", item_id.to_string()));
        }

        conversation
            .history
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ResponderError::not_found("history item", item_id.to_string()))
    }

    /// Clipboard transcript of a conversation, oldest exchange first.
    pub fn copy_transcript(&self, id: i64) -> Result<String> {
        let conversation = self.find(id)?;
        let profile = self.profile_repository.load_or_init()?;
        Ok(conversation.transcript(&profile.name))
    }

    fn find(&self, id: i64) -> Result<Conversation> {
        self.conversation_repository
            .find_by_id(id)?
            .ok_or_else(|| ResponderError::not_found("conversation", id.to_string()))
    }

    // ========================================================================
    // Export, import and sharing
    // ========================================================================

    /// All conversations as a pretty-printed, versioned JSON array.
    pub fn export_all(&self) -> Result<String> {
        export_json(&self.conversation_repository.get_all()?)
    }

    /// Appends conversations from an export document (array or single object).
    ///
    /// Imported conversations whose ID is already taken get a new one.
    /// Unreadable entries are skipped.
    pub async fn import(&self, json: &str) -> Result<Vec<Conversation>> {
        let incoming = parse_conversations(json)?;
        if incoming.is_empty() {
            return Err(ResponderError::validation("No conversations found to import"));
        }

        let _guard = self.mutation_lock.lock().await;
        let mut conversations = self.conversation_repository.get_all()?;
        let imported = self.append_with_fresh_ids(&mut conversations, incoming);
        self.conversation_repository.save_all(&conversations)?;

        info!("Imported {} conversations", imported.len());
        Ok(imported)
    }

    /// Share link for a conversation (the selected one when `id` is `None`).
    pub async fn share_link(&self, id: Option<i64>) -> Result<String> {
        let conversation = match id {
            Some(id) => self.find(id)?,
            None => self.active_conversation().await?,
        };
        encode_share_link(&conversation, &self.share_base_url)
    }

    /// Adds the conversation carried by a share link and selects it.
    pub async fn open_shared(&self, link: &str) -> Result<Conversation> {
        let shared = decode_share_link(link)?;

        let _guard = self.mutation_lock.lock().await;
        let mut conversations = self.conversation_repository.get_all()?;
        let mut added = self.append_with_fresh_ids(&mut conversations, vec![shared]);
        let conversation = added
            .pop()
            .ok_or_else(|| ResponderError::internal("Shared conversation was not added"))?;
        self.conversation_repository.save_all(&conversations)?;
        self.conversation_repository.set_active_id(conversation.id)?;

        info!("Opened shared conversation as {}", conversation.id);
        Ok(conversation)
    }

    fn append_with_fresh_ids(
        &self,
        conversations: &mut Vec<Conversation>,
        incoming: Vec<Conversation>,
    ) -> Vec<Conversation> {
        let now = self.clock.now_millis();
        let mut taken: HashSet<i64> = conversations.iter().map(|c| c.id).collect();

        let added: Vec<Conversation> = incoming
            .into_iter()
            .map(|mut conversation| {
                if taken.contains(&conversation.id) {
                    let id = next_id(now, taken.iter().copied());
                    debug!("Reassigning conversation id {} -> {}", conversation.id, id);
                    conversation.id = id;
                }
                taken.insert(conversation.id);
                conversation
            })
            .collect();

        conversations.extend(added.iter().cloned());
        added
    }

    // ========================================================================
    // Profile and settings
    // ========================================================================

    pub fn profile(&self) -> Result<Profile> {
        self.profile_repository.load_or_init()
    }

    /// Replaces the profile. The name is trimmed and must not be empty.
    pub fn update_profile(&self, mut profile: Profile) -> Result<Profile> {
        profile.name = profile.name.trim().to_string();
        if profile.name.is_empty() {
            return Err(ResponderError::validation("Profile name must not be empty"));
        }
        profile.portfolio_url = profile
            .portfolio_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        self.profile_repository.save(&profile)?;
        info!("Updated profile for {} ({})", profile.name, profile.role);
        Ok(profile)
    }

    /// Quick prompts for the profile's role.
    pub fn quick_prompts(&self) -> Result<&'static [QuickPrompt]> {
        Ok(prompt_library(self.profile()?.role))
    }

    pub fn theme(&self) -> Result<Theme> {
        self.settings_repository.theme()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme> {
        self.settings_repository.set_theme(theme)?;
        Ok(theme)
    }

    /// Switches between dark and light.
    pub fn toggle_theme(&self) -> Result<Theme> {
        self.set_theme(self.theme()?.toggled())
    }

    /// Whether a key is available from the environment or storage.
    pub fn has_api_key(&self) -> Result<bool> {
        Ok(self.api_key_override.is_some() || self.settings_repository.api_key()?.is_some())
    }

    pub fn set_api_key(&self, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(ResponderError::validation("API key must not be empty"));
        }
        self.settings_repository.set_api_key(key)
    }

    pub fn clear_api_key(&self) -> Result<()> {
        self.settings_repository.clear_api_key()
    }
}

/// `now`, or one past the largest existing ID when `now` is already taken
/// or behind it.
fn next_id(now: i64, existing: impl Iterator<Item = i64>) -> i64 {
    match existing.max() {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}
