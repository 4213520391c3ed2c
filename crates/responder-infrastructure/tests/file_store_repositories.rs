//! Repositories backed by the file store, including data written by the
//! browser build of the app.

use std::fs;
use std::sync::Arc;

use responder_core::conversation::{ConversationRepository, Feedback};
use responder_core::generation::{ModelId, ResponseStyle};
use responder_core::profile::{Language, ProfileRepository, UserRole};
use responder_core::rate_limit::{ManualClock, RateLimitConfig, RateLimiter};
use responder_core::settings::{SettingsRepository, Theme};
use responder_core::storage::KeyValueStore;
use responder_infrastructure::{
    JsonFileStore, KvConversationRepository, KvProfileRepository, KvSettingsRepository,
};
use tempfile::TempDir;

const BROWSER_PROFILE: &str = r#"{"name":"Ana","role":"Student","skills":"Biology","experience":"Lab assistant 2 yrs","portfolioUrl":""}"#;

const BROWSER_CONVERSATIONS: &str = r#"[
  {"id":1700000000000,"name":"Can we reschedule our meeting?","history":[
    {"id":1700000005000,"clientMessage":"And Friday?","generatedResponse":"Friday works.","tone":"Formal","responseStyle":"Short & Sweet","generationMode":"Thinking","feedback":"good"},
    {"id":1700000001000,"clientMessage":"Can we reschedule our meeting?","generatedResponse":"Of course.","tone":"Formal","responseStyle":"Short & Sweet","generationMode":"Balanced","searchResults":[{"uri":"https://a","title":"A"}]}
  ]},
  {"id":1700000009000,"name":"Client Conversation 2","history":[]}
]"#;

fn seed(dir: &TempDir, key: &str, value: &str) {
    fs::write(dir.path().join(format!("{key}.json")), value).unwrap();
}

#[test]
fn test_browser_data_loads_through_file_store() {
    let dir = TempDir::new().unwrap();
    seed(&dir, "freelancerProfile", BROWSER_PROFILE);
    seed(&dir, "conversations", BROWSER_CONVERSATIONS);
    seed(&dir, "activeConversationId", "1700000009000");
    seed(&dir, "theme", "light");

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(dir.path()).unwrap());

    let profile = KvProfileRepository::new(store.clone()).load().unwrap().unwrap();
    assert_eq!(profile.role, UserRole::Student);
    assert_eq!(profile.language, Language::English);
    assert_eq!(profile.portfolio(), None);

    let conversations = KvConversationRepository::new(store.clone());
    let all = conversations.get_all().unwrap();
    assert_eq!(all.len(), 2);
    let first = &all[0];
    assert_eq!(first.history[0].model_id, ModelId::Pro);
    assert_eq!(first.history[0].feedback, Some(Feedback::Good));
    assert_eq!(first.history[1].model_id, ModelId::Flash);
    assert_eq!(first.history[1].response_style, ResponseStyle::ShortAndSweet);
    assert_eq!(conversations.active_id().unwrap(), Some(1_700_000_009_000));

    assert_eq!(
        KvSettingsRepository::new(store).theme().unwrap(),
        Theme::Light
    );
}

#[test]
fn test_saving_upgrades_stored_records() {
    let dir = TempDir::new().unwrap();
    seed(&dir, "conversations", BROWSER_CONVERSATIONS);
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(dir.path()).unwrap());

    let repo = KvConversationRepository::new(store);
    let all = repo.get_all().unwrap();
    repo.save_all(&all).unwrap();

    let raw = fs::read_to_string(dir.path().join("conversations.json")).unwrap();
    assert!(raw.contains("\"version\":\"1.1.0\""));
    assert!(raw.contains("\"modelId\":\"gemini-2.5-pro\""));
    assert!(!raw.contains("generationMode"));
    assert_eq!(repo.get_all().unwrap(), all);
}

#[test]
fn test_rate_limit_state_is_shared_across_store_handles() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(1_700_000_000_000);
    let limiter = |store: JsonFileStore| {
        RateLimiter::with_clock(
            Arc::new(store),
            Arc::new(clock.clone()),
            RateLimitConfig {
                max_requests: 2,
                window_ms: 60_000,
            },
        )
    };

    let first = limiter(JsonFileStore::open(dir.path()).unwrap());
    first.record_request().unwrap();
    first.record_request().unwrap();

    let second = limiter(JsonFileStore::open(dir.path()).unwrap());
    let decision = second.check_limit();
    assert!(decision.is_limited);
    assert_eq!(decision.wait_ms, 60_000);
}
