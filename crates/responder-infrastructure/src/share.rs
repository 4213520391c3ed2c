//! Share links.
//!
//! A share link carries one conversation in its fragment:
//! `<base_url>#share=<payload>`, where the payload is the versioned
//! conversation JSON in URL-safe base64 without padding.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

use crate::conversation_codec::{decode_conversation, encode_conversation};
use responder_core::conversation::Conversation;
use responder_core::error::{ResponderError, Result};

/// Fragment marker preceding the payload.
pub const SHARE_FRAGMENT: &str = "#share=";

/// Builds a share link for `conversation`.
pub fn encode_share_link(conversation: &Conversation, base_url: &str) -> Result<String> {
    let json = serde_json::to_string(&encode_conversation(conversation)?)?;
    let payload = URL_SAFE_NO_PAD.encode(json.as_bytes());
    Ok(format!(
        "{}{SHARE_FRAGMENT}{payload}",
        base_url.trim_end_matches('#')
    ))
}

/// Decodes a share link or a bare payload.
///
/// Standard and URL-safe base64 are both accepted, with or without padding.
pub fn decode_share_link(link: &str) -> Result<Conversation> {
    let link = link.trim();
    let payload = match link.rfind(SHARE_FRAGMENT) {
        Some(pos) => &link[pos + SHARE_FRAGMENT.len()..],
        None => link,
    };
    if payload.is_empty() {
        return Err(ResponderError::validation("Share link has no payload"));
    }

    let bytes = decode_base64(payload)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    decode_conversation(value)
}

fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let engine = match (
        payload.contains(['-', '_']),
        payload.ends_with('='),
    ) {
        (true, true) => URL_SAFE,
        (true, false) => URL_SAFE_NO_PAD,
        (false, true) => STANDARD,
        (false, false) => {
            // No distinguishing characters: both alphabets agree, padding decides.
            if payload.len() % 4 == 0 {
                STANDARD
            } else {
                STANDARD_NO_PAD
            }
        }
    };
    Ok(engine.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use responder_core::conversation::HistoryItem;
    use responder_core::generation::{ModelId, ResponseStyle, Tone};

    fn sample() -> Conversation {
        let mut conversation = Conversation::new(42, "Client Conversation 1");
        conversation.push_item(HistoryItem {
            id: 43,
            client_message: "Can you build a landing page?? <ok>".to_string(),
            generated_response: "Absolutely!".to_string(),
            tone: Tone::Enthusiastic,
            response_style: ResponseStyle::Default,
            model_id: ModelId::Flash,
            search_results: Vec::new(),
            feedback: None,
        });
        conversation
    }

    #[test]
    fn test_link_shape() {
        let link = encode_share_link(&sample(), "https://example.com/app").unwrap();
        assert!(link.starts_with("https://example.com/app#share="));
        let payload = link.split(SHARE_FRAGMENT).nth(1).unwrap();
        assert!(!payload.contains(['+', '/', '=']));
    }

    #[test]
    fn test_decode_link_and_bare_payload() {
        let conversation = sample();
        let link = encode_share_link(&conversation, "https://example.com/").unwrap();
        assert_eq!(decode_share_link(&link).unwrap(), conversation);

        let payload = link.split(SHARE_FRAGMENT).nth(1).unwrap();
        assert_eq!(decode_share_link(payload).unwrap(), conversation);
    }

    #[test]
    fn test_decode_standard_base64_legacy_payload() {
        let json = r#"{"id":1,"name":"Old","history":[{"id":2,"clientMessage":"hi","generatedResponse":"hello","tone":"Casual","responseStyle":"Default","generationMode":"Thinking"}]}"#;
        let payload = STANDARD.encode(json);
        let conversation = decode_share_link(&format!("https://x/#share={payload}")).unwrap();
        assert_eq!(conversation.name, "Old");
        assert_eq!(conversation.history[0].model_id, ModelId::Pro);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_share_link("https://x/#share=").is_err());
        assert!(decode_share_link("!!!not base64!!!").is_err());
    }
}
