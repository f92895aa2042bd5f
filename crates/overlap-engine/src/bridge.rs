//! Natural-language input via an external assistant capability.
//!
//! The engine does no language understanding of its own. When the host
//! environment exposes an on-device text-generation capability, free text
//! like "next Monday 2pm in New York" is sent through a fixed instruction
//! template and the reply is expected to contain one strict-JSON object
//! `{"iso": "YYYY-MM-DDTHH:MM", "iana": "..."}`. Everything outside the
//! first `{` … last `}` span is discarded before decoding, since models
//! routinely wrap the object in prose.
//!
//! Without a capability the feature is simply unavailable — there is no
//! network fallback. A reply that fails to decode mutates nothing: the
//! caller keeps its previous wall-clock and zone untouched.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{ConvertError, Result};

/// One-shot prompt/response channel to the host's assistant.
///
/// Implementations wrap whatever the host environment provides; the engine
/// only ever sends one UTF-8 instruction and reads back one reply string.
pub trait AssistantCapability {
    fn complete(&self, instruction: &str) -> Result<String>;
}

/// What the assistant understood: a wall-clock string ready for the
/// resolver, plus an optional validated zone override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhrase {
    /// Local datetime in `YYYY-MM-DDTHH:MM` form, minute precision.
    pub wall_clock: String,
    /// Present only when the reply named a zone in the supported set;
    /// any other suggestion is dropped silently.
    pub zone: Option<Tz>,
}

/// Raw reply shape. `iana` is commonly omitted or empty.
#[derive(Debug, Deserialize)]
struct AssistantReply {
    iso: String,
    #[serde(default)]
    iana: String,
}

/// The fixed instruction template for a piece of user text.
pub fn instruction_for(text: &str) -> String {
    format!(
        "Parse the following natural language time expression and return JSON \
         with two fields:\n\
         - \"iso\": local datetime in YYYY-MM-DDTHH:MM,\n\
         - \"iana\": IANA timezone if mentioned or empty string.\n\
         Return only JSON.\n\
         Text: \"{}\"",
        text
    )
}

/// Decode an assistant reply into a [`ParsedPhrase`].
///
/// # Errors
///
/// Returns [`ConvertError::BridgeParse`] when the reply contains no
/// `{ … }` span, the span is not valid JSON, or `iso` is missing/empty. An
/// unsupported `iana` value is not an error — the zone is ignored.
pub fn parse_reply(reply: &str) -> Result<ParsedPhrase> {
    let start = reply
        .find('{')
        .ok_or_else(|| ConvertError::BridgeParse("no JSON object in reply".to_string()))?;
    let end = reply
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| ConvertError::BridgeParse("no JSON object in reply".to_string()))?;

    let decoded: AssistantReply = serde_json::from_str(&reply[start..=end])
        .map_err(|e| ConvertError::BridgeParse(format!("bad JSON: {e}")))?;

    if decoded.iso.is_empty() {
        return Err(ConvertError::BridgeParse("reply has no iso field".to_string()));
    }

    // Minute precision: "2025-06-15 14:00:30" → "2025-06-15T14:00".
    let mut wall_clock = decoded.iso.replace(' ', "T");
    wall_clock.truncate(16);

    let zone = if decoded.iana.is_empty() {
        None
    } else {
        decoded.iana.parse::<Tz>().ok()
    };

    Ok(ParsedPhrase { wall_clock, zone })
}

/// Run the user's text through the capability, if one is present.
///
/// # Errors
///
/// [`ConvertError::BridgeUnavailable`] without a capability;
/// [`ConvertError::BridgeParse`] when the reply does not decode; any error
/// the capability itself reports.
pub fn interpret(
    capability: Option<&dyn AssistantCapability>,
    text: &str,
) -> Result<ParsedPhrase> {
    let capability = capability.ok_or(ConvertError::BridgeUnavailable)?;
    let reply = capability.complete(&instruction_for(text))?;
    parse_reply(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedAssistant(&'static str);

    impl AssistantCapability for CannedAssistant {
        fn complete(&self, _instruction: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_instruction_embeds_text_and_contract() {
        let instruction = instruction_for("tomorrow 2pm");
        assert!(instruction.contains("Text: \"tomorrow 2pm\""));
        assert!(instruction.contains("\"iso\""));
        assert!(instruction.contains("\"iana\""));
        assert!(instruction.contains("Return only JSON."));
    }

    #[test]
    fn test_parse_plain_object() {
        let p = parse_reply(r#"{"iso": "2025-06-15T14:00", "iana": "Europe/London"}"#).unwrap();
        assert_eq!(p.wall_clock, "2025-06-15T14:00");
        assert_eq!(p.zone, Some(chrono_tz::Europe::London));
    }

    #[test]
    fn test_parse_object_wrapped_in_prose() {
        let reply = r#"Sure! Here is the JSON you asked for:
{"iso": "2025-06-15T14:00", "iana": ""}
Let me know if you need anything else."#;
        let p = parse_reply(reply).unwrap();
        assert_eq!(p.wall_clock, "2025-06-15T14:00");
        assert_eq!(p.zone, None);
    }

    #[test]
    fn test_parse_truncates_to_minute() {
        let p = parse_reply(r#"{"iso": "2025-06-15 14:00:30"}"#).unwrap();
        assert_eq!(p.wall_clock, "2025-06-15T14:00");
    }

    #[test]
    fn test_parse_unsupported_zone_is_ignored_not_error() {
        let p = parse_reply(r#"{"iso": "2025-06-15T14:00", "iana": "Moon/Tranquility"}"#).unwrap();
        assert_eq!(p.zone, None);
        assert_eq!(p.wall_clock, "2025-06-15T14:00");
    }

    #[test]
    fn test_parse_no_braces_fails() {
        let err = parse_reply("Sorry, I can't help.").unwrap_err();
        assert!(matches!(err, ConvertError::BridgeParse(_)), "got: {err}");
    }

    #[test]
    fn test_parse_bad_json_fails() {
        assert!(parse_reply("{iso: nope}").is_err());
    }

    #[test]
    fn test_parse_missing_iso_fails() {
        let err = parse_reply(r#"{"iana": "UTC"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::BridgeParse(_)), "got: {err}");
    }

    #[test]
    fn test_interpret_without_capability_is_unavailable() {
        let err = interpret(None, "tomorrow 2pm").unwrap_err();
        assert!(matches!(err, ConvertError::BridgeUnavailable));
    }

    #[test]
    fn test_interpret_with_capability() {
        let assistant = CannedAssistant(r#"{"iso": "2025-06-16T09:00", "iana": "Asia/Tokyo"}"#);
        let p = interpret(Some(&assistant), "tomorrow morning in Tokyo").unwrap();
        assert_eq!(p.wall_clock, "2025-06-16T09:00");
        assert_eq!(p.zone, Some(chrono_tz::Asia::Tokyo));
    }
}
