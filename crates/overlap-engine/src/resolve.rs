//! Wall-clock resolution: the inverse of the zone oracle.
//!
//! Given a calendar date/time with no attached offset and a zone, find the
//! absolute instant at which that zone observes exactly that reading. The
//! oracle exposes the local→instant primitive directly
//! ([`TimeZone::from_local_datetime`]), so resolution is one lookup plus an
//! explicit policy for the two DST edge cases:
//!
//! - **Ambiguous** local times (the repeated hour of a "fall back"
//!   transition) resolve to the **earlier** of the two candidate instants.
//! - **Non-existent** local times (the skipped hour of a "spring forward"
//!   transition) are pushed **forward** past the gap in 15-minute probes —
//!   real-world transitions shift by multiples of 15 minutes — so an input
//!   inside the gap lands on the first wall-clock minute the zone actually
//!   observes after it.
//!
//! Input text is never interpreted relative to the process-local zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{ConvertError, Result};
use crate::oracle::detect_zone_token;

/// Gap probing stops after 3 hours; no tzdb transition skips more.
const MAX_GAP_PROBES: u32 = 12;

/// A resolved user input: the absolute instant plus the zone it was read in
/// (which may differ from the requested zone when the text embedded one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInput {
    pub instant: DateTime<Utc>,
    pub zone: Tz,
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve a wall-clock reading in a zone to the instant it names.
///
/// Total: every reading maps to an instant under the gap/ambiguity policy
/// above. If gap probing ever exhausts (it cannot for tzdb data), the naive
/// UTC interpretation of the reading is returned unmodified.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use overlap_engine::resolve::resolve_local;
///
/// let wall = NaiveDate::from_ymd_opt(2025, 6, 15)
///     .unwrap()
///     .and_hms_opt(14, 0, 0)
///     .unwrap();
/// let instant = resolve_local(wall, chrono_tz::Europe::London);
/// // June is BST (UTC+1), so 14:00 local is 13:00 UTC.
/// assert_eq!(instant.to_rfc3339(), "2025-06-15T13:00:00+00:00");
/// ```
pub fn resolve_local(wall: NaiveDateTime, zone: Tz) -> DateTime<Utc> {
    if let Some(dt) = zone.from_local_datetime(&wall).earliest() {
        return dt.with_timezone(&Utc);
    }

    // Inside a spring-forward gap: probe forward until the zone observes
    // the wall-clock reading again.
    let mut probe = wall;
    for _ in 0..MAX_GAP_PROBES {
        probe = probe + Duration::minutes(15);
        if let Some(dt) = zone.from_local_datetime(&probe).earliest() {
            return dt.with_timezone(&Utc);
        }
    }

    Utc.from_utc_datetime(&wall)
}

/// Resolve free-form user text against a requested zone.
///
/// Three input paths, tried in order:
///
/// 1. An embedded zone mention (`"… PST"`, `"… Asia/Tokyo"`) overrides the
///    requested zone before anything else is parsed.
/// 2. An ISO-shaped local reading (`YYYY-MM-DDTHH:MM`, with optional seconds
///    or a space separator) is resolved in that zone.
/// 3. Text the generic parsers accept (RFC 3339 with offset, RFC 2822) is
///    taken as a UTC reading and re-anchored into the zone, so a pasted
///    `…T14:00:00Z` behaves like typing `14:00` UTC.
///
/// # Errors
///
/// Returns [`ConvertError::UnresolvableInstant`] for empty input or text
/// none of the parsers accept. The caller surfaces this as a placeholder,
/// not a fault.
pub fn resolve_input(text: &str, zone: Tz) -> Result<ResolvedInput> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::UnresolvableInstant("empty input".to_string()));
    }

    let (zone, cleaned) = match detect_zone_token(trimmed) {
        Some((detected, rest)) => (detected, rest),
        None => (zone, trimmed.to_string()),
    };

    if let Some(wall) = parse_wall_clock(&cleaned) {
        return Ok(ResolvedInput {
            instant: resolve_local(wall, zone),
            zone,
        });
    }

    if let Some(utc_reading) = parse_generic_utc(&cleaned) {
        return Ok(ResolvedInput {
            instant: resolve_local(utc_reading, zone),
            zone,
        });
    }

    Err(ConvertError::UnresolvableInstant(format!("'{}'", cleaned)))
}

// ── Input parsing ───────────────────────────────────────────────────────────

/// Parse an ISO-shaped local reading, truncated to the minute.
///
/// Accepts `T` or space as the date/time separator and tolerates a seconds
/// field. No offset suffix — a reading with an offset is not "local" and is
/// handled by the generic path instead.
pub fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    const SHAPES: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for shape in SHAPES {
        if let Ok(wall) = NaiveDateTime::parse_from_str(s, shape) {
            return wall.with_second(0);
        }
    }
    // Bare date: start of day.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse offset-carrying text into its UTC reading, truncated to the minute.
fn parse_generic_utc(s: &str) -> Option<NaiveDateTime> {
    let parsed = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()?;
    parsed.naive_utc().with_second(0)
}
