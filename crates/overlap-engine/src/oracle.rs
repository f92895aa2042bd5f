//! Zone oracle: local readings, zone validation, and zone lookup.
//!
//! chrono-tz is the trusted source of offset rules. This module wraps the
//! two questions the rest of the engine asks of it — "what does zone `z`
//! read at instant `t`?" and "is this string a zone we support?" — plus the
//! user-facing lookup helpers (fuzzy search, abbreviation detection) that a
//! picker widget needs.
//!
//! Unknown zone identifiers are always rejected, never coerced to a nearby
//! or default zone.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{ConvertError, Result};

/// Common zone abbreviations mapped to a canonical IANA zone.
///
/// Abbreviations are ambiguous in general (CST is observed on three
/// continents); these mappings follow the most common usage and match what
/// the conversion widget historically accepted.
pub const ZONE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("GMT", "UTC"),
    ("EST", "America/New_York"),
    ("EDT", "America/New_York"),
    ("CST", "America/Chicago"),
    ("CDT", "America/Chicago"),
    ("MST", "America/Denver"),
    ("MDT", "America/Denver"),
    ("PST", "America/Los_Angeles"),
    ("PDT", "America/Los_Angeles"),
    ("CET", "Europe/Paris"),
    ("CEST", "Europe/Paris"),
    ("JST", "Asia/Tokyo"),
    ("IST", "Asia/Kolkata"),
    ("AEST", "Australia/Sydney"),
    ("AEDT", "Australia/Sydney"),
    ("NZST", "Pacific/Auckland"),
    ("NZDT", "Pacific/Auckland"),
];

/// Search-only aliases: place nicknames that should surface a zone in the
/// picker but are too loose to override a zone in free text.
pub const ZONE_ALIASES: &[(&str, &str)] = &[
    ("INDIA", "Asia/Kolkata"),
    ("LONDON", "Europe/London"),
    ("UK", "Europe/London"),
    ("PARIS", "Europe/Paris"),
    ("TOKYO", "Asia/Tokyo"),
    ("SYDNEY", "Australia/Sydney"),
];

// ── Local readings ──────────────────────────────────────────────────────────

/// The calendar date and clock time a zone observes at an instant.
///
/// This is the oracle's full answer; every derived computation (offsets, day
/// relations, slot membership) is built from these fields rather than from
/// zone rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalReading {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalReading {
    /// The reading `zone` observes at `instant`.
    pub fn at(instant: DateTime<Utc>, zone: Tz) -> Self {
        let local = instant.with_timezone(&zone);
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        }
    }

    /// Zero-padded `YYYY-MM-DDTHH:MM` rendering, truncated to the minute.
    ///
    /// Lexicographic order of this key matches instant order for a fixed
    /// zone between DST transitions, which is what makes it usable both for
    /// display round-trips and for ordering comparisons.
    pub fn minute_key(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }

    /// The calendar date collapsed to a single sortable integer
    /// (`year * 10000 + month * 100 + day`).
    pub fn date_number(&self) -> i64 {
        self.year as i64 * 10_000 + self.month as i64 * 100 + self.day as i64
    }

    /// Clock time as a decimal hour (`hour + minute / 60`).
    pub fn decimal_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

// ── Zone validation and enumeration ─────────────────────────────────────────

/// Parse an IANA zone identifier (or `UTC`) into a validated zone.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedZone`] for any identifier outside the
/// supported set.
pub fn parse_zone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| ConvertError::UnsupportedZone(format!("'{}'", s)))
}

/// Every zone the engine supports, in tzdb order.
///
/// The widget queries this once at startup to populate its pickers.
pub fn supported_zones() -> &'static [Tz] {
    &chrono_tz::TZ_VARIANTS
}

// ── Zone lookup ─────────────────────────────────────────────────────────────

/// Lowercase a string and drop everything that is not ASCII alphanumeric.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Fuzzy search over zone names and aliases.
///
/// Matching is case- and punctuation-insensitive substring containment, so
/// `"new york"`, `"NewYork"` and `"new_york"` all find
/// `America/New_York`. An empty query returns every supported zone.
pub fn search_zones(query: &str) -> Vec<Tz> {
    let nq = normalize(query);
    if nq.is_empty() {
        return supported_zones().to_vec();
    }

    let mut matches: Vec<Tz> = Vec::new();
    let mut push = |tz: Tz| {
        if !matches.contains(&tz) {
            matches.push(tz);
        }
    };

    for (alias, target) in ZONE_ABBREVIATIONS.iter().chain(ZONE_ALIASES) {
        if normalize(alias).contains(&nq) {
            if let Ok(tz) = parse_zone(target) {
                push(tz);
            }
        }
    }
    for &tz in supported_zones() {
        if normalize(tz.name()).contains(&nq) {
            push(tz);
        }
    }
    matches
}

/// Scan free text for an embedded zone mention.
///
/// Recognizes IANA identifiers (`Europe/London`) and the abbreviations in
/// [`ZONE_ABBREVIATIONS`]. On a hit, returns the zone and the text with the
/// mention removed; unrecognized mentions are left in place and ignored.
///
/// # Examples
///
/// ```
/// use overlap_engine::oracle::detect_zone_token;
///
/// let (tz, rest) = detect_zone_token("2025-06-15T14:00 EST").unwrap();
/// assert_eq!(tz.name(), "America/New_York");
/// assert_eq!(rest, "2025-06-15T14:00");
/// ```
pub fn detect_zone_token(text: &str) -> Option<(Tz, String)> {
    for token in text.split_whitespace() {
        let trimmed = token.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '/' && c != '_');
        if trimmed.is_empty() {
            continue;
        }

        let found = if trimmed.contains('/') {
            trimmed.parse::<Tz>().ok()
        } else {
            let upper = trimmed.to_ascii_uppercase();
            ZONE_ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == upper)
                .and_then(|(_, target)| target.parse::<Tz>().ok())
        };

        if let Some(tz) = found {
            let mut removed = false;
            let rest: Vec<&str> = text
                .split_whitespace()
                .filter(|t| {
                    if !removed && *t == token {
                        removed = true;
                        false
                    } else {
                        true
                    }
                })
                .collect();
            return Some((tz, rest.join(" ")));
        }
    }
    None
}
