//! Cross-zone conversion: offsets, day relations, and display rendering.
//!
//! Everything here is a pure function of (instant, zone, zone). Formatting
//! helpers take `Option` inputs and degrade to a placeholder (`—`,
//! `±?? hrs`) for the missing side — a failure to render one zone's field
//! never suppresses the other zone's fields, and nothing in this module
//! panics or raises.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::oracle::LocalReading;

/// Placeholder for a field whose inputs are absent or unrenderable.
pub const PLACEHOLDER: &str = "—";

/// How the target zone's calendar date relates to the source zone's at the
/// same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayRelation {
    SameDay,
    PreviousDay,
    NextDay,
}

/// A full cross-zone conversion, ready for display.
///
/// Each field is independently either a real value or its placeholder;
/// `sentence` is present only when both sides rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Source-zone reading, medium form (`Jun 15, 2025, 14:00`), or `—`.
    pub from_formatted: String,
    /// Target-zone reading, medium form, or `—`.
    pub to_formatted: String,
    /// Target-zone clock time, short form (`09:00`), or `—`.
    pub to_short: String,
    /// Signed zone difference in hours, absent when either zone is missing.
    pub offset_delta_hours: Option<f64>,
    /// Rendered difference (`-5 hrs`, `+5:30 hrs`, `±?? hrs`).
    pub delta_label: String,
    /// Calendar-date relation, absent when either zone is missing.
    pub day_relation: Option<DayRelation>,
    /// `"<from> (<zone>) is [(next day) ]<time> (<delta> hrs) in <zone>."`
    pub sentence: Option<String>,
}

// ── Offsets ─────────────────────────────────────────────────────────────────

/// A zone's UTC offset at an instant, in minutes. East of UTC is positive.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use overlap_engine::convert::offset_minutes;
///
/// let instant = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
/// assert_eq!(offset_minutes(chrono_tz::UTC, instant), 0);
/// assert_eq!(offset_minutes(chrono_tz::Asia::Tokyo, instant), 540);
/// ```
pub fn offset_minutes(zone: Tz, instant: DateTime<Utc>) -> i64 {
    let local = instant.with_timezone(&zone);
    local.offset().fix().local_minus_utc() as i64 / 60
}

/// Signed hour difference between two zones at an instant
/// (`to` minus `from`; negative means `to` is behind).
pub fn offset_delta_hours(from: Tz, to: Tz, instant: DateTime<Utc>) -> f64 {
    (offset_minutes(to, instant) - offset_minutes(from, instant)) as f64 / 60.0
}

/// Render a signed hour difference as `+H[:MM] hrs` / `-H[:MM] hrs`.
/// Minutes appear only when nonzero; an absent value renders `±?? hrs`.
pub fn delta_label(delta_hours: Option<f64>) -> String {
    let Some(val) = delta_hours else {
        return "±?? hrs".to_string();
    };
    let sign = if val >= 0.0 { "+" } else { "-" };
    let abs = val.abs();
    let h = abs.floor() as i64;
    let m = ((abs - abs.floor()) * 60.0).round() as i64;
    if m != 0 {
        format!("{sign}{h}:{m:02} hrs")
    } else {
        format!("{sign}{h} hrs")
    }
}

/// Render a zone's UTC offset at an instant as `+09:00` / `-05:00`.
pub fn offset_label(zone: Tz, instant: DateTime<Utc>) -> String {
    let offset_min = offset_minutes(zone, instant);
    let sign = if offset_min >= 0 { "+" } else { "-" };
    let abs = offset_min.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

// ── Day relation ────────────────────────────────────────────────────────────

/// Compare the calendar date each zone observes at the same instant.
///
/// Display annotation only — it never alters the instant.
pub fn day_relation(from: Tz, to: Tz, instant: DateTime<Utc>) -> DayRelation {
    let from_date = LocalReading::at(instant, from).date_number();
    let to_date = LocalReading::at(instant, to).date_number();
    if to_date > from_date {
        DayRelation::NextDay
    } else if to_date < from_date {
        DayRelation::PreviousDay
    } else {
        DayRelation::SameDay
    }
}

// ── Formatting ──────────────────────────────────────────────────────────────

/// Medium date + short time in a zone (`Jun 15, 2025, 14:00`), or `—`.
pub fn format_for_zone(instant: Option<DateTime<Utc>>, zone: Option<Tz>) -> String {
    match (instant, zone) {
        (Some(i), Some(z)) => i.with_timezone(&z).format("%b %-d, %Y, %H:%M").to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Short clock time in a zone (`09:00`), or `—`.
pub fn short_time_for_zone(instant: Option<DateTime<Utc>>, zone: Option<Tz>) -> String {
    match (instant, zone) {
        (Some(i), Some(z)) => i.with_timezone(&z).format("%H:%M").to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// The `YYYY-MM-DDTHH:MM` reading of an instant in a zone, or empty when a
/// side is absent. This is the string that round-trips through the resolver.
pub fn local_iso_for_zone(instant: Option<DateTime<Utc>>, zone: Option<Tz>) -> String {
    match (instant, zone) {
        (Some(i), Some(z)) => LocalReading::at(i, z).minute_key(),
        _ => String::new(),
    }
}

/// 12-hour clock rendering of an hour/minute pair (`2:05 PM`; hour 0 is
/// `12:.. AM`).
pub fn format_12_hour(hour: u32, minute: u32) -> String {
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    format!("{hour12}:{minute:02} {ampm}")
}

/// Short time in `zone`, prefixed with its local date (`Jun 16, 2025`) when
/// that date differs from the one `base_zone` observes at `base_instant`.
pub fn format_time_with_date_if_different(
    instant: Option<DateTime<Utc>>,
    zone: Tz,
    base_instant: Option<DateTime<Utc>>,
    base_zone: Tz,
) -> String {
    let (Some(i), Some(base)) = (instant, base_instant) else {
        return PLACEHOLDER.to_string();
    };
    let time = short_time_for_zone(Some(i), Some(zone));
    let date = LocalReading::at(i, zone).date_number();
    let base_date = LocalReading::at(base, base_zone).date_number();
    if date != base_date {
        let prefix = i.with_timezone(&zone).format("%b %-d, %Y").to_string();
        format!("{prefix} {time}")
    } else {
        time
    }
}

/// Last path segment of a zone id with underscores spaced
/// (`America/New_York` → `New York`).
pub fn short_zone_name(zone: Tz) -> String {
    let name = zone.name();
    let tail = name.rsplit('/').next().unwrap_or(name);
    tail.replace('_', " ")
}

// ── Bundled conversion ──────────────────────────────────────────────────────

/// Build the full display bundle for one conversion.
///
/// Total over absent inputs: each missing side yields that side's
/// placeholders while the present side still renders.
pub fn convert(
    instant: Option<DateTime<Utc>>,
    from: Option<Tz>,
    to: Option<Tz>,
) -> Conversion {
    let from_formatted = format_for_zone(instant, from);
    let to_formatted = format_for_zone(instant, to);
    let to_short = short_time_for_zone(instant, to);

    let (offset_delta, relation) = match (instant, from, to) {
        (Some(i), Some(f), Some(t)) => (
            Some(offset_delta_hours(f, t, i)),
            Some(day_relation(f, t, i)),
        ),
        _ => (None, None),
    };
    let label = delta_label(offset_delta);

    let sentence = match (instant, from, to) {
        (Some(_), Some(f), Some(t)) => {
            let day_prefix = match relation {
                Some(DayRelation::PreviousDay) => "(previous day) ",
                Some(DayRelation::NextDay) => "(next day) ",
                _ => "",
            };
            Some(format!(
                "{} ({}) is {}{} ({}) in {}.",
                from_formatted,
                f.name(),
                day_prefix,
                to_short,
                label,
                t.name()
            ))
        }
        _ => None,
    };

    Conversion {
        from_formatted,
        to_formatted,
        to_short,
        offset_delta_hours: offset_delta,
        delta_label: label,
        day_relation: relation,
        sentence,
    }
}
