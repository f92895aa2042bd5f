//! Working-hours availability over a sampled day.
//!
//! One calendar day in the source zone is cut into 96 fixed 15-minute
//! slots. Each slot's starting wall-clock is resolved to its instant, both
//! zones' local clock readings at that instant are tested against their
//! working windows, and the slot is classified as inside both windows, one,
//! or neither. The grid is stateless: it is rebuilt from plain inputs on
//! every change, never patched incrementally.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::oracle::LocalReading;
use crate::resolve::resolve_local;

/// Slots per sampled day (15-minute subdivisions).
pub const SLOTS_PER_DAY: usize = 96;

/// Minutes per slot.
pub const SLOT_MINUTES: u32 = 15;

/// A daily working-hours window in decimal hours, half-open over `[0, 24)`.
///
/// `start > end` wraps past midnight (`22 → 6` means 22:00 until 06:00 on
/// the next calendar reading). `start == end` is a zero-width window that
/// matches nothing — "all day" is expressed as `[0, 24)`, not `[h, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkingWindow {
    pub start: f64,
    pub end: f64,
}

impl WorkingWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Half-open membership test for a local decimal hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_engine::grid::WorkingWindow;
    ///
    /// let overnight = WorkingWindow::new(22.0, 6.0);
    /// assert!(overnight.contains(23.5));
    /// assert!(!overnight.contains(12.0));
    /// assert!(!overnight.contains(6.0)); // half-open upper bound
    /// ```
    pub fn contains(&self, local_hour: f64) -> bool {
        if self.start <= self.end {
            local_hour >= self.start && local_hour < self.end
        } else {
            local_hour >= self.start || local_hour < self.end
        }
    }
}

/// Named working-window presets offered by the widget.
pub const PRESETS: &[(&str, WorkingWindow)] = &[
    ("Morning", WorkingWindow::new(9.0, 12.0)),
    ("Workday", WorkingWindow::new(9.0, 17.0)),
    ("Evening", WorkingWindow::new(17.0, 21.0)),
    ("All day", WorkingWindow::new(0.0, 24.0)),
];

/// Which zones' working windows contain a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotStatus {
    Both,
    FromOnly,
    ToOnly,
    None,
}

/// One 15-minute slot of the sampled day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    /// Position in the grid, `0..96`.
    pub index: usize,
    /// Wall-clock hour of the slot start in the source zone.
    pub hour: u32,
    /// Wall-clock minute of the slot start in the source zone.
    pub minute: u32,
    /// The instant the slot begins at.
    pub start: DateTime<Utc>,
    pub status: SlotStatus,
}

/// The first maximal contiguous run of [`SlotStatus::Both`] slots.
///
/// `end` is the starting instant of the last matching slot, not the close
/// of its 15-minute interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ── Grid construction ───────────────────────────────────────────────────────

/// Local decimal hour (`hour + minute / 60`) a zone observes at an instant.
pub fn local_hour_decimal(instant: DateTime<Utc>, zone: Tz) -> f64 {
    LocalReading::at(instant, zone).decimal_hour()
}

/// Classify every slot of `date` (read in `from`) against both windows.
pub fn build_grid(
    date: NaiveDate,
    from: Tz,
    to: Tz,
    from_window: WorkingWindow,
    to_window: WorkingWindow,
) -> Vec<Slot> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..SLOTS_PER_DAY)
        .map(|index| {
            let offset = Duration::minutes((index as u32 * SLOT_MINUTES) as i64);
            let wall = midnight + offset;
            let start = resolve_local(wall, from);

            let in_from = from_window.contains(local_hour_decimal(start, from));
            let in_to = to_window.contains(local_hour_decimal(start, to));
            let status = match (in_from, in_to) {
                (true, true) => SlotStatus::Both,
                (true, false) => SlotStatus::FromOnly,
                (false, true) => SlotStatus::ToOnly,
                (false, false) => SlotStatus::None,
            };

            Slot {
                index,
                hour: index as u32 / 4,
                minute: (index as u32 % 4) * SLOT_MINUTES,
                start,
                status,
            }
        })
        .collect()
}

/// The first contiguous run of both-zones slots, or `None` when the day has
/// no full overlap — never a degenerate empty range.
pub fn overlap_window(slots: &[Slot]) -> Option<OverlapWindow> {
    let first = slots.iter().position(|s| s.status == SlotStatus::Both)?;
    let mut last = first;
    for slot in &slots[first + 1..] {
        if slot.status != SlotStatus::Both {
            break;
        }
        last = slot.index;
    }
    Some(OverlapWindow {
        start_index: first,
        end_index: last,
        start: slots[first].start,
        end: slots[last].start,
    })
}

/// The grid slot whose 15-minute interval contains the zone's local reading
/// of `instant`. Used to position the day slider on the current selection.
pub fn slot_index_for(instant: DateTime<Utc>, zone: Tz) -> usize {
    let reading = LocalReading::at(instant, zone);
    (reading.hour * 4 + reading.minute / SLOT_MINUTES) as usize
}
