//! # overlap-engine
//!
//! Deterministic cross-timezone conversion and working-hours overlap
//! computation for scheduling widgets.
//!
//! The engine answers three questions a "when can we both meet" widget
//! needs answered correctly, including across DST transitions: which
//! absolute instant a wall-clock reading in a named zone refers to, what
//! that instant reads as in another zone (offset difference, day shift,
//! display strings), and which 15-minute slots of a day fall inside both
//! zones' working hours. All functions are pure and take explicit inputs —
//! no system clock, no process-local zone, no stored state — so the host UI
//! recomputes everything from plain values on each input change.
//!
//! ## Modules
//!
//! - [`oracle`] — local readings per zone, zone validation and lookup
//! - [`resolve`] — wall-clock string + zone → instant, with an explicit DST
//!   gap/ambiguity policy
//! - [`convert`] — offsets, day relations, display rendering
//! - [`grid`] — working-hours windows and the 96-slot availability grid
//! - [`bridge`] — natural-language input via an external assistant
//!   capability
//! - [`error`] — error types

pub mod bridge;
pub mod convert;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod resolve;

pub use bridge::{interpret, AssistantCapability, ParsedPhrase};
pub use convert::{
    convert, day_relation, delta_label, format_for_zone, offset_delta_hours, offset_minutes,
    Conversion, DayRelation,
};
pub use error::ConvertError;
pub use grid::{
    build_grid, overlap_window, OverlapWindow, Slot, SlotStatus, WorkingWindow, PRESETS,
    SLOTS_PER_DAY,
};
pub use oracle::{parse_zone, search_zones, supported_zones, LocalReading};
pub use resolve::{resolve_input, resolve_local, ResolvedInput};
