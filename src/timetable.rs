//! Daily time table and reserved-slot indexing.
//!
//! The table is a list of boundary labels (`08:30`, `09:00`, ...). Slot `i`
//! covers `labels[i]..labels[i + 1]`, so a table with N labels has N - 1 slots.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use studyroom_types::{PartitionId, PartitionReservationInfo};

use crate::config::TimeTableConfig;

/// Booked slot indices per partition for one date
pub type ReservedSlotIndex = HashMap<PartitionId, BTreeSet<usize>>;

/// Immutable list of time boundaries for one operating day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTable {
    labels: Vec<NaiveTime>,
    max_slots: usize,
}

impl TimeTable {
    /// Build labels from `start` to `end` inclusive.
    ///
    /// When the interval does not divide the window evenly, the last label is
    /// pinned to `end` so the table always closes at the configured time.
    pub fn new(config: &TimeTableConfig) -> Self {
        let step = Duration::minutes(i64::from(config.interval_minutes.max(1)));
        let mut labels = Vec::new();
        let mut current = config.start;

        while current <= config.end {
            labels.push(current);
            let (next, wrapped) = current.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            current = next;
        }

        match labels.last_mut() {
            Some(last) if *last != config.end => *last = config.end,
            None => labels.push(config.end),
            _ => {}
        }

        Self {
            labels,
            max_slots: config.max_reservation_slots,
        }
    }

    /// Boundary labels formatted `HH:MM`
    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().map(|t| t.format("%H:%M").to_string()).collect()
    }

    pub fn label(&self, index: usize) -> Option<String> {
        self.labels.get(index).map(|t| t.format("%H:%M").to_string())
    }

    /// Number of bookable slots
    pub fn slot_count(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    /// Longest selectable run of slots
    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn slot_start(&self, date: NaiveDate, index: usize) -> Option<NaiveDateTime> {
        (index < self.slot_count()).then(|| date.and_time(self.labels[index]))
    }

    pub fn slot_end(&self, date: NaiveDate, index: usize) -> Option<NaiveDateTime> {
        (index < self.slot_count()).then(|| date.and_time(self.labels[index + 1]))
    }

    /// A slot is past once its end lies before `now`; a slot in progress can
    /// still be booked.
    pub fn is_past(&self, date: NaiveDate, index: usize, now: NaiveDateTime) -> bool {
        self.slot_end(date, index).map_or(true, |end| end < now)
    }

    /// Slot indices overlapping `[start, end)` on `date`
    pub fn slots_overlapping(
        &self,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = usize> + '_ {
        (0..self.slot_count()).filter(move |&i| {
            let slot_start = date.and_time(self.labels[i]);
            let slot_end = date.and_time(self.labels[i + 1]);
            slot_start < end && start < slot_end
        })
    }
}

/// Parse a server date-time.
///
/// Accepts RFC 3339 (`2024-05-23T09:00:00.000Z`, offsets) and naive forms with
/// or without seconds. Offsets are dropped: the server speaks wall-clock time.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// `2024-05-23 09:00 - 10:00`; values that do not parse are shown as sent
pub fn format_span(start: &str, end: &str) -> String {
    match (parse_date_time(start), parse_date_time(end)) {
        (Some(s), Some(e)) if s.date() == e.date() => {
            format!("{} - {}", s.format("%Y-%m-%d %H:%M"), e.format("%H:%M"))
        }
        (Some(s), Some(e)) => format!("{} - {}", s.format("%Y-%m-%d %H:%M"), e.format("%Y-%m-%d %H:%M")),
        _ => format!("{start} - {end}"),
    }
}

/// Build the per-partition set of booked slots for `date`.
///
/// Intervals that fail to parse are skipped with a warning; the server stays
/// authoritative for conflicts either way.
pub fn reserved_slots(
    table: &TimeTable,
    date: NaiveDate,
    infos: &[PartitionReservationInfo],
) -> ReservedSlotIndex {
    let mut index = ReservedSlotIndex::new();

    for info in infos {
        let entry = index.entry(info.room_partition_id).or_default();
        for interval in &info.reservations {
            let (Some(start), Some(end)) = (
                parse_date_time(&interval.start_date_time),
                parse_date_time(&interval.end_date_time),
            ) else {
                tracing::warn!(
                    partition = info.room_partition_id,
                    start = %interval.start_date_time,
                    end = %interval.end_date_time,
                    "Skipping unparseable reservation interval"
                );
                continue;
            };
            entry.extend(table.slots_overlapping(date, start, end));
        }
    }

    index
}
