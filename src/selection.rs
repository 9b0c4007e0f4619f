//! Slot selection on the reservation grid.
//!
//! At most one partition carries a selection, and the selection is always a
//! single contiguous run of slots no longer than the configured maximum.

use chrono::{NaiveDate, NaiveDateTime};
use studyroom_types::{NewReservation, PartitionId};
use thiserror::Error;
use tracing::debug;

use crate::timetable::TimeTable;

/// Wire format the reservation endpoint expects for start/end
const REQUEST_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:00.000Z";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Reservations are limited to {max_slots} slots")]
    TooLong { max_slots: usize },

    #[error("Cannot reserve a time that has already passed")]
    PastSlot,

    #[error("Select a time slot first")]
    Empty,

    #[error("Slot {0} is outside the time table")]
    OutOfRange(usize),
}

/// Inclusive run of slot indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: usize,
    pub end: usize,
}

impl SlotRange {
    fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// A validated reservation ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub partition_id: PartitionId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReservationRequest {
    pub fn to_wire(&self) -> NewReservation {
        NewReservation {
            room_partition_id: self.partition_id,
            start_date_time: self.start.format(REQUEST_DATE_TIME_FORMAT).to_string(),
            end_date_time: self.end.format(REQUEST_DATE_TIME_FORMAT).to_string(),
        }
    }
}

/// Current selection: nothing, or one range in one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    active: Option<(PartitionId, SlotRange)>,
    max_slots: usize,
}

impl Selection {
    pub fn new(max_slots: usize) -> Self {
        Self {
            active: None,
            max_slots: max_slots.max(1),
        }
    }

    pub fn partition(&self) -> Option<PartitionId> {
        self.active.map(|(p, _)| p)
    }

    pub fn range(&self) -> Option<SlotRange> {
        self.active.map(|(_, r)| r)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// True iff `index` of `partition` lies inside the active range
    pub fn is_selected(&self, partition: PartitionId, index: usize) -> bool {
        matches!(self.active, Some((p, range)) if p == partition && range.contains(index))
    }

    /// Apply a click on `(partition, index)`.
    ///
    /// - nothing selected, or another partition: start a single cell there
    /// - single cell: reject if the span would exceed the maximum, clear on a
    ///   repeated click, extend forward, or move backward to the new cell
    /// - multi-cell range: restart with a single cell
    ///
    /// A rejection leaves the selection untouched.
    pub fn toggle_slot(&mut self, partition: PartitionId, index: usize) -> Result<(), SelectionError> {
        let Some((current, range)) = self.active else {
            self.active = Some((partition, SlotRange::single(index)));
            return Ok(());
        };

        if current != partition {
            self.active = Some((partition, SlotRange::single(index)));
            return Ok(());
        }

        if !range.is_single() {
            self.active = Some((partition, SlotRange::single(index)));
            return Ok(());
        }

        if range.start.abs_diff(index) + 1 > self.max_slots {
            debug!(partition, index, max = self.max_slots, "Selection rejected: too long");
            return Err(SelectionError::TooLong {
                max_slots: self.max_slots,
            });
        }

        if index == range.start {
            self.active = None;
        } else if index > range.start {
            self.active = Some((
                partition,
                SlotRange {
                    start: range.start,
                    end: index,
                },
            ));
        } else {
            self.active = Some((partition, SlotRange::single(index)));
        }
        Ok(())
    }

    /// Click handler used by the grid: past slots are refused before the
    /// selection is touched.
    pub fn select_at(
        &mut self,
        table: &TimeTable,
        date: NaiveDate,
        now: NaiveDateTime,
        partition: PartitionId,
        index: usize,
    ) -> Result<(), SelectionError> {
        if index >= table.slot_count() {
            return Err(SelectionError::OutOfRange(index));
        }
        if table.is_past(date, index, now) {
            return Err(SelectionError::PastSlot);
        }
        self.toggle_slot(partition, index)
    }

    /// Build the request for `date`; only called on submission
    pub fn to_request(&self, table: &TimeTable, date: NaiveDate) -> Result<ReservationRequest, SelectionError> {
        let (partition_id, range) = self.active.ok_or(SelectionError::Empty)?;
        let start = table
            .slot_start(date, range.start)
            .ok_or(SelectionError::OutOfRange(range.start))?;
        let end = table
            .slot_end(date, range.end)
            .ok_or(SelectionError::OutOfRange(range.end))?;
        Ok(ReservationRequest {
            partition_id,
            start,
            end,
        })
    }
}
