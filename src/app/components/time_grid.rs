//! Reservation time grid: one row per partition, one cell per slot.

use chrono::{NaiveDate, NaiveDateTime};
use dioxus::prelude::*;
use studyroom_types::{Partition, PartitionId};

use crate::selection::Selection;
use crate::timetable::{ReservedSlotIndex, TimeTable};

#[derive(Props, Clone, PartialEq)]
pub struct TimeGridProps {
    pub table: TimeTable,
    pub date: NaiveDate,
    pub now: NaiveDateTime,
    pub partitions: Vec<Partition>,
    pub reserved: ReservedSlotIndex,
    pub selection: Selection,
    /// Clicked (partition, slot index)
    pub on_select: EventHandler<(PartitionId, usize)>,
}

#[component]
pub fn TimeGrid(props: TimeGridProps) -> Element {
    let labels = props.table.labels();
    let slots = props.table.slot_count();

    rsx! {
        div { class: "time-grid",
            table {
                thead {
                    tr {
                        th {}
                        for label in labels.iter().take(slots) {
                            th { "{label}" }
                        }
                    }
                }
                tbody {
                    for partition in props.partitions.iter() {
                        tr { key: "{partition.room_partition_id}",
                            th { "{partition.label()}" }
                            for index in 0..slots {
                                {
                                    let id = partition.room_partition_id;
                                    let reserved = props.reserved.get(&id).is_some_and(|s| s.contains(&index));
                                    let past = props.table.is_past(props.date, index, props.now);
                                    let selected = props.selection.is_selected(id, index);
                                    let mut class = String::from("slot");
                                    if past {
                                        class.push_str(" past");
                                    }
                                    if reserved {
                                        class.push_str(" reserved");
                                    }
                                    if selected {
                                        class.push_str(" selected");
                                    }
                                    let on_select = props.on_select;
                                    rsx! {
                                        td {
                                            class: "{class}",
                                            title: if reserved { "Reserved" } else { "" },
                                            onclick: move |_| on_select.call((id, index)),
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
