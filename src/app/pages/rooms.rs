//! Room time tables and reservation.

use chrono::{Local, NaiveDate};
use dioxus::prelude::*;
use studyroom_types::{Partition, PartitionId};

use crate::api::{self, ApiClient};
use crate::app::components::{Layout, NoticeBanner, TimeGrid};
use crate::app::{use_api, use_app, use_session, Route};
use crate::query::hooks::{run_mutation, use_query, use_query_context, QueryState};
use crate::query::{invalidates, resources, QueryKey};
use crate::selection::Selection;
use crate::timers::hooks::use_notice;
use crate::timetable::reserved_slots;

/// Today when bookable, else the first bookable date
fn default_date(available: &[NaiveDate], today: NaiveDate) -> Option<NaiveDate> {
    if available.contains(&today) {
        Some(today)
    } else {
        available.iter().copied().find(|d| *d >= today).or_else(|| available.first().copied())
    }
}

#[component]
pub fn Rooms() -> Element {
    let app = use_app();
    let api = use_api();
    let session = use_session();
    let query = use_query_context();
    let notice = use_notice();
    let department = app.config.department_id;
    let table = app.time_table.clone();

    let mut date = use_signal(|| None::<NaiveDate>);
    let mut selection = use_signal(|| Selection::new(table.max_slots()));

    let dates = use_query(
        move || Some(QueryKey::new(resources::AVAILABLE_DATES).param(department)),
        move |api: ApiClient| async move { api::schedules::available_dates(&api, department).await },
    );

    // Pick a date once the calendar arrives
    use_effect(move || {
        if let Some(available) = dates.data() {
            if date.peek().is_none() {
                date.set(default_date(&available, Local::now().date_naive()));
            }
        }
    });

    // A selection belongs to one date
    use_effect(move || {
        let _ = date();
        selection.write().clear();
    });

    let reservations = use_query(
        move || {
            date().map(|d| {
                QueryKey::new(resources::RESERVATIONS_BY_DEPARTMENT)
                    .param(department)
                    .param(d)
            })
        },
        move |api: ApiClient| {
            let day = date.peek().unwrap_or_default();
            async move { api::reservations::by_department_date(&api, department, day).await }
        },
    );

    let grid_table = table.clone();
    let on_select = move |(partition, index): (PartitionId, usize)| {
        let Some(day) = date() else {
            return;
        };
        let now = Local::now().naive_local();
        if let Err(e) = selection.write().select_at(&grid_table, day, now, partition, index) {
            notice.hint(e.to_string());
        }
    };

    let submit_table = table.clone();
    let reserve = move |_: MouseEvent| {
        let query = query.clone();
        let table = submit_table.clone();
        async move {
            if !session.peek().is_authenticated() {
                notice.hint("Log in to make a reservation.");
                return;
            }
            let Some(day) = date() else {
                return;
            };
            let request = match selection.peek().to_request(&table, day) {
                Ok(request) => request,
                Err(e) => {
                    notice.hint(e.to_string());
                    return;
                }
            };
            let client = api.client();
            match run_mutation(&query, invalidates::OWN_RESERVATION, api::reservations::create(&client, &request)).await {
                Ok(()) => {
                    selection.write().clear();
                    notice.success("Reservation complete.");
                }
                Err(e) => notice.error(e.user_message()),
            }
        }
    };

    let available = dates.data().unwrap_or_default();
    let grid = match (date(), reservations.state()) {
        (None, _) if matches!(dates.state(), QueryState::Ready(_)) => rsx! {
            p { "No dates are open for reservation." }
        },
        (Some(day), QueryState::Ready(infos)) => {
            let partitions: Vec<Partition> = infos
                .iter()
                .map(|info| Partition {
                    room_partition_id: info.room_partition_id,
                    partition_number: info.partition_number.clone(),
                    room_name: info.room_name.clone(),
                    room_id: None,
                })
                .collect();
            let reserved = reserved_slots(&table, day, &infos);
            rsx! {
                TimeGrid {
                    table: (*table).clone(),
                    date: day,
                    now: Local::now().naive_local(),
                    partitions,
                    reserved,
                    selection: selection(),
                    on_select,
                }
            }
        }
        (_, QueryState::Failed(message)) => rsx! { p { class: "notice notice-err", "{message}" } },
        _ => rsx! { p { aria_busy: "true", "Loading time table..." } },
    };

    rsx! {
        Layout { title: "Rooms".to_string(),
            h1 { "Reservation status by date" }
            p { "Select free slots below to reserve a study room (up to {table.max_slots()} slots)." }
            NoticeBanner { notice }

            select {
                onchange: move |e| date.set(e.value().parse().ok()),
                for day in available.iter() {
                    option {
                        value: "{day}",
                        selected: date() == Some(*day),
                        {day.format("%Y-%m-%d (%a)").to_string()}
                    }
                }
            }

            {grid}

            div { class: "controls",
                button { disabled: selection.read().is_empty(), onclick: reserve, "Reserve" }
                if !session.read().is_authenticated() {
                    Link { to: Route::Login {}, "Log in to reserve" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_default_date_prefers_today() {
        assert_eq!(default_date(&[d(22), d(23), d(24)], d(23)), Some(d(23)));
        assert_eq!(default_date(&[d(22), d(25)], d(23)), Some(d(25)));
        assert_eq!(default_date(&[d(20), d(21)], d(23)), Some(d(20)));
        assert_eq!(default_date(&[], d(23)), None);
    }
}
