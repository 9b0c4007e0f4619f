//! Client-side query cache
//!
//! Responses are cached under a [`QueryKey`] (resource name + parameters).
//! Every dispatch takes a [`FetchTicket`]; a response is stored only if its
//! ticket is still the latest for that key, so a slow, superseded response
//! never overwrites a newer one. Mutations invalidate the resources they
//! affect only after they succeed.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub mod hooks;

/// Resource names used in query keys
pub mod resources {
    pub const MY_INFO: &str = "my_info";
    pub const MY_RESERVATIONS: &str = "my_reservations";
    pub const NO_SHOW: &str = "no_show";
    pub const BLOCKED_PERIOD: &str = "blocked_period";
    pub const OTP: &str = "otp";
    pub const ALL_ROOMS: &str = "all_rooms";
    pub const ROOMS: &str = "rooms";
    pub const PARTITIONS_BY_ROOMS: &str = "partitions_by_rooms";
    pub const AVAILABLE_DATES: &str = "available_dates";
    pub const RESERVATIONS_BY_DEPARTMENT: &str = "reservations_by_department";
    pub const RESERVATIONS_BY_PARTITIONS: &str = "reservations_by_partitions";
    pub const RESERVATIONS_BY_USER: &str = "reservations_by_user";
    pub const BLOCKED_USERS: &str = "blocked_users";
    pub const USER_SEARCH: &str = "user_search";
    pub const POLICIES: &str = "policies";
}

/// Resources each kind of mutation makes stale
pub mod invalidates {
    use super::resources::*;

    /// Creating or cancelling one's own reservation
    pub const OWN_RESERVATION: &[&str] = &[MY_RESERVATIONS, RESERVATIONS_BY_DEPARTMENT];
    /// Admin state change or deletion of someone's reservation
    pub const MANAGED_RESERVATION: &[&str] = &[RESERVATIONS_BY_USER, RESERVATIONS_BY_PARTITIONS];
    /// A check-in marks reservations visited
    pub const CHECK_IN: &[&str] = &[RESERVATIONS_BY_PARTITIONS];
    pub const BLOCKED_USER: &[&str] = &[BLOCKED_USERS];
    /// Password or e-mail change
    pub const ACCOUNT: &[&str] = &[MY_INFO];
    /// Applying an operation policy opens or closes dates
    pub const SCHEDULE: &[&str] = &[AVAILABLE_DATES];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Append a parameter; order matters
    pub fn param(mut self, value: impl ToString) -> Self {
        self.params.push(value.to_string());
        self
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.resource, self.params.join(","))
    }
}

/// Proof of a dispatch for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    epoch: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

#[derive(Debug, Default)]
struct Entry {
    value: Option<Value>,
    stale: bool,
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    revision: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh cached value for `key`
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key).filter(|e| !e.stale)?;
        let value = entry.value.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Cached value for `key`, even if stale
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.entries.get(key)?.value.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map_or(true, |e| e.stale || e.value.is_none())
    }

    /// Register a dispatch; earlier tickets for the same key become obsolete
    pub fn begin_fetch(&mut self, key: QueryKey) -> FetchTicket {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.epoch += 1;
        FetchTicket {
            key,
            epoch: entry.epoch,
        }
    }

    /// Store a response; returns false (and stores nothing) for an obsolete ticket
    pub fn resolve(&mut self, ticket: FetchTicket, value: Value) -> bool {
        match self.entries.get_mut(&ticket.key) {
            Some(entry) if entry.epoch == ticket.epoch => {
                entry.value = Some(value);
                entry.stale = false;
                true
            }
            _ => {
                debug!(key = %ticket.key, "Discarding superseded response");
                false
            }
        }
    }

    /// Mark every key of `resource` stale and obsolete any in-flight fetch.
    /// Returns the number of keys touched.
    pub fn invalidate(&mut self, resource: &str) -> usize {
        let mut touched = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.resource == resource {
                entry.stale = true;
                entry.epoch += 1;
                touched += 1;
            }
        }
        self.revision += 1;
        debug!(resource, touched, "Invalidated");
        touched
    }

    /// Forget everything, e.g. when the session changes hands.
    /// In-flight fetches find no entry and are discarded.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
        debug!("Query cache cleared");
    }

    /// Bumped on every invalidation
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Shared handle to the cache
#[derive(Clone, Default)]
pub struct QueryClient {
    cache: Arc<RwLock<QueryCache>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn write<R>(&self, f: impl FnOnce(&mut QueryCache) -> R) -> R {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }

    fn read<R>(&self, f: impl FnOnce(&QueryCache) -> R) -> R {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        f(&cache)
    }

    pub fn cached<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.read(|c| c.get(key))
    }

    /// Serve `key` from cache when fresh, otherwise run `fetch` and cache the
    /// result under the key in effect at dispatch time.
    pub async fn fetch_query<T, E, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.cached::<T>(&key) {
            debug!(%key, "Cache hit");
            return Ok(hit);
        }

        debug!(%key, "Cache miss, fetching");
        let ticket = self.write(|c| c.begin_fetch(key));
        let value = fetch().await?;

        match serde_json::to_value(&value) {
            Ok(json) => {
                self.write(|c| c.resolve(ticket, json));
            }
            Err(e) => warn!(key = %ticket.key(), error = %e, "Response not cacheable"),
        }
        Ok(value)
    }

    /// Run a mutation; on success invalidate `resources`. Errors propagate
    /// unchanged and leave the cache alone.
    pub async fn mutate<T, E, Fut>(&self, resources: &[&str], mutation: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let out = mutation.await?;
        self.write(|c| {
            for resource in resources {
                c.invalidate(resource);
            }
        });
        Ok(out)
    }

    pub fn invalidate(&self, resource: &str) {
        self.write(|c| c.invalidate(resource));
    }

    pub fn clear(&self) {
        self.write(QueryCache::clear);
    }

    pub fn revision(&self) -> u64 {
        self.read(QueryCache::revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{self, mock, ApiClient, ApiError};
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use studyroom_types::ReservationInfo;

    fn key(date: &str) -> QueryKey {
        QueryKey::new(resources::RESERVATIONS_BY_DEPARTMENT).param(1).param(date)
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut cache = QueryCache::new();
        let first = cache.begin_fetch(key("2024-05-23"));
        let second = cache.begin_fetch(key("2024-05-23"));

        assert!(cache.resolve(second, json!("new")));
        assert!(!cache.resolve(first, json!("old")));
        assert_eq!(cache.get::<String>(&key("2024-05-23")).as_deref(), Some("new"));
    }

    #[test]
    fn test_keys_with_different_params_do_not_collide() {
        let mut cache = QueryCache::new();
        let a = cache.begin_fetch(key("2024-05-23"));
        let b = cache.begin_fetch(key("2024-05-24"));

        // The later date answers first, the earlier one after
        assert!(cache.resolve(b, json!([2])));
        assert!(cache.resolve(a, json!([1])));
        assert_eq!(cache.get::<Vec<i32>>(&key("2024-05-24")), Some(vec![2]));
        assert_eq!(cache.get::<Vec<i32>>(&key("2024-05-23")), Some(vec![1]));
    }

    #[test]
    fn test_invalidation_obsoletes_in_flight_fetch() {
        let mut cache = QueryCache::new();
        let done = cache.begin_fetch(key("d"));
        assert!(cache.resolve(done, json!(1)));

        let in_flight = cache.begin_fetch(key("d"));
        assert_eq!(cache.invalidate(resources::RESERVATIONS_BY_DEPARTMENT), 1);
        assert!(!cache.resolve(in_flight, json!(2)));

        assert!(cache.is_stale(&key("d")));
        assert_eq!(cache.get::<i32>(&key("d")), None);
        assert_eq!(cache.peek::<i32>(&key("d")), Some(1));
        assert_eq!(cache.revision(), 1);
    }

    #[test]
    fn test_clear_discards_in_flight_fetch() {
        let mut cache = QueryCache::new();
        let ticket = cache.begin_fetch(QueryKey::new(resources::MY_INFO));
        cache.clear();
        assert!(!cache.resolve(ticket, json!({})));
        assert!(cache.is_stale(&QueryKey::new(resources::MY_INFO)));
    }

    #[test]
    fn test_invalidate_only_touches_its_resource() {
        let mut cache = QueryCache::new();
        let t = cache.begin_fetch(QueryKey::new(resources::MY_INFO));
        cache.resolve(t, json!({}));
        cache.invalidate(resources::MY_RESERVATIONS);
        assert!(!cache.is_stale(&QueryKey::new(resources::MY_INFO)));
    }

    #[derive(Clone, Default)]
    struct Server {
        reservations: Arc<Mutex<Vec<i64>>>,
        list_calls: Arc<AtomicUsize>,
    }

    async fn list(State(s): State<Server>) -> Json<serde_json::Value> {
        s.list_calls.fetch_add(1, Ordering::SeqCst);
        let items: Vec<_> = s
            .reservations
            .lock()
            .unwrap()
            .iter()
            .map(|id| {
                json!({
                    "reservationId": id,
                    "startDateTime": "2024-05-23T09:00:00",
                    "endDateTime": "2024-05-23T10:00:00",
                })
            })
            .collect();
        Json(json!({ "data": { "reservationInfoResponses": items } }))
    }

    async fn remove(State(s): State<Server>, Path(id): Path<i64>) -> StatusCode {
        let mut list = s.reservations.lock().unwrap();
        match list.iter().position(|r| *r == id) {
            Some(pos) => {
                list.remove(pos);
                StatusCode::OK
            }
            None => StatusCode::NOT_FOUND,
        }
    }

    async fn setup() -> (Server, ApiClient) {
        let server = Server::default();
        server.reservations.lock().unwrap().extend([1, 2]);
        let router = Router::new()
            .route("/reservations/me", get(list))
            .route("/reservations/me/{id}", delete(remove))
            .with_state(server.clone());
        let client = ApiClient::new(&mock::serve(router).await).unwrap();
        (server, client)
    }

    async fn my_reservations(query: &QueryClient, api: &ApiClient) -> Vec<ReservationInfo> {
        query
            .fetch_query(QueryKey::new(resources::MY_RESERVATIONS), || {
                api::reservations::mine(api)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_invalidates_reservation_list() {
        let (server, api) = setup().await;
        let query = QueryClient::new();

        assert_eq!(my_reservations(&query, &api).await.len(), 2);
        assert_eq!(my_reservations(&query, &api).await.len(), 2);
        assert_eq!(server.list_calls.load(Ordering::SeqCst), 1, "second read is cached");

        query
            .mutate(
                &[resources::MY_RESERVATIONS],
                api::reservations::delete_mine(&api, 1),
            )
            .await
            .unwrap();

        let after = my_reservations(&query, &api).await;
        assert_eq!(server.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].reservation_id, 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let (server, api) = setup().await;
        let query = QueryClient::new();
        my_reservations(&query, &api).await;

        let result: Result<(), ApiError> = query
            .mutate(
                &[resources::MY_RESERVATIONS],
                api::reservations::delete_mine(&api, 99),
            )
            .await;
        assert_eq!(result.unwrap_err().status(), Some(404));

        my_reservations(&query, &api).await;
        assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(query.revision(), 0);
    }
}
