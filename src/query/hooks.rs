//! Dioxus bindings for the query cache

use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::{QueryClient, QueryKey};
use crate::api::{ApiClient, ApiError};
use crate::app::{use_session, AppContext};
use crate::timers::{hooks as timer_hooks, sleep};

/// Cache handle plus a reactive revision that query hooks subscribe to
#[derive(Clone)]
pub struct QueryContext {
    pub client: QueryClient,
    revision: Signal<u64>,
}

impl QueryContext {
    fn bump(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Mark `resource` stale and refetch every mounted query of it
    pub fn invalidate(&self, resource: &str) {
        self.client.invalidate(resource);
        self.bump();
    }

    /// Drop every cached response; used on login and logout
    pub fn reset(&self) {
        self.client.clear();
        self.bump();
    }
}

/// Install the cache at the application root
pub fn use_query_provider() -> QueryContext {
    use_context_provider(|| QueryContext {
        client: QueryClient::new(),
        revision: Signal::new(0),
    })
}

pub fn use_query_context() -> QueryContext {
    use_context::<QueryContext>()
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Disabled: no key yet
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

#[derive(Clone, PartialEq)]
struct Keyed<T> {
    key: Option<QueryKey>,
    state: QueryState<T>,
}

/// Result of [`use_query`]
pub struct Query<T: 'static> {
    key: Memo<Option<QueryKey>>,
    resource: Resource<Keyed<T>>,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    /// State for the key currently in effect; results of earlier keys read as `Loading`
    pub fn state(&self) -> QueryState<T> {
        let key = self.key.read().clone();
        match &*self.resource.read() {
            Some(keyed) if keyed.key == key => keyed.state.clone(),
            _ if key.is_none() => QueryState::Idle,
            _ => QueryState::Loading,
        }
    }

    pub fn data(&self) -> Option<T> {
        match self.state() {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.key.read().clone()
    }
}

/// Keyed, cached query.
///
/// `key` returning `None` disables the query. It re-runs when the key, the
/// session or the cache revision changes; a superseded fetch never reaches
/// the cache.
pub fn use_query<T, K, F, Fut>(key: K, fetch: F) -> Query<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
    K: Fn() -> Option<QueryKey> + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ctx = use_query_context();
    let app = use_context::<AppContext>();
    let session = use_session();
    let key = use_memo(key);

    let resource = use_resource(move || {
        let key = key();
        let _ = (ctx.revision)();
        let api = session.read().client(&app.api);
        let query = ctx.client.clone();
        let pending = key.as_ref().map(|_| fetch(api));

        async move {
            let (Some(key), Some(pending)) = (key.clone(), pending) else {
                return Keyed {
                    key,
                    state: QueryState::Idle,
                };
            };
            let state = match query.fetch_query(key.clone(), || pending).await {
                Ok(data) => QueryState::Ready(data),
                Err(e) => {
                    warn!(%key, error = %e, "Query failed");
                    QueryState::Failed(e.user_message())
                }
            };
            Keyed {
                key: Some(key),
                state,
            }
        }
    });

    Query { key, resource }
}

/// [`use_query`] that invalidates its resource every `period`
pub fn use_polled_query<T, K, F, Fut>(period: Duration, key: K, fetch: F) -> Query<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
    K: Fn() -> Option<QueryKey> + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ctx = use_query_context();
    let query = use_query(key, fetch);
    let timer = timer_hooks::use_timer_slot("poll");

    use_hook(move || {
        timer_hooks::schedule(timer, async move {
            loop {
                sleep(period).await;
                if let Some(key) = query.key.peek().clone() {
                    ctx.invalidate(key.resource());
                }
            }
        });
    });

    query
}

/// Run a mutation and, on success, invalidate `resources` and refetch the
/// affected queries. Failures propagate untouched.
pub async fn run_mutation<T, Fut>(ctx: &QueryContext, resources: &[&str], mutation: Fut) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    let out = ctx.client.mutate(resources, mutation).await?;
    ctx.bump();
    Ok(out)
}
