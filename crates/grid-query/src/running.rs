use crate::cancel::QueryCancel;

/// Bookkeeping record for a query that is currently executing.
///
/// The record is read-only once built. It is what a query registry hands
/// out when asked which queries are running and for how long.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────┐
/// │ Field      │ Meaning                                      │
/// ├────────────┼──────────────────────────────────────────────┤
/// │ id         │ Opaque identifier assigned by the registry   │
/// │ query      │ Original query text                          │
/// │ cache      │ Cache the query was executed against         │
/// │ start_time │ Start timestamp, milliseconds                │
/// │ cancel     │ Optional hook that stops the query           │
/// └────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct RunningQueryInfo {
    id: u64,
    query: String,
    cache: String,
    start_time: i64,
    cancel: Option<QueryCancel>,
}

impl RunningQueryInfo {
    #[must_use]
    pub fn new(
        id: u64,
        query: impl Into<String>,
        cache: impl Into<String>,
        start_time: i64,
        cancel: Option<QueryCancel>,
    ) -> Self {
        Self {
            id,
            query: query.into(),
            cache: cache.into(),
            start_time,
            cancel,
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cache the query was executed against.
    #[must_use]
    pub fn cache(&self) -> &str {
        &self.cache
    }

    #[must_use]
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// `true` if more than `duration` has elapsed between the start time
    /// and `cur_time`.
    #[must_use]
    pub fn long_query(&self, cur_time: i64, duration: i64) -> bool {
        cur_time.saturating_sub(self.start_time) > duration
    }

    /// Cancel the query. Does nothing when no hook was supplied or the
    /// hook already ran.
    pub fn cancel(&self) {
        if let Some(cancel) = &self.cancel {
            log::debug!("cancelling query {} on cache {}", self.id, self.cache);
            cancel.cancel();
        }
    }

    /// `true` if this query has a hook and it has been invoked.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(QueryCancel::is_cancelled)
    }
}
