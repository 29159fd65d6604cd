//! Push-based live queries over the change bus.

use std::future::Future;

use tokio::sync::{broadcast, watch};

use crate::live::change_bus::{ChangeBus, Table};
use crate::utils::errors::RollCallError;

/// State of an asynchronously loaded result, exhaustively matched by
/// consumers. There is no automatic retry; re-issuing a failed load is a
/// caller decision.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The successful value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle on a live query: a watch receiver whose value is refreshed by a
/// background task whenever one of the query's source tables changes.
///
/// The background task exits once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct LiveQuery<T> {
    rx: watch::Receiver<LoadState<T>>,
}

impl<T: Clone> LiveQuery<T> {
    /// Snapshot of the most recent state.
    pub fn current(&self) -> LoadState<T> {
        self.rx.borrow().clone()
    }

    /// Waits until the state is refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error if the producing task has terminated.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

/// Spawns a live query task: runs `fetch` once immediately, then again on
/// every change notice touching one of `tables`.
pub(crate) fn spawn<T, F, Fut>(bus: &ChangeBus, tables: Vec<Table>, fetch: F) -> LiveQuery<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, RollCallError>> + Send,
{
    let mut changes = bus.subscribe();
    let (tx, rx) = watch::channel(LoadState::Loading);

    tokio::spawn(async move {
        push(&tx, fetch().await);

        loop {
            tokio::select! {
                notice = changes.recv() => match notice {
                    Ok(table) => {
                        if tables.contains(&table) {
                            push(&tx, fetch().await);
                        }
                    }
                    // Missed notices: refresh unconditionally
                    Err(broadcast::error::RecvError::Lagged(_)) => push(&tx, fetch().await),
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = tx.closed() => break,
            }
        }
    });

    LiveQuery { rx }
}

fn push<T>(tx: &watch::Sender<LoadState<T>>, result: Result<T, RollCallError>) {
    let state = match result {
        Ok(value) => LoadState::Success(value),
        Err(err) => LoadState::Error(err.to_string()),
    };
    let _ = tx.send(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_state_accessors() {
        let loading: LoadState<i64> = LoadState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.success(), None);

        let ok = LoadState::Success(7);
        assert_eq!(ok.success(), Some(&7));
        assert_eq!(ok.error(), None);

        let failed: LoadState<i64> = LoadState::Error("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[tokio::test]
    async fn live_query_refreshes_on_matching_table() {
        let bus = ChangeBus::new(16);
        let counter = std::sync::Arc::new(std::sync::atomic::AtomicI64::new(0));

        let fetch_counter = std::sync::Arc::clone(&counter);
        let mut query = spawn(&bus, vec![Table::Events], move || {
            let value = fetch_counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async move { Ok(value) }
        });

        query.changed().await.unwrap();
        assert_eq!(query.current(), LoadState::Success(0));

        // A non-matching table must not refresh; a matching one must.
        bus.publish(Table::Attendees);
        bus.publish(Table::Events);
        query.changed().await.unwrap();
        assert_eq!(query.current(), LoadState::Success(1));
    }

    #[tokio::test]
    async fn live_query_surfaces_fetch_errors() {
        let bus = ChangeBus::new(16);
        let mut query: LiveQuery<i64> = spawn(&bus, vec![Table::Events], || async {
            Err(RollCallError::InvalidInput("no data".to_string()))
        });

        query.changed().await.unwrap();
        assert!(query.current().error().is_some());
    }
}
