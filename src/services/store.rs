use crate::models::state::{Action, LoadPhase, ViewState};
use crate::services::source::RecordSource;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{error, info};

pub type Source = Arc<dyn RecordSource + Send + Sync>;

/// Shared owner of the view state. Each dispatched action runs to completion
/// under the lock before the next one starts.
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<Mutex<ViewState>>,
}

impl Store {
    pub fn new(state: ViewState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn dispatch(&self, action: Action) {
        self.lock().apply(action);
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&*self.lock())
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    /// Marks the view as loading. Only the first call succeeds.
    fn begin_load(&self) -> bool {
        let mut state = self.lock();
        if state.load_phase() != LoadPhase::Unloaded {
            return false;
        }
        state.apply(Action::LoadStarted);
        true
    }
}

/// Reads the source once and turns the outcome into the action that
/// completes the load. Failures are logged and otherwise swallowed.
pub async fn load_action(source: &(dyn RecordSource + Send + Sync)) -> Action {
    match source.fetch_records().await {
        Ok(records) => {
            info!("Loaded {} records", records.len());
            Action::LoadSucceeded(records)
        }
        Err(e) => {
            error!("Failed to load records: {}", e);
            Action::LoadFailed(e.to_string())
        }
    }
}

/// Spawns the one-time initial read. Returns `None` when a load was already
/// started for this store.
pub fn spawn_initial_load(store: Store, source: Source) -> Option<JoinHandle<()>> {
    if !store.begin_load() {
        return None;
    }

    Some(tokio::spawn(async move {
        let action = load_action(source.as_ref()).await;
        store.dispatch(action);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use crate::services::source::FetchError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl RecordSource for CountingSource {
        async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE))
            } else {
                Ok(vec![Record::titled("B"), Record::titled("A")])
            }
        }
    }

    #[tokio::test]
    async fn initial_load_runs_once() {
        let store = Store::default();
        let source = CountingSource::new(false);

        let handle = spawn_initial_load(store.clone(), source.clone()).unwrap();
        assert!(spawn_initial_load(store.clone(), source.clone()).is_none());
        handle.await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.read(|s| s.load_phase()), LoadPhase::Loaded);
        assert_eq!(store.read(|s| s.dataset().len()), 2);
    }

    #[tokio::test]
    async fn failed_load_completes_with_empty_dataset() {
        let store = Store::default();
        let source = CountingSource::new(true);

        spawn_initial_load(store.clone(), source)
            .unwrap()
            .await
            .unwrap();

        let state = store.snapshot();
        assert_eq!(state.load_phase(), LoadPhase::Loaded);
        assert!(state.dataset().is_empty());
    }

    #[tokio::test]
    async fn load_action_maps_outcomes() {
        let ok = load_action(CountingSource::new(false).as_ref()).await;
        assert!(matches!(ok, Action::LoadSucceeded(ref records) if records.len() == 2));

        let failed = load_action(CountingSource::new(true).as_ref()).await;
        assert!(matches!(failed, Action::LoadFailed(_)));
    }
}
