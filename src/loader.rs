//! Background fetch-then-parse, delivered once to the screen that asked for it.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::GuardianClient;
use crate::article::{parse_articles, ArticleList};
use crate::connectivity::Connectivity;
use crate::error::NewsTuiError;

/// Terminal result of one load.
#[derive(Debug)]
pub enum LoadOutcome {
    Populated(ArticleList),
    /// The API answered with zero results.
    Empty,
    NoConnectivity,
    Failed(NewsTuiError),
}

/// Connectivity check, then one fetch, then parse. Never retries.
pub async fn load_articles(probe: Arc<dyn Connectivity>, client: &GuardianClient) -> LoadOutcome {
    if !probe.is_connected().await {
        tracing::warn!("no network connectivity; skipping fetch");
        return LoadOutcome::NoConnectivity;
    }

    let body = match client.fetch_body().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "couldn't get json from server");
            return LoadOutcome::Failed(e);
        }
    };

    match parse_articles(&body) {
        Ok(list) if list.is_empty() => {
            tracing::info!("search returned no results");
            LoadOutcome::Empty
        }
        Ok(list) => {
            tracing::info!(count = list.len(), "articles loaded");
            LoadOutcome::Populated(list)
        }
        Err(e) => {
            tracing::error!(error = %e, "json parsing error");
            LoadOutcome::Failed(e)
        }
    }
}

/// A load in flight. Dropping it aborts the task, so a result never
/// outlives the screen that owns the handle.
pub struct PendingLoad {
    task: JoinHandle<()>,
    rx: oneshot::Receiver<LoadOutcome>,
}

impl PendingLoad {
    pub fn spawn(runtime: &Handle, probe: Arc<dyn Connectivity>, client: GuardianClient) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = runtime.spawn(async move {
            let outcome = load_articles(probe, &client).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("load finished after its screen went away");
            }
        });
        Self { task, rx }
    }

    /// Non-blocking; yields the outcome at most once.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(LoadOutcome::Failed(
                NewsTuiError::Fetch("background load ended without a result".into()),
            )),
        }
    }
}

impl Drop for PendingLoad {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct Offline;

    #[async_trait]
    impl Connectivity for Offline {
        async fn is_connected(&self) -> bool {
            false
        }
    }

    /// Answers offline only after a long wait; records whether it got there.
    struct Slow {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Connectivity for Slow {
        async fn is_connected(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(5)).await;
            self.finished.store(true, Ordering::SeqCst);
            false
        }
    }

    fn wait(pending: &mut PendingLoad) -> LoadOutcome {
        for _ in 0..200 {
            if let Some(o) = pending.poll() {
                return o;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("load did not finish");
    }

    #[test]
    fn offline_load_delivers_no_connectivity() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = GuardianClient::new(&AppConfig::default(), "test").unwrap();
        let mut pending = PendingLoad::spawn(runtime.handle(), Arc::new(Offline), client);
        assert!(matches!(wait(&mut pending), LoadOutcome::NoConnectivity));
    }

    #[test]
    fn slow_load_is_pending_until_it_finishes() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = GuardianClient::new(&AppConfig::default(), "test").unwrap();
        let probe = Slow {
            finished: Arc::new(AtomicBool::new(false)),
        };
        let mut pending = PendingLoad::spawn(runtime.handle(), Arc::new(probe), client);
        std::thread::sleep(Duration::from_millis(50));
        assert!(pending.poll().is_none());
    }

    #[test]
    fn dropped_handle_aborts_task_mid_check() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = GuardianClient::new(&AppConfig::default(), "test").unwrap();
        let finished = Arc::new(AtomicBool::new(false));
        let probe = Slow {
            finished: Arc::clone(&finished),
        };
        let pending = PendingLoad::spawn(runtime.handle(), Arc::new(probe), client);
        let task = pending.task.abort_handle();
        std::thread::sleep(Duration::from_millis(50));
        assert!(!task.is_finished());

        drop(pending);
        for _ in 0..100 {
            if task.is_finished() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(task.is_finished(), "task still running after drop");
        assert!(!finished.load(Ordering::SeqCst));
    }
}
