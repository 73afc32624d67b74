use crate::models::BootstrapResult;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::info;

/// Completion signal fired once bootstrap has a result to show.
pub trait Handoff: Send + Sync {
    fn complete(&self, result: Arc<BootstrapResult>);
}

/// Shared, UI-visible state container.
///
/// Single writer (bootstrap and the refresh flows), any number of readers. Each
/// publish swaps the whole result, so readers never observe a half-built value.
/// Read-modify-publish flows must hold [`AppState::writer`] for their whole span.
#[derive(Clone)]
pub struct AppState {
    tx: Arc<watch::Sender<Option<Arc<BootstrapResult>>>>,
    writer: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Exclusive write access, held across awaits by the refresh flows
    pub async fn writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Current result, `None` until bootstrap has completed
    pub fn snapshot(&self) -> Option<Arc<BootstrapResult>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<BootstrapResult>>> {
        self.tx.subscribe()
    }

    pub fn publish(&self, result: Arc<BootstrapResult>) {
        self.tx.send_replace(Some(result));
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl Handoff for AppState {
    fn complete(&self, result: Arc<BootstrapResult>) {
        info!(
            "Bootstrap complete: {} properties, {} tabs, navigating to main screen",
            result.properties.len(),
            result.type_tabs.len()
        );
        self.publish(result);
    }
}
