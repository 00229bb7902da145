//! The single "last rendered result" slot.
//!
//! Submissions can overlap while they wait on the predictor. Each one takes a
//! ticket when it is issued; a result is only written if its ticket is newer
//! than the one already on display, so a slow old response that lands late is
//! dropped instead of overwriting a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::render::RenderedResult;

#[derive(Clone, Default)]
pub struct ResultSlot {
    next_ticket: Arc<AtomicU64>,
    current: Arc<RwLock<Option<RenderedResult>>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next ticket (starting at 1).
    pub fn issue(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the displayed result unless a newer submission already owns it.
    /// Returns whether `rendered` was written.
    pub async fn commit(&self, rendered: RenderedResult) -> bool {
        let mut slot = self.current.write().await;
        if let Some(shown) = slot.as_ref() {
            if shown.ticket >= rendered.ticket {
                debug!(
                    "Discarding stale result #{} (showing #{})",
                    rendered.ticket, shown.ticket
                );
                return false;
            }
        }
        *slot = Some(rendered);
        true
    }

    pub async fn current(&self) -> Option<RenderedResult> {
        self.current.read().await.clone()
    }
}
