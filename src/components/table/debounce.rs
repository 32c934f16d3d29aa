//! Debounced search commit.
//!
//! Each keystroke cancels the pending commit and schedules a new one for
//! the end of the quiet window (trailing edge only, one live timer per
//! table). The scheduled task holds a `Weak` reference to the table
//! state and re-checks the epoch before committing, so a stale timer can
//! neither outlive the instance nor apply an outdated value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use super::state::{TableInner, notify_selection};

/// Cancel any pending commit and schedule a new one after `window`.
///
/// Must run under the table's write guard so the cancel-then-reschedule
/// step is atomic with respect to other transitions.
pub(super) fn schedule_commit(
    inner: &Arc<RwLock<TableInner>>,
    guard: &mut TableInner,
    dirty: &Arc<AtomicBool>,
    window: Duration,
) {
    if let Some(timer) = guard.search_timer.take() {
        timer.abort();
    }
    guard.search_epoch = guard.search_epoch.wrapping_add(1);
    let epoch = guard.search_epoch;
    let weak = Arc::downgrade(inner);
    let dirty = Arc::clone(dirty);
    guard.search_timer = Some(tokio::spawn(async move {
        tokio::time::sleep(window).await;
        commit(weak, epoch, dirty);
    }));
}

/// Apply the pending search term if the timer is still current.
fn commit(weak: Weak<RwLock<TableInner>>, epoch: u64, dirty: Arc<AtomicBool>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let changed = {
        let Ok(mut guard) = inner.write() else {
            return;
        };
        if guard.disposed || guard.search_epoch != epoch {
            return;
        }
        guard.search_timer = None;
        let term = guard.search_input.clone();
        let changed = guard.committed_term != term || guard.current_page != 1;
        if changed {
            log::debug!("search commit: {term:?}");
            guard.committed_term = term;
            guard.current_page = 1;
            dirty.store(true, Ordering::SeqCst);
        }
        changed
    };
    if changed {
        notify_selection(&inner);
    }
}
