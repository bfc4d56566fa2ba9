#[cfg(test)]
#[path = "busy_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::watch;

/// Single-flight flag for a conversation. True exactly while one outbound
/// request is unsettled.
pub struct BusyState {
    tx: watch::Sender<bool>,
}

impl Default for BusyState {
    fn default() -> BusyState {
        let (tx, _rx) = watch::channel(false);
        return BusyState { tx };
    }
}

impl BusyState {
    pub fn is_busy(&self) -> bool {
        return *self.tx.borrow();
    }

    /// Flips the flag from false to true in one step. `None` means another
    /// request already holds it. The flag drops back to false when the
    /// returned guard is dropped.
    pub(super) fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        let acquired = self.tx.send_if_modified(|busy| {
            if *busy {
                return false;
            }
            *busy = true;
            return true;
        });

        if !acquired {
            return None;
        }

        return Some(BusyGuard { state: self });
    }

    pub fn indicator(&self) -> TypingIndicator {
        return TypingIndicator {
            rx: self.tx.subscribe(),
        };
    }
}

pub struct BusyGuard<'a> {
    state: &'a BusyState,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.tx.send_if_modified(|busy| {
            let was_busy = *busy;
            *busy = false;
            return was_busy;
        });
    }
}

/// Read side of `BusyState` for presentation. Visible exactly while a request
/// is in flight.
#[derive(Clone)]
pub struct TypingIndicator {
    rx: watch::Receiver<bool>,
}

impl TypingIndicator {
    pub fn is_visible(&self) -> bool {
        return *self.rx.borrow();
    }

    /// Waits for the next transition and returns the new visibility.
    pub async fn changed(&mut self) -> Result<bool> {
        self.rx.changed().await?;
        return Ok(*self.rx.borrow_and_update());
    }
}
