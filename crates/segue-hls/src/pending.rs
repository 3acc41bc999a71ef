//! In-flight fetch counter and cancellable refresh timers.
//!
//! Together these drive termination: the walk can only close once nothing is
//! in flight and nothing is scheduled.

use std::{collections::HashMap, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};

/// Token identifying one scheduled refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TimerId(u64);

#[derive(Debug, Default)]
pub(crate) struct PendingRegistry {
    inflight: usize,
    next_timer: u64,
    timers: HashMap<TimerId, JoinHandle<()>>,
    ended: bool,
}

impl PendingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incremented before a fetch is issued, decremented in its completion
    /// handler (success or error).
    pub fn incr(&mut self) {
        self.inflight += 1;
    }

    pub fn decr(&mut self) {
        self.inflight = self.inflight.saturating_sub(1);
    }

    pub fn inflight(&self) -> usize {
        self.inflight
    }

    /// After this, `schedule` becomes a no-op returning `None`.
    pub fn mark_ended(&mut self) {
        self.ended = true;
    }

    /// Schedule `make_msg(token)` to be delivered on `tx` after `delay`.
    ///
    /// Returns `None` without scheduling once the registry is marked ended.
    pub fn schedule<M, F>(
        &mut self,
        delay: Duration,
        tx: mpsc::Sender<M>,
        make_msg: F,
    ) -> Option<TimerId>
    where
        M: Send + 'static,
        F: FnOnce(TimerId) -> M,
    {
        if self.ended {
            return None;
        }

        let id = TimerId(self.next_timer);
        self.next_timer += 1;

        let msg = make_msg(id);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(msg).await;
        });
        self.timers.insert(id, handle);

        Some(id)
    }

    /// Remove a fired timer's token. Returns false for unknown (already
    /// cancelled) tokens.
    pub fn complete(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel one scheduled refresh.
    pub fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }

    /// Cancel every scheduled refresh.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }

    /// True when nothing is in flight and nothing is scheduled.
    pub fn is_idle(&self) -> bool {
        self.inflight == 0 && self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflight_counting_saturates_at_zero() {
        let mut pending = PendingRegistry::new();
        assert!(pending.is_idle());

        pending.incr();
        pending.incr();
        assert_eq!(pending.inflight(), 2);
        assert!(!pending.is_idle());

        pending.decr();
        pending.decr();
        pending.decr();
        assert_eq!(pending.inflight(), 0);
        assert!(pending.is_idle());
    }

    #[tokio::test]
    async fn scheduled_timer_fires_and_delivers_its_token() {
        let mut pending = PendingRegistry::new();
        let (tx, mut rx) = mpsc::channel::<TimerId>(1);

        let id = pending
            .schedule(Duration::from_millis(5), tx, |id| id)
            .unwrap();
        assert!(!pending.is_idle());

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, id);

        assert!(pending.complete(fired));
        assert!(pending.is_idle());
    }

    #[tokio::test]
    async fn schedule_is_a_no_op_after_ended() {
        let mut pending = PendingRegistry::new();
        let (tx, _rx) = mpsc::channel::<TimerId>(1);

        pending.mark_ended();
        assert!(pending.schedule(Duration::from_millis(1), tx, |id| id).is_none());
        assert!(pending.is_idle());
    }

    #[tokio::test]
    async fn cancelled_timers_never_fire() {
        let mut pending = PendingRegistry::new();
        let (tx, mut rx) = mpsc::channel::<TimerId>(4);

        pending.schedule(Duration::from_millis(5), tx.clone(), |id| id);
        pending.schedule(Duration::from_millis(5), tx, |id| id);
        pending.cancel_all();
        assert!(pending.is_idle());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn completing_a_cancelled_timer_reports_unknown() {
        let mut pending = PendingRegistry::new();
        let (tx, _rx) = mpsc::channel::<TimerId>(1);

        let id = pending
            .schedule(Duration::from_secs(60), tx, |id| id)
            .unwrap();
        pending.cancel(id);
        assert!(!pending.complete(id));
    }
}
