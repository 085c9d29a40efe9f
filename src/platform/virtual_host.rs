//! Deterministic virtual-time host
//!
//! Frames arrive every `frame_interval_ms` and timers fire on exact multiples
//! of their period, with no real clock involved. Used by tests and by the
//! headless native binary.

use super::{GameOverNotice, Host, TimerKind, Wakeup};
use crate::session::Session;
use crate::sim::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualHandle(u64);

#[derive(Debug, Clone, Copy)]
enum PendingKind {
    Frame,
    Interval { timer: TimerKind, period_ms: f64 },
}

#[derive(Debug, Clone)]
struct Pending {
    handle: VirtualHandle,
    epoch: u64,
    due: f64,
    kind: PendingKind,
}

#[derive(Debug, Clone)]
pub struct VirtualHost {
    now: f64,
    frame_interval_ms: f64,
    next_handle: u64,
    pending: Vec<Pending>,
    last_snapshot: Option<Snapshot>,
    frames_rendered: u64,
    notices: Vec<GameOverNotice>,
}

impl VirtualHost {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            now: 0.0,
            frame_interval_ms,
            next_handle: 1,
            pending: Vec::new(),
            last_snapshot: None,
            frames_rendered: 0,
            notices: Vec::new(),
        }
    }

    /// Current virtual time (ms)
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Callbacks still armed
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[inline]
    pub fn notices(&self) -> &[GameOverNotice] {
        &self.notices
    }

    fn alloc_handle(&mut self) -> VirtualHandle {
        let handle = VirtualHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Pop the earliest callback due at or before `until` and move the clock
    /// to its due time. Ties go to the callback armed first.
    fn next_due(&mut self, until: f64) -> Option<(u64, Wakeup)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.handle.cmp(&b.handle)))
            .map(|(i, _)| i)?;

        let Pending { due, kind, .. } = self.pending[index];
        self.now = due;
        match kind {
            PendingKind::Frame => {
                let pending = self.pending.remove(index);
                Some((pending.epoch, Wakeup::Frame { timestamp: due }))
            }
            PendingKind::Interval { timer, period_ms } => {
                let pending = &mut self.pending[index];
                pending.due += period_ms;
                Some((pending.epoch, Wakeup::Timer(timer)))
            }
        }
    }
}

impl Host for VirtualHost {
    type Handle = VirtualHandle;

    fn request_frame(&mut self, epoch: u64) -> VirtualHandle {
        let handle = self.alloc_handle();
        self.pending.push(Pending {
            handle,
            epoch,
            due: self.now + self.frame_interval_ms,
            kind: PendingKind::Frame,
        });
        handle
    }

    fn set_interval(&mut self, timer: TimerKind, period_ms: f64, epoch: u64) -> VirtualHandle {
        let handle = self.alloc_handle();
        self.pending.push(Pending {
            handle,
            epoch,
            due: self.now + period_ms,
            kind: PendingKind::Interval { timer, period_ms },
        });
        handle
    }

    fn cancel(&mut self, handle: VirtualHandle) {
        self.pending.retain(|p| p.handle != handle);
    }

    fn render(&mut self, snapshot: &Snapshot) {
        self.frames_rendered += 1;
        self.last_snapshot = Some(snapshot.clone());
    }

    fn notify(&mut self, notice: &GameOverNotice) {
        self.notices.push(notice.clone());
    }
}

impl Session<VirtualHost> {
    /// Advance virtual time by `ms`, delivering every callback that falls due
    pub fn advance(&mut self, ms: f64) {
        let until = self.host.now + ms;
        while let Some((epoch, wakeup)) = self.host.next_due(until) {
            self.dispatch(epoch, wakeup);
        }
        self.host.now = until;
    }
}
