use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::game::SessionId;
use crate::runtime::GameEvent;

/// Countdown cadence for timed games
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A repeating countdown owned by exactly one session. Sends
/// `GameEvent::Countdown(session)` every period until cancelled or dropped.
#[derive(Debug)]
pub struct Countdown {
    session: SessionId,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn spawn(session: SessionId, period: Duration, tx: Sender<GameEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || loop {
            let deadline = Instant::now() + period;
            // park_timeout can wake early, either spuriously or from cancel()
            loop {
                if flag.load(Ordering::Acquire) {
                    return;
                }
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::park_timeout(deadline - now);
            }
            if flag.load(Ordering::Acquire) || tx.send(GameEvent::Countdown(session)).is_err() {
                return;
            }
        });

        debug!(session = ?session, ?period, "countdown spawned");
        Self {
            session,
            cancelled,
            handle,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            self.handle.thread().unpark();
            debug!(session = ?self.session, "countdown cancelled");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holds at most one live countdown. Replacing it cancels the old one first.
#[derive(Debug, Default)]
pub struct CountdownSlot {
    active: Option<Countdown>,
}

impl CountdownSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the live countdown match `wanted`: keep it if the session is the
    /// same, otherwise cancel it and spawn one for the new session (if any).
    pub fn sync(&mut self, wanted: Option<SessionId>, period: Duration, tx: &Sender<GameEvent>) {
        if self.session() == wanted {
            return;
        }

        if let Some(old) = self.active.take() {
            old.cancel();
        }

        self.active = wanted.map(|session| Countdown::spawn(session, period, tx.clone()));
    }

    pub fn session(&self) -> Option<SessionId> {
        self.active.as_ref().map(Countdown::session)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.active.take() {
            old.cancel();
        }
    }
}
