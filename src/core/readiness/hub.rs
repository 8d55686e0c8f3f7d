//=========================================================================
// Readiness Hub
//=========================================================================
//
// Owns the readiness channel and the single live registration.
//
// Architecture:
//   subscribe(token) → revoke previous Registration → new ReadyNotifier
//   drain()          → bounded try_recv loop → Vec<ReadySignal>
//
// Registrations are revoked on drop, so replacing, clearing or dropping
// the hub always deregisters the previous listener.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::{ReadySignal, SceneToken};

//=== Registration ========================================================

/// Live listener registration. Revoked when dropped.
struct Registration {
    token: SceneToken,
    live: Arc<AtomicBool>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
        trace!(target: "viewer::readiness", "Registration {} revoked", self.token);
    }
}

//=== ReadyNotifier =======================================================

/// One-shot handle a backend uses to report that a scene is ready.
///
/// `Send`, so backends may fire it from a decoder thread.
#[derive(Debug)]
pub struct ReadyNotifier {
    token: SceneToken,
    sender: Sender<ReadySignal>,
    live: Arc<AtomicBool>,
}

impl ReadyNotifier {
    pub fn token(&self) -> SceneToken {
        self.token
    }

    /// Returns `false` while the viewer still listens for this scene.
    pub fn is_revoked(&self) -> bool {
        !self.live.load(Ordering::Acquire)
    }

    /// Reports readiness. Consumes the notifier.
    ///
    /// Returns `false` if the registration was already revoked or the
    /// viewer is gone; the signal is dropped in that case.
    pub fn notify(self) -> bool {
        if self.is_revoked() {
            trace!(target: "viewer::readiness", "Dropping signal for revoked {}", self.token);
            return false;
        }

        self.sender.send(ReadySignal { token: self.token }).is_ok()
    }
}

//=== ReadinessHub ========================================================

/// Viewer-side end of the readiness channel.
pub struct ReadinessHub {
    sender: Sender<ReadySignal>,
    receiver: Receiver<ReadySignal>,
    current: Option<Registration>,
    budget: usize,
}

impl ReadinessHub {
    //--- Construction -----------------------------------------------------

    /// Creates a hub that drains at most `budget` signals per call.
    pub fn new(budget: usize) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            current: None,
            budget: budget.max(1),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a listener for `token`, revoking the previous one.
    pub fn subscribe(&mut self, token: SceneToken) -> ReadyNotifier {
        let live = Arc::new(AtomicBool::new(true));

        // Dropping the old registration revokes it before the new one exists
        self.current = None;
        self.current = Some(Registration {
            token,
            live: Arc::clone(&live),
        });

        trace!(target: "viewer::readiness", "Subscribed to {}", token);

        ReadyNotifier {
            token,
            sender: self.sender.clone(),
            live,
        }
    }

    /// Revokes the live registration, if any.
    pub fn revoke(&mut self) {
        self.current = None;
    }

    /// Token of the live registration.
    pub fn subscribed_token(&self) -> Option<SceneToken> {
        self.current.as_ref().map(|registration| registration.token)
    }

    //--- Collection -------------------------------------------------------

    /// Collects pending signals without blocking (bounded per call).
    pub fn drain(&mut self) -> Vec<ReadySignal> {
        let mut signals = Vec::new();

        while signals.len() < self.budget {
            match self.receiver.try_recv() {
                Ok(signal) => signals.push(signal),
                Err(TryRecvError::Empty) => break,
                // Unreachable while the hub holds its own sender
                Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.has_backlog() {
            warn!(
                target: "viewer::readiness",
                "Readiness backlog: drained {} signals, {} still pending",
                signals.len(),
                self.receiver.len()
            );
        }

        signals
    }

    fn has_backlog(&self) -> bool {
        !self.receiver.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
