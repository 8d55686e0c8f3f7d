//=========================================================================
// Readiness Signals
//=========================================================================
//
// Scene-scoped, one-shot "assets are ready" notifications from rendering
// backends back to the viewer.
//
// Architecture:
//   Viewer ── subscribe(token) ──> ReadyNotifier ──> backend (any thread)
//                                        │
//                                  notify(self)
//                                        ↓
//   Viewer <── drain() <── crossbeam channel <── ReadySignal { token }
//
// Every signal carries the token it was issued for. The viewer state
// machine discards signals whose token is no longer current.
//
//=========================================================================

//=== Module Declarations =================================================

mod hub;

//=== Public API ==========================================================

pub use hub::{ReadinessHub, ReadyNotifier};

//=== SceneToken ==========================================================

/// Generation number identifying one load of one scene.
///
/// Issued by the viewer state machine on every scene change. Two loads of
/// the same media get different tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneToken(u64);

impl SceneToken {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// Returns the token issued after this one.
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SceneToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ReadySignal =========================================================

/// A backend finished preparing the scene identified by `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadySignal {
    pub token: SceneToken,
}

//=========================================================================
// Unit Tests
//=========================================================================
