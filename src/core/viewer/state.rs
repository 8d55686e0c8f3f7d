//=========================================================================
// Viewer State Machine
//=========================================================================
//
// Owns the active scene and its load phase.
//
// States:
//   Uninitialized ──initialize──> Loading(token) ──mark_ready(token)──> Ready
//                                   │    ↑                               │
//                                   │    └──────request_switch───────────┘
//                                   └──check_timeout / mark_failed──> Failed
//
// Every scene change issues a fresh SceneToken and forces the phase out of
// Ready before returning. Signals carrying an older token are ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::catalog::{PanoramicMedia, SceneDescriptor};
use crate::core::material::{ModelHandle, RequestedMaterial};
use crate::core::readiness::SceneToken;

//=== ActiveScene =========================================================

/// What the viewer is currently showing. Mirrors [`RequestedMaterial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveScene {
    Panoramic(PanoramicMedia),
    Procedural(ModelHandle),
}

impl ActiveScene {
    pub fn media(&self) -> Option<&PanoramicMedia> {
        match self {
            Self::Panoramic(media) => Some(media),
            Self::Procedural(_) => None,
        }
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self, Self::Procedural(_))
    }
}

impl From<&RequestedMaterial> for ActiveScene {
    fn from(material: &RequestedMaterial) -> Self {
        match material {
            RequestedMaterial::Panoramic(media) => Self::Panoramic(media.clone()),
            RequestedMaterial::Procedural(model) => Self::Procedural(model.clone()),
        }
    }
}

//=== ViewerPhase =========================================================

/// Load phase of the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerPhase {
    /// Nothing opened yet (or closed).
    Uninitialized,

    /// Backend is preparing the active scene.
    Loading,

    /// Backend reported the active scene ready.
    Ready,

    /// Active scene timed out or its backend failed to mount it.
    Failed,
}

//=== SwitchError =========================================================

/// Reasons a scene switch was refused. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchError {
    /// Viewer has not been opened.
    NotOpen,

    /// Active scene is a procedural model; switching is not offered.
    ProceduralMode,

    /// Catalog has no entry at this index.
    UnknownEntry(usize),
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => write!(f, "Viewer is not open"),
            Self::ProceduralMode => write!(f, "Scene switching is unavailable for procedural models"),
            Self::UnknownEntry(index) => write!(f, "No catalog entry at index {}", index),
        }
    }
}

impl std::error::Error for SwitchError {}

//=== ViewerState =========================================================

/// The viewer state machine. Only the viewer mutates it.
#[derive(Debug)]
pub struct ViewerState {
    active: Option<ActiveScene>,
    phase: ViewerPhase,
    token: Option<SceneToken>,
    last_issued: SceneToken,
    loading_since: Option<Instant>,
}

impl ViewerState {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            active: None,
            phase: ViewerPhase::Uninitialized,
            token: None,
            last_issued: SceneToken::new(0),
            loading_since: None,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Loads `material` as the active scene, discarding prior readiness.
    ///
    /// Valid from any phase. Procedural models are ready immediately;
    /// panoramic media enters `Loading`.
    pub fn initialize(&mut self, material: &RequestedMaterial, now: Instant) -> SceneToken {
        let scene = ActiveScene::from(material);
        let token = self.issue_token();

        if scene.is_procedural() {
            info!(target: "viewer", "Initialized procedural scene {}", token);
            self.phase = ViewerPhase::Ready;
            self.loading_since = None;
        } else {
            info!(target: "viewer", "Initialized panoramic scene {}, loading", token);
            self.phase = ViewerPhase::Loading;
            self.loading_since = Some(now);
        }

        self.active = Some(scene);
        token
    }

    /// Switches to a catalog scene. Readiness is invalidated before this
    /// returns.
    ///
    /// Re-selecting the active scene restarts loading as well.
    pub fn request_switch(
        &mut self,
        descriptor: &SceneDescriptor,
        now: Instant,
    ) -> Result<SceneToken, SwitchError> {
        match &self.active {
            None => return Err(SwitchError::NotOpen),
            Some(ActiveScene::Procedural(_)) => return Err(SwitchError::ProceduralMode),
            Some(ActiveScene::Panoramic(media)) if media.media_ref == descriptor.media_ref => {
                debug!(target: "viewer", "Re-selected active scene '{}', restarting load", descriptor.id);
            }
            Some(ActiveScene::Panoramic(_)) => {}
        }

        let token = self.issue_token();
        self.active = Some(ActiveScene::Panoramic(descriptor.media()));
        self.phase = ViewerPhase::Loading;
        self.loading_since = Some(now);

        info!(target: "viewer", "Switching to '{}' ({})", descriptor.id, token);
        Ok(token)
    }

    /// Applies a readiness signal. Returns `true` if the phase is now
    /// `Ready` because of it (or already was, for the current token).
    ///
    /// Signals for superseded tokens are no-ops.
    pub fn mark_ready(&mut self, token: SceneToken) -> bool {
        if self.token != Some(token) {
            debug!(target: "viewer", "Ignoring stale ready signal {}", token);
            return false;
        }

        match self.phase {
            ViewerPhase::Loading => {
                info!(target: "viewer", "Scene {} ready", token);
            }
            ViewerPhase::Failed => {
                info!(target: "viewer", "Scene {} became ready after failing", token);
            }
            ViewerPhase::Ready => return true,
            ViewerPhase::Uninitialized => return false,
        }

        self.phase = ViewerPhase::Ready;
        self.loading_since = None;
        true
    }

    /// Marks the current scene failed (backend refused to mount it).
    pub fn mark_failed(&mut self, token: SceneToken) -> bool {
        if self.token != Some(token) || self.phase == ViewerPhase::Uninitialized {
            return false;
        }

        warn!(target: "viewer", "Scene {} failed", token);
        self.phase = ViewerPhase::Failed;
        self.loading_since = None;
        true
    }

    /// Fails the current load once it has waited longer than `timeout`.
    ///
    /// `None` disables the timeout (loading may last forever).
    pub fn check_timeout(&mut self, now: Instant, timeout: Option<Duration>) -> bool {
        let (Some(timeout), Some(since)) = (timeout, self.loading_since) else {
            return false;
        };

        if self.phase != ViewerPhase::Loading || now.saturating_duration_since(since) < timeout {
            return false;
        }

        warn!(
            target: "viewer",
            "Scene {:?} did not become ready within {:?}",
            self.token, timeout
        );
        self.phase = ViewerPhase::Failed;
        self.loading_since = None;
        true
    }

    /// Returns to `Uninitialized` (overlay closed).
    pub fn reset(&mut self) {
        self.active = None;
        self.phase = ViewerPhase::Uninitialized;
        self.token = None;
        self.loading_since = None;
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_ready(&self) -> bool {
        self.phase == ViewerPhase::Ready
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn active_scene(&self) -> Option<&ActiveScene> {
        self.active.as_ref()
    }

    /// Token of the active scene.
    pub fn token(&self) -> Option<SceneToken> {
        self.token
    }

    //--- Internal Helpers -------------------------------------------------

    fn issue_token(&mut self) -> SceneToken {
        self.last_issued = self.last_issued.next();
        self.token = Some(self.last_issued);
        self.last_issued
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::MediaKind;
    use crate::core::material::ModelProducer;

    struct Atom;

    impl ModelProducer for Atom {
        fn name(&self) -> &str {
            "atom"
        }
    }

    fn image(media_ref: &str) -> RequestedMaterial {
        RequestedMaterial::panoramic(media_ref, MediaKind::Image)
    }

    fn descriptor(id: &str, media_ref: &str, kind: MediaKind) -> SceneDescriptor {
        SceneDescriptor::new(id, id, media_ref, kind)
    }

    //--- Initialization ---------------------------------------------------

    #[test]
    fn new_state_is_uninitialized() {
        let state = ViewerState::new();
        assert_eq!(state.phase(), ViewerPhase::Uninitialized);
        assert!(!state.is_ready());
        assert!(state.active_scene().is_none());
        assert!(state.token().is_none());
    }

    #[test]
    fn initialize_panoramic_starts_loading() {
        let mut state = ViewerState::new();
        let token = state.initialize(&image("u1"), Instant::now());

        assert!(!state.is_ready());
        assert_eq!(state.phase(), ViewerPhase::Loading);
        assert_eq!(state.token(), Some(token));
        assert_eq!(
            state.active_scene(),
            Some(&ActiveScene::Panoramic(PanoramicMedia::new("u1", MediaKind::Image)))
        );
    }

    #[test]
    fn initialize_procedural_is_ready_immediately() {
        let mut state = ViewerState::new();
        let model = ModelHandle::new(Atom);
        state.initialize(&RequestedMaterial::procedural(model.clone()), Instant::now());

        assert!(state.is_ready());
        assert_eq!(state.active_scene(), Some(&ActiveScene::Procedural(model)));
    }

    #[test]
    fn reinitialize_discards_prior_readiness() {
        let mut state = ViewerState::new();
        let first = state.initialize(&image("u1"), Instant::now());
        assert!(state.mark_ready(first));

        let second = state.initialize(&image("u2"), Instant::now());

        assert!(!state.is_ready());
        assert!(!state.mark_ready(first), "Old token must be stale");
        assert!(state.mark_ready(second));
    }

    //--- Switching --------------------------------------------------------

    #[test]
    fn switch_invalidates_readiness_synchronously() {
        let mut state = ViewerState::new();
        let token = state.initialize(&image("u1"), Instant::now());
        state.mark_ready(token);

        state
            .request_switch(&descriptor("b", "u2", MediaKind::Video), Instant::now())
            .unwrap();

        assert!(!state.is_ready());
        assert_eq!(state.active_scene().and_then(|s| s.media()).map(|m| m.kind), Some(MediaKind::Video));
    }

    #[test]
    fn only_last_switch_can_become_ready() {
        let mut state = ViewerState::new();
        state.initialize(&image("u0"), Instant::now());

        let tokens: Vec<SceneToken> = ["u1", "u2", "u3"]
            .iter()
            .map(|media_ref| {
                state
                    .request_switch(&descriptor(media_ref, media_ref, MediaKind::Image), Instant::now())
                    .unwrap()
            })
            .collect();

        assert!(!state.mark_ready(tokens[0]));
        assert!(!state.mark_ready(tokens[1]));
        assert!(!state.is_ready());
        assert!(state.mark_ready(tokens[2]));
        assert!(state.is_ready());
    }

    #[test]
    fn reselecting_same_scene_restarts_loading_with_new_token() {
        let mut state = ViewerState::new();
        let first = state.initialize(&image("u1"), Instant::now());
        state.mark_ready(first);

        let second = state
            .request_switch(&descriptor("a", "u1", MediaKind::Image), Instant::now())
            .unwrap();

        assert_ne!(first, second);
        assert!(!state.is_ready());
        assert!(!state.mark_ready(first));
        assert!(state.mark_ready(second));
    }

    #[test]
    fn switch_rejected_before_open() {
        let mut state = ViewerState::new();
        let result = state.request_switch(&descriptor("a", "u1", MediaKind::Image), Instant::now());

        assert_eq!(result, Err(SwitchError::NotOpen));
        assert_eq!(state.phase(), ViewerPhase::Uninitialized);
    }

    #[test]
    fn switch_rejected_in_procedural_mode_without_state_change() {
        let mut state = ViewerState::new();
        let model = ModelHandle::new(Atom);
        let token = state.initialize(&RequestedMaterial::procedural(model.clone()), Instant::now());

        let result = state.request_switch(&descriptor("a", "u1", MediaKind::Image), Instant::now());

        assert_eq!(result, Err(SwitchError::ProceduralMode));
        assert!(state.is_ready());
        assert_eq!(state.token(), Some(token));
        assert_eq!(state.active_scene(), Some(&ActiveScene::Procedural(model)));
    }

    //--- Readiness --------------------------------------------------------

    #[test]
    fn mark_ready_is_idempotent() {
        let mut state = ViewerState::new();
        let token = state.initialize(&image("u1"), Instant::now());

        assert!(state.mark_ready(token));
        assert!(state.mark_ready(token));
        assert!(state.is_ready());
    }

    #[test]
    fn mark_ready_after_reset_is_ignored() {
        let mut state = ViewerState::new();
        let token = state.initialize(&image("u1"), Instant::now());
        state.reset();

        assert!(!state.mark_ready(token));
        assert_eq!(state.phase(), ViewerPhase::Uninitialized);
    }

    #[test]
    fn tokens_keep_increasing_across_reset() {
        let mut state = ViewerState::new();
        let first = state.initialize(&image("u1"), Instant::now());
        state.reset();
        let second = state.initialize(&image("u1"), Instant::now());

        assert!(second > first);
        assert!(!state.mark_ready(first));
    }

    #[test]
    fn documented_switch_scenario() {
        let mut state = ViewerState::new();
        let t1 = state.initialize(&image("u1"), Instant::now());
        assert!(!state.is_ready());

        state.mark_ready(t1);
        assert!(state.is_ready());

        let t2 = state
            .request_switch(&descriptor("b", "u2", MediaKind::Video), Instant::now())
            .unwrap();
        assert!(!state.is_ready());

        state.mark_ready(t1);
        assert!(!state.is_ready(), "Stale signal for u1 must not mark u2 ready");

        state.mark_ready(t2);
        assert!(state.is_ready());
    }

    //--- Failure ----------------------------------------------------------

    #[test]
    fn timeout_fails_loading_scene() {
        let mut state = ViewerState::new();
        let start = Instant::now();
        state.initialize(&image("u1"), start);

        let timeout = Some(Duration::from_secs(20));
        assert!(!state.check_timeout(start + Duration::from_secs(19), timeout));
        assert_eq!(state.phase(), ViewerPhase::Loading);

        assert!(state.check_timeout(start + Duration::from_secs(20), timeout));
        assert_eq!(state.phase(), ViewerPhase::Failed);
        assert!(!state.is_ready());
    }

    #[test]
    fn disabled_timeout_keeps_loading_forever() {
        let mut state = ViewerState::new();
        let start = Instant::now();
        state.initialize(&image("u1"), start);

        assert!(!state.check_timeout(start + Duration::from_secs(3600), None));
        assert_eq!(state.phase(), ViewerPhase::Loading);
    }

    #[test]
    fn timeout_ignores_ready_scene() {
        let mut state = ViewerState::new();
        let start = Instant::now();
        let token = state.initialize(&image("u1"), start);
        state.mark_ready(token);

        assert!(!state.check_timeout(start + Duration::from_secs(60), Some(Duration::from_secs(1))));
        assert!(state.is_ready());
    }

    #[test]
    fn switch_restarts_timeout_clock() {
        let mut state = ViewerState::new();
        let start = Instant::now();
        state.initialize(&image("u1"), start);

        let later = start + Duration::from_secs(15);
        state
            .request_switch(&descriptor("b", "u2", MediaKind::Image), later)
            .unwrap();

        let timeout = Some(Duration::from_secs(10));
        assert!(!state.check_timeout(later + Duration::from_secs(9), timeout));
        assert!(state.check_timeout(later + Duration::from_secs(10), timeout));
    }

    #[test]
    fn late_ready_recovers_failed_scene() {
        let mut state = ViewerState::new();
        let start = Instant::now();
        let token = state.initialize(&image("u1"), start);
        state.check_timeout(start + Duration::from_secs(30), Some(Duration::from_secs(20)));

        assert!(state.mark_ready(token));
        assert!(state.is_ready());
    }

    #[test]
    fn mark_failed_ignores_stale_token() {
        let mut state = ViewerState::new();
        let old = state.initialize(&image("u1"), Instant::now());
        let current = state.initialize(&image("u2"), Instant::now());

        assert!(!state.mark_failed(old));
        assert_eq!(state.phase(), ViewerPhase::Loading);

        assert!(state.mark_failed(current));
        assert_eq!(state.phase(), ViewerPhase::Failed);
    }

    #[test]
    fn switch_error_display() {
        assert_eq!(SwitchError::UnknownEntry(7).to_string(), "No catalog entry at index 7");
    }
}
