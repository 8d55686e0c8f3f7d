//=========================================================================
// Viewer
//=========================================================================
//
// The immersive overlay: owns the state machine and drives the backends.
//
// Architecture:
// ```text
//   host ── open(material) ──┐
//   input ── handle_input ───┼─> ViewerState ──present()──> Presentation
//   tick ─── update(now) ────┘        ↑                        │
//                                     │                        ↓
//                    ReadinessHub <── notifier <── PanoramicBackend / ProceduralBackend
// ```
//
// Single-threaded: every mutation happens on the thread that owns the
// viewer. Backends may fire notifiers from elsewhere; signals are only
// applied in `update`.
//
// Lifecycle:
// - `open` mounts the backend for the material's arm
// - scene switches re-target the panoramic backend in place
// - changing arms unmounts the other backend first
// - `close` (or drop) unmounts everything and revokes the registration
//
//=========================================================================

//=== Module Declarations =================================================

mod state;

//=== Public API ==========================================================

pub use state::{ActiveScene, SwitchError, ViewerPhase, ViewerState};

//=== External Dependencies ===============================================

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::backend::BackendProvider;
use crate::core::catalog::{SceneCatalog, SceneDescriptor};
use crate::core::dispatch::{self, ChromeLayout, Presentation, RenderMode};
use crate::core::input::{ActionMapper, InputContext, InputEvent, MouseButton, ViewerAction};
use crate::core::material::RequestedMaterial;
use crate::core::readiness::{ReadinessHub, SceneToken};

//=== ViewerConfig ========================================================

/// Runtime knobs for a [`Viewer`].
///
/// # Default Values
///
/// - **Load timeout**: 20 s (`None` waits forever)
/// - **Signal budget**: 64 readiness signals per update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
    pub load_timeout: Option<Duration>,
    pub signal_budget: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            load_timeout: Some(Duration::from_secs(20)),
            signal_budget: 64,
        }
    }
}

//=== Mounted =============================================================

/// Which backend currently holds a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mounted {
    Panoramic,
    Procedural,
}

//=== Viewer ==============================================================

/// Immersive scene viewer overlay.
///
/// # Examples
///
/// ```no_run
/// use std::time::Instant;
/// use immersive_viewer::core::backend::Backends;
/// use immersive_viewer::core::catalog::SceneCatalog;
/// use immersive_viewer::core::material::RequestedMaterial;
/// use immersive_viewer::core::viewer::{Viewer, ViewerConfig};
///
/// let catalog = SceneCatalog::default();
/// let first = RequestedMaterial::from(catalog.get(0).unwrap());
///
/// let mut viewer = Viewer::new(catalog, Backends::headless(), ViewerConfig::default())
///     .on_close(|| println!("closed"));
/// viewer.open(first, Instant::now());
///
/// // Each tick:
/// viewer.update(Instant::now());
/// ```
pub struct Viewer {
    state: ViewerState,
    catalog: SceneCatalog,
    config: ViewerConfig,
    hub: ReadinessHub,
    backends: Box<dyn BackendProvider>,
    mapper: ActionMapper,
    mounted: Option<Mounted>,
    viewport_width: f32,
    on_close: Option<Box<dyn FnMut()>>,
}

impl Viewer {
    //--- Construction -----------------------------------------------------

    pub fn new<B>(catalog: SceneCatalog, backends: B, config: ViewerConfig) -> Self
    where
        B: BackendProvider + 'static,
    {
        Self {
            state: ViewerState::new(),
            catalog,
            config,
            hub: ReadinessHub::new(config.signal_budget),
            backends: Box::new(backends),
            mapper: ActionMapper::with_default_bindings(),
            mounted: None,
            viewport_width: 800.0,
            on_close: None,
        }
    }

    /// Sets the callback invoked when the viewer closes.
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Replaces the key bindings.
    pub fn with_action_mapper(mut self, mapper: ActionMapper) -> Self {
        self.mapper = mapper;
        self
    }

    //--- Host Interface ---------------------------------------------------

    /// Opens the overlay on `material`. Re-opening replaces the scene.
    pub fn open(&mut self, material: RequestedMaterial, now: Instant) -> SceneToken {
        let token = self.state.initialize(&material, now);
        self.sync_backends();
        token
    }

    /// Switches to catalog entry `index`.
    pub fn switch_to(&mut self, index: usize, now: Instant) -> Result<SceneToken, SwitchError> {
        let descriptor = self
            .catalog
            .get(index)
            .cloned()
            .ok_or(SwitchError::UnknownEntry(index))?;

        self.request_switch(&descriptor, now)
    }

    /// Switches to `descriptor`, which need not be in the catalog.
    pub fn request_switch(
        &mut self,
        descriptor: &SceneDescriptor,
        now: Instant,
    ) -> Result<SceneToken, SwitchError> {
        let token = self.state.request_switch(descriptor, now)?;
        self.sync_backends();
        Ok(token)
    }

    /// Performs a resolved action.
    pub fn apply(&mut self, action: ViewerAction, now: Instant) -> Result<(), SwitchError> {
        debug!(target: "viewer", "Applying {:?}", action);

        match action {
            ViewerAction::SwitchScene(index) => self.switch_to(index, now).map(|_| ()),
            ViewerAction::Exit => {
                self.close();
                Ok(())
            }
        }
    }

    /// Resolves and applies a raw input event.
    ///
    /// Returns the action performed, if any. Refused switches are logged
    /// and reported as no action.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> Option<ViewerAction> {
        let action = match event {
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                x,
                y,
                ..
            } => self.hit_test(*x, *y),
            other => self.mapper.map_event(other),
        }?;

        match self.apply(action, now) {
            Ok(()) => Some(action),
            Err(e) => {
                warn!(target: "viewer", "Ignoring {:?}: {}", action, e);
                None
            }
        }
    }

    /// Applies pending readiness signals and the load timeout.
    ///
    /// Returns `true` if the phase changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let before = self.state.phase();

        for signal in self.hub.drain() {
            trace!(target: "viewer::readiness", "Received ready signal {}", signal.token);
            self.state.mark_ready(signal.token);
        }

        self.state.check_timeout(now, self.config.load_timeout);

        self.state.phase() != before
    }

    /// Closes the overlay and notifies the host.
    ///
    /// Closing a viewer that is not open only tears down; the host is not
    /// notified again.
    pub fn close(&mut self) {
        if !self.is_open() {
            debug!(target: "viewer", "Close requested while not open");
            self.dismiss();
            return;
        }

        info!(target: "viewer", "Closing viewer");
        self.dismiss();

        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }

    /// Closes the overlay without notifying the host.
    ///
    /// Used when the host itself abandons the viewer, e.g. the window could
    /// not be created.
    pub fn dismiss(&mut self) {
        self.teardown();
        self.state.reset();
        self.mapper.set_context(InputContext::Panoramic);
    }

    /// Tells the viewer how wide the overlay is, in logical pixels.
    pub fn resize(&mut self, width: f32) {
        self.viewport_width = width;
    }

    //--- Queries ----------------------------------------------------------

    /// What should be on screen now. `None` when closed.
    pub fn presentation(&self) -> Option<Presentation> {
        dispatch::present(&self.state, &self.catalog)
    }

    /// Positions of the clickable controls in the current presentation.
    pub fn layout(&self) -> Option<ChromeLayout> {
        self.presentation()
            .map(|presentation| ChromeLayout::compute(&presentation.chrome, self.viewport_width))
    }

    pub fn is_open(&self) -> bool {
        self.state.active_scene().is_some()
    }

    pub fn phase(&self) -> ViewerPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn input_context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Internal Helpers -------------------------------------------------

    fn hit_test(&self, x: f32, y: f32) -> Option<ViewerAction> {
        self.layout()?.hit_test(x, y)
    }

    /// Brings the backends in line with the current state.
    fn sync_backends(&mut self) {
        let (Some(presentation), Some(token)) = (self.presentation(), self.state.token()) else {
            return;
        };

        match presentation.mode {
            RenderMode::Panoramic(instructions) => {
                if self.mounted == Some(Mounted::Procedural) {
                    self.backends.procedural().unmount();
                }

                let notifier = self.hub.subscribe(token);
                if let Err(e) = self.backends.panoramic().show(&instructions, notifier) {
                    warn!(target: "viewer", "Panoramic backend refused {}: {}", token, e);
                    self.state.mark_failed(token);
                }

                self.mounted = Some(Mounted::Panoramic);
                self.mapper.set_context(InputContext::Panoramic);
            }
            RenderMode::Procedural(instructions) => {
                // Procedural mounts are never re-targeted
                match self.mounted {
                    Some(Mounted::Panoramic) => self.backends.panoramic().unmount(),
                    Some(Mounted::Procedural) => self.backends.procedural().unmount(),
                    None => {}
                }
                self.hub.revoke();

                if let Err(e) = self.backends.procedural().mount(&instructions) {
                    warn!(target: "viewer", "Procedural backend refused {}: {}", token, e);
                    self.state.mark_failed(token);
                }

                self.mounted = Some(Mounted::Procedural);
                self.mapper.set_context(InputContext::Procedural);
            }
        }
    }

    fn teardown(&mut self) {
        self.hub.revoke();

        match self.mounted.take() {
            Some(Mounted::Panoramic) => self.backends.panoramic().unmount(),
            Some(Mounted::Procedural) => self.backends.procedural().unmount(),
            None => {}
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::core::backend::{BackendError, Backends, PanoramicBackend, ProceduralBackend};
    use crate::core::catalog::MediaKind;
    use crate::core::dispatch::{PanoramicInstructions, ProceduralInstructions, StatusOverlay};
    use crate::core::input::KeyCode;
    use crate::core::material::{ModelHandle, ModelProducer};
    use crate::core::readiness::ReadyNotifier;

    //--- Recording Backends -----------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Show(String),
        UnmountPanoramic,
        Mount(String),
        UnmountProcedural,
    }

    type Log = Rc<RefCell<Vec<Call>>>;
    type Notifiers = Rc<RefCell<Vec<ReadyNotifier>>>;

    struct RecordingPanoramic {
        log: Log,
        notifiers: Notifiers,
        refuse: bool,
    }

    impl PanoramicBackend for RecordingPanoramic {
        fn show(
            &mut self,
            instructions: &PanoramicInstructions,
            notifier: ReadyNotifier,
        ) -> Result<(), BackendError> {
            self.log.borrow_mut().push(Call::Show(instructions.media.media_ref.clone()));
            if self.refuse {
                return Err(BackendError::Unavailable("test".into()));
            }
            self.notifiers.borrow_mut().push(notifier);
            Ok(())
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(Call::UnmountPanoramic);
        }
    }

    struct RecordingProcedural {
        log: Log,
    }

    impl ProceduralBackend for RecordingProcedural {
        fn mount(&mut self, instructions: &ProceduralInstructions) -> Result<(), BackendError> {
            self.log.borrow_mut().push(Call::Mount(instructions.model.name().to_owned()));
            Ok(())
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(Call::UnmountProcedural);
        }
    }

    struct Molecule;

    impl ModelProducer for Molecule {
        fn name(&self) -> &str {
            "molecule"
        }
    }

    //--- Fixture ----------------------------------------------------------

    struct Fixture {
        viewer: Viewer,
        log: Log,
        notifiers: Notifiers,
        closed: Rc<Cell<u32>>,
    }

    impl Fixture {
        fn with(refuse_panoramic: bool, config: ViewerConfig) -> Self {
            let log: Log = Rc::default();
            let notifiers: Notifiers = Rc::default();
            let closed = Rc::new(Cell::new(0));

            let backends = Backends::new(
                RecordingPanoramic {
                    log: Rc::clone(&log),
                    notifiers: Rc::clone(&notifiers),
                    refuse: refuse_panoramic,
                },
                RecordingProcedural { log: Rc::clone(&log) },
            );

            let counter = Rc::clone(&closed);
            let viewer = Viewer::new(SceneCatalog::default(), backends, config)
                .on_close(move || counter.set(counter.get() + 1));

            Self { viewer, log, notifiers, closed }
        }

        fn new() -> Self {
            Self::with(false, ViewerConfig::default())
        }

        fn calls(&self) -> Vec<Call> {
            self.log.borrow().clone()
        }

        /// Fires the notifier handed out for `token`.
        fn fire(&self, token: SceneToken) -> bool {
            let mut notifiers = self.notifiers.borrow_mut();
            let position = notifiers.iter().position(|n| n.token() == token);
            match position {
                Some(index) => notifiers.remove(index).notify(),
                None => false,
            }
        }

        fn open_first(&mut self, now: Instant) -> SceneToken {
            let material = RequestedMaterial::from(self.viewer.catalog().get(0).unwrap());
            self.viewer.open(material, now)
        }
    }

    fn scene_media(viewer: &Viewer) -> Option<String> {
        viewer
            .state()
            .active_scene()
            .and_then(|scene| scene.media())
            .map(|media| media.media_ref.clone())
    }

    //=====================================================================
    // Opening
    //=====================================================================

    #[test]
    fn open_panoramic_mounts_and_loads() {
        let mut fx = Fixture::new();
        let now = Instant::now();

        fx.open_first(now);

        assert!(fx.viewer.is_open());
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);
        assert_eq!(fx.calls().len(), 1);
        assert!(matches!(&fx.calls()[0], Call::Show(_)));

        let presentation = fx.viewer.presentation().unwrap();
        assert!(matches!(presentation.chrome.status, Some(StatusOverlay::Loading { .. })));
        assert!(presentation.chrome.menu.is_some());
    }

    #[test]
    fn open_procedural_is_ready_without_signal() {
        let mut fx = Fixture::new();

        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), Instant::now());

        assert!(fx.viewer.state().is_ready());
        assert_eq!(fx.calls(), vec![Call::Mount("molecule".into())]);
        assert_eq!(fx.viewer.input_context(), InputContext::Procedural);
        assert!(fx.viewer.presentation().unwrap().chrome.menu.is_none());
    }

    #[test]
    fn refused_mount_fails_the_scene() {
        let mut fx = Fixture::with(true, ViewerConfig::default());

        fx.open_first(Instant::now());

        assert_eq!(fx.viewer.phase(), ViewerPhase::Failed);
        let presentation = fx.viewer.presentation().unwrap();
        assert!(matches!(presentation.chrome.status, Some(StatusOverlay::Failed { .. })));
    }

    //=====================================================================
    // Readiness
    //=====================================================================

    #[test]
    fn ready_signal_is_applied_on_update() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let token = fx.open_first(now);

        assert!(fx.fire(token));
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading, "Applied only in update");

        assert!(fx.viewer.update(now));
        assert!(fx.viewer.state().is_ready());
        assert!(fx.viewer.presentation().unwrap().chrome.status.is_none());
    }

    #[test]
    fn stale_signal_after_switch_is_ignored() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let first = fx.open_first(now);

        let second = fx.viewer.switch_to(1, now).unwrap();

        // The first scene's loader finishes late; its registration is gone
        assert!(!fx.fire(first));
        fx.viewer.update(now);
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);

        assert!(fx.fire(second));
        fx.viewer.update(now);
        assert!(fx.viewer.state().is_ready());
        assert_eq!(scene_media(&fx.viewer), Some(fx.viewer.catalog().get(1).unwrap().media_ref.clone()));
    }

    #[test]
    fn scene1_scene2_scene1_scenario() {
        let mut fx = Fixture::new();
        let now = Instant::now();

        let t1 = fx.open_first(now);
        assert!(fx.fire(t1));
        fx.viewer.update(now);
        assert!(fx.viewer.state().is_ready());

        let t2 = fx.viewer.switch_to(1, now).unwrap();
        assert!(!fx.viewer.state().is_ready());

        let t3 = fx.viewer.switch_to(0, now).unwrap();
        assert!(!fx.fire(t2), "Superseded notifier is revoked");
        fx.viewer.update(now);
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);

        assert!(fx.fire(t3));
        fx.viewer.update(now);
        assert!(fx.viewer.state().is_ready());
    }

    #[test]
    fn load_timeout_fails_then_late_ready_recovers() {
        let config = ViewerConfig {
            load_timeout: Some(Duration::from_secs(5)),
            ..ViewerConfig::default()
        };
        let mut fx = Fixture::with(false, config);
        let start = Instant::now();
        let token = fx.open_first(start);

        assert!(!fx.viewer.update(start + Duration::from_secs(4)));
        assert!(fx.viewer.update(start + Duration::from_secs(6)));
        assert_eq!(fx.viewer.phase(), ViewerPhase::Failed);

        // Menu stays usable while failed
        assert!(fx.viewer.presentation().unwrap().chrome.menu.is_some());

        assert!(fx.fire(token));
        fx.viewer.update(start + Duration::from_secs(7));
        assert!(fx.viewer.state().is_ready());
    }

    #[test]
    fn no_timeout_loads_forever() {
        let config = ViewerConfig {
            load_timeout: None,
            ..ViewerConfig::default()
        };
        let mut fx = Fixture::with(false, config);
        let start = Instant::now();
        fx.open_first(start);

        fx.viewer.update(start + Duration::from_secs(3600));

        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);
    }

    //=====================================================================
    // Switching
    //=====================================================================

    #[test]
    fn switch_retargets_panorama_in_place() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);

        fx.viewer.switch_to(2, now).unwrap();

        let calls = fx.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| matches!(c, Call::Show(_))), "No unmount between shows");
    }

    #[test]
    fn reselecting_active_scene_restarts_loading() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let first = fx.open_first(now);
        fx.fire(first);
        fx.viewer.update(now);

        let again = fx.viewer.switch_to(0, now).unwrap();

        assert_ne!(first, again);
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);
    }

    #[test]
    fn switch_in_procedural_mode_is_refused() {
        let mut fx = Fixture::new();
        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), Instant::now());

        let result = fx.viewer.switch_to(0, Instant::now());

        assert_eq!(result, Err(SwitchError::ProceduralMode));
        assert!(fx.viewer.state().is_ready());
        assert_eq!(fx.calls().len(), 1);
    }

    #[test]
    fn switch_before_open_is_refused() {
        let mut fx = Fixture::new();
        assert_eq!(fx.viewer.switch_to(0, Instant::now()), Err(SwitchError::NotOpen));
        assert!(fx.calls().is_empty());
    }

    #[test]
    fn switch_to_unknown_index_is_refused() {
        let mut fx = Fixture::new();
        fx.open_first(Instant::now());

        assert_eq!(fx.viewer.switch_to(42, Instant::now()), Err(SwitchError::UnknownEntry(42)));
    }

    #[test]
    fn request_switch_accepts_non_catalog_descriptor() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);

        let extra = SceneDescriptor::new("extra", "Extra", "extra.mp4", MediaKind::Video);
        fx.viewer.request_switch(&extra, now).unwrap();

        assert_eq!(scene_media(&fx.viewer), Some("extra.mp4".into()));
        let menu = fx.viewer.presentation().unwrap().chrome.menu.unwrap();
        assert!(menu.highlighted().is_none());
    }

    #[test]
    fn reopen_with_procedural_unmounts_panorama_first() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let token = fx.open_first(now);

        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), now);

        assert_eq!(
            fx.calls()[1..],
            [Call::UnmountPanoramic, Call::Mount("molecule".into())]
        );
        assert!(!fx.fire(token), "Panoramic registration revoked");
    }

    #[test]
    fn reopen_with_procedural_unmounts_previous_model_first() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), now);

        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), now);

        assert_eq!(
            fx.calls(),
            vec![
                Call::Mount("molecule".into()),
                Call::UnmountProcedural,
                Call::Mount("molecule".into()),
            ]
        );
        assert!(fx.viewer.state().is_ready());
    }

    #[test]
    fn queued_signal_from_previous_scene_is_stale() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let first = fx.open_first(now);

        // Delivered before the switch, applied after it
        assert!(fx.fire(first));
        let second = fx.viewer.switch_to(1, now).unwrap();

        fx.viewer.update(now);
        assert_eq!(fx.viewer.phase(), ViewerPhase::Loading);
        assert_eq!(fx.viewer.state().token(), Some(second));

        assert!(fx.fire(second));
        fx.viewer.update(now);
        assert!(fx.viewer.state().is_ready());
    }

    //=====================================================================
    // Input
    //=====================================================================

    #[test]
    fn digit_key_switches_scene() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);

        let action = fx.viewer.handle_input(&InputEvent::key(KeyCode::Digit3), now);

        assert_eq!(action, Some(ViewerAction::SwitchScene(2)));
        assert_eq!(scene_media(&fx.viewer), Some(fx.viewer.catalog().get(2).unwrap().media_ref.clone()));
    }

    #[test]
    fn digit_key_beyond_catalog_does_nothing() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);

        assert_eq!(fx.viewer.handle_input(&InputEvent::key(KeyCode::Digit9), now), None);
        assert_eq!(fx.calls().len(), 1);
    }

    #[test]
    fn digit_key_ignored_in_procedural_mode() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), now);

        assert_eq!(fx.viewer.handle_input(&InputEvent::key(KeyCode::Digit1), now), None);
    }

    #[test]
    fn clicking_menu_entry_switches_scene() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);
        fx.viewer.resize(1024.0);

        let (rect, index) = fx.viewer.layout().unwrap().menu_entries[1];
        let action = fx.viewer.handle_input(&InputEvent::click(rect.x + 2.0, rect.y + 2.0), now);

        assert_eq!(action, Some(ViewerAction::SwitchScene(index)));
    }

    #[test]
    fn clicking_exit_closes_and_notifies_host() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.open_first(now);

        let exit = fx.viewer.layout().unwrap().exit;
        let action = fx.viewer.handle_input(&InputEvent::click(exit.x + 1.0, exit.y + 1.0), now);

        assert_eq!(action, Some(ViewerAction::Exit));
        assert_eq!(fx.closed.get(), 1);
        assert!(!fx.viewer.is_open());
        assert!(fx.viewer.presentation().is_none());
    }

    #[test]
    fn escape_exits_procedural_mode() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.viewer.open(RequestedMaterial::procedural(ModelHandle::new(Molecule)), now);

        fx.viewer.handle_input(&InputEvent::key(KeyCode::Escape), now);

        assert_eq!(fx.closed.get(), 1);
        assert_eq!(fx.calls().last(), Some(&Call::UnmountProcedural));
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn close_unmounts_and_revokes() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let token = fx.open_first(now);

        fx.viewer.close();

        assert_eq!(fx.calls().last(), Some(&Call::UnmountPanoramic));
        assert!(!fx.fire(token));
        assert_eq!(fx.viewer.phase(), ViewerPhase::Uninitialized);
        assert_eq!(fx.closed.get(), 1);
    }

    #[test]
    fn second_close_does_not_notify_host_again() {
        let mut fx = Fixture::new();
        fx.open_first(Instant::now());

        fx.viewer.close();
        fx.viewer.close();

        assert_eq!(fx.closed.get(), 1);
        assert_eq!(
            fx.calls().iter().filter(|c| **c == Call::UnmountPanoramic).count(),
            1
        );
    }

    #[test]
    fn dismiss_tears_down_without_close_callback() {
        let mut fx = Fixture::new();
        let token = fx.open_first(Instant::now());

        fx.viewer.dismiss();

        assert!(!fx.viewer.is_open());
        assert_eq!(fx.calls().last(), Some(&Call::UnmountPanoramic));
        assert!(!fx.fire(token));
        assert_eq!(fx.closed.get(), 0);
    }

    #[test]
    fn drop_unmounts_without_close_callback() {
        let fx = Fixture::new();
        let Fixture { mut viewer, log, notifiers, closed } = fx;
        let token = viewer.open(RequestedMaterial::panoramic("x.jpg", MediaKind::Image), Instant::now());

        drop(viewer);

        assert_eq!(log.borrow().last(), Some(&Call::UnmountPanoramic));
        assert_eq!(closed.get(), 0);
        let notifier = notifiers.borrow_mut().pop().unwrap();
        assert_eq!(notifier.token(), token);
        assert!(!notifier.notify());
    }
}
