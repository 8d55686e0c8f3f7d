//=========================================================================
// Presentation Dispatcher
//=========================================================================
//
// Pure function from viewer state to what should be on screen.
//
// Architecture:
//   ViewerState + SceneCatalog → present() → Presentation
//                                              ├─ mode:   which backend, with what
//                                              └─ chrome: exit / loading / failure / menu
//
// The viewer applies `mode` to the backends; the host draws `chrome`
// above the backend output.
//
//=========================================================================

//=== Module Declarations =================================================

mod instructions;
mod layout;

//=== Public API ==========================================================

pub use instructions::{
    FirstPersonRig, Light, OrbitControls, PanoramicInstructions, PanoramicSurface,
    PerspectiveCamera, ProceduralInstructions, VideoPlayback,
};
pub use layout::{ChromeLayout, Rect};

//=== Internal Dependencies ===============================================

use crate::core::catalog::SceneCatalog;
use crate::core::viewer::{ActiveScene, ViewerPhase, ViewerState};

//=== Chrome ==============================================================

/// Text shown while the active scene is loading.
pub const LOADING_TEXT: &str = "Loading Scene...";

/// Text shown when the active scene failed to load.
pub const FAILED_TEXT: &str = "This scene could not be loaded. Pick another scene or exit.";

/// Corner of the overlay a control is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
}

/// The always-present exit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitControl {
    pub label: &'static str,
    pub anchor: Anchor,
}

impl Default for ExitControl {
    fn default() -> Self {
        Self {
            label: "Exit",
            anchor: Anchor::TopRight,
        }
    }
}

/// Full-overlay status message drawn above the backend output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOverlay {
    Loading { text: &'static str },
    Failed { text: &'static str },
}

/// One switch-menu button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Catalog index; what a click on this entry switches to.
    pub index: usize,
    pub id: String,
    pub label: String,
    pub highlighted: bool,
}

/// Scene switch menu (panoramic mode only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchMenu {
    pub anchor: Anchor,
    pub entries: Vec<MenuEntry>,
}

impl SwitchMenu {
    /// Entry currently showing, if the active scene is a catalog entry.
    pub fn highlighted(&self) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.highlighted)
    }
}

/// Overlay controls drawn above the rendered scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub exit: ExitControl,
    pub status: Option<StatusOverlay>,
    pub menu: Option<SwitchMenu>,
}

//=== Presentation ========================================================

/// Which backend to drive and with what.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    Panoramic(PanoramicInstructions),
    Procedural(ProceduralInstructions),
}

/// Everything the overlay shows for one viewer state.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub mode: RenderMode,
    pub chrome: Chrome,
}

//=== Dispatch ============================================================

/// Computes the presentation for `state`. `None` before the viewer opens.
pub fn present(state: &ViewerState, catalog: &SceneCatalog) -> Option<Presentation> {
    let scene = state.active_scene()?;

    let status = match state.phase() {
        ViewerPhase::Loading => Some(StatusOverlay::Loading { text: LOADING_TEXT }),
        ViewerPhase::Failed => Some(StatusOverlay::Failed { text: FAILED_TEXT }),
        ViewerPhase::Ready | ViewerPhase::Uninitialized => None,
    };

    let (mode, menu) = match scene {
        ActiveScene::Panoramic(media) => (
            RenderMode::Panoramic(PanoramicInstructions::for_media(media)),
            Some(switch_menu(catalog, &media.media_ref)),
        ),
        ActiveScene::Procedural(model) => (
            RenderMode::Procedural(ProceduralInstructions::for_model(model)),
            None,
        ),
    };

    Some(Presentation {
        mode,
        chrome: Chrome {
            exit: ExitControl::default(),
            status,
            menu,
        },
    })
}

/// Builds the menu, highlighting entries that show `active_ref`.
pub fn switch_menu(catalog: &SceneCatalog, active_ref: &str) -> SwitchMenu {
    let entries = catalog
        .iter()
        .enumerate()
        .map(|(index, descriptor)| MenuEntry {
            index,
            id: descriptor.id.clone(),
            label: descriptor.label.clone(),
            highlighted: descriptor.media_ref == active_ref,
        })
        .collect();

    SwitchMenu {
        anchor: Anchor::TopLeft,
        entries,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
