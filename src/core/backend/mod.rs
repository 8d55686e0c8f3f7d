//=========================================================================
// Rendering Backends
//=========================================================================
//
// Capability contracts for the two renderers the viewer drives.
//
// Architecture:
//   Viewer ──show(instructions, notifier)──> PanoramicBackend
//      │                                        └─ notifier.notify() when ready
//      └──mount(instructions)──────────────> ProceduralBackend
//
// The viewer never owns concrete renderers. A `BackendProvider` supplies
// both, so hosts and tests swap implementations freely.
//
// Contract:
// - `show` may be called again while mounted; the backend re-targets in
//   place and reports readiness through the new notifier only.
// - `unmount` on an unmounted backend is a no-op.
// - Procedural backends are ready as soon as `mount` returns `Ok`.
//
//=========================================================================

//=== Module Declarations =================================================

mod headless;

//=== Public API ==========================================================

pub use headless::{HeadlessPanoramic, HeadlessProcedural};

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::dispatch::{PanoramicInstructions, ProceduralInstructions};
use crate::core::readiness::ReadyNotifier;

//=== BackendError ========================================================

/// Reasons a backend refused to mount a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Asset could not be fetched or decoded.
    Media { media_ref: String, reason: String },

    /// Renderer cannot draw at all (no device, lost context).
    Unavailable(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Media { media_ref, reason } => write!(f, "Cannot load '{}': {}", media_ref, reason),
            Self::Unavailable(reason) => write!(f, "Renderer unavailable: {}", reason),
        }
    }
}

impl std::error::Error for BackendError {}

//=== Contracts ===========================================================

/// Declarative panoramic renderer (sky sphere / videosphere).
pub trait PanoramicBackend {
    /// Shows `instructions`, re-targeting in place if already mounted.
    ///
    /// The backend fires `notifier` once the asset is ready. It may do so
    /// from any thread, and may drop it unfired if loading never finishes.
    fn show(
        &mut self,
        instructions: &PanoramicInstructions,
        notifier: ReadyNotifier,
    ) -> Result<(), BackendError>;

    /// Tears down the panoramic scene.
    fn unmount(&mut self);
}

/// Programmatic scene-graph renderer for caller-supplied models.
pub trait ProceduralBackend {
    fn mount(&mut self, instructions: &ProceduralInstructions) -> Result<(), BackendError>;

    fn unmount(&mut self);
}

//=== BackendProvider =====================================================

/// Supplies the viewer's rendering backends.
pub trait BackendProvider {
    fn panoramic(&mut self) -> &mut dyn PanoramicBackend;

    fn procedural(&mut self) -> &mut dyn ProceduralBackend;
}

/// Provider over a fixed pair of backends.
pub struct Backends<P, Q> {
    pub panoramic: P,
    pub procedural: Q,
}

impl<P, Q> Backends<P, Q>
where
    P: PanoramicBackend,
    Q: ProceduralBackend,
{
    pub fn new(panoramic: P, procedural: Q) -> Self {
        Self { panoramic, procedural }
    }
}

impl Backends<HeadlessPanoramic, HeadlessProcedural> {
    /// Window-less backends that only log and simulate load latency.
    pub fn headless() -> Self {
        Self::new(HeadlessPanoramic::default(), HeadlessProcedural::default())
    }
}

impl<P, Q> BackendProvider for Backends<P, Q>
where
    P: PanoramicBackend,
    Q: ProceduralBackend,
{
    fn panoramic(&mut self) -> &mut dyn PanoramicBackend {
        &mut self.panoramic
    }

    fn procedural(&mut self) -> &mut dyn ProceduralBackend {
        &mut self.procedural
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
