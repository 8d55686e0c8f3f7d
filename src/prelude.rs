//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use immersive_viewer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::app::{ViewerApp, ViewerAppBuilder};

// Viewer
pub use crate::core::viewer::{SwitchError, Viewer, ViewerConfig, ViewerPhase};

// Scenes and materials
pub use crate::core::catalog::{MediaKind, SceneCatalog, SceneDescriptor};
pub use crate::core::material::{ModelHandle, ModelProducer, RequestedMaterial};

// Backends
pub use crate::core::backend::{
    BackendError, BackendProvider, Backends, PanoramicBackend, ProceduralBackend,
};
pub use crate::core::readiness::ReadyNotifier;

// Presentation
pub use crate::core::dispatch::{Presentation, RenderMode};

// Input
pub use crate::core::input::{InputEvent, KeyCode, ViewerAction};
