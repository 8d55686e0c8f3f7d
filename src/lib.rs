//=========================================================================
// Immersive Viewer: Library Root
//
// Full-screen overlay that shows a 360° panorama or a procedural 3D model,
// lets the user switch panoramic scenes, and tracks per-scene loading.
//
// Responsibilities:
// - Expose the viewer core (`core`): catalog, state machine, dispatcher,
//   readiness signals, backend contracts, input
// - Expose the windowed runtime (`ViewerAppBuilder` / `ViewerApp`)
// - Keep the winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use immersive_viewer::ViewerAppBuilder;
// use immersive_viewer::core::backend::Backends;
// use immersive_viewer::core::catalog::SceneCatalog;
// use immersive_viewer::core::material::RequestedMaterial;
//
// let catalog = SceneCatalog::default();
// let first = RequestedMaterial::from(catalog.get(0).unwrap());
//
// ViewerAppBuilder::new()
//     .with_catalog(catalog)
//     .build(Backends::headless())
//     .run(first)
//     .unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that does not touch the windowing layer and can
// be driven headless (tests, other hosts).
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event translation.
// `app` wires configuration, viewer and platform together.
//
mod app;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use app::{ViewerApp, ViewerAppBuilder};
pub use platform::PlatformError;
