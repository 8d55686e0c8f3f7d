//=========================================================================
// Core Systems
//
// Everything the viewer does that does not touch the windowing layer.
//
// Responsibilities:
// - Scene catalog and requested materials (`catalog`, `material`)
// - Viewer state machine and host-facing facade (`viewer`)
// - Scene-scoped readiness signalling (`readiness`)
// - State → presentation mapping and chrome layout (`dispatch`)
// - Rendering backend contracts (`backend`)
// - Portable input and key bindings (`input`)
//
// Notes:
// Nothing here depends on winit; the platform layer translates OS events
// into `input::InputEvent` and drives `viewer::Viewer` each tick.
//
//=========================================================================

pub mod backend;
pub mod catalog;
pub mod dispatch;
pub mod input;
pub mod material;
pub mod readiness;
pub mod viewer;
