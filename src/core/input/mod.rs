//=========================================================================
// Input
//
// Raw input events, viewer actions, and the key bindings between them.
//
// Responsibilities:
// - Represent keyboard and mouse input independent of the windowing layer
// - Map key presses to `ViewerAction`s per `InputContext`
//
// Clicks resolve through `dispatch::ChromeLayout`, since what a click
// does depends on where the controls are drawn.
//
//=========================================================================

//=== Submodules ==========================================================

mod action;
mod action_mapper;
mod event;

//=== Public API ==========================================================

pub use action::{InputContext, ViewerAction};
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
