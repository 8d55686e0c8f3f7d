//=========================================================================
// Viewer Actions & Input Context
//=========================================================================
//
// Actions: what a resolved input asks the viewer to do.
// Contexts: which bindings are live, following the render mode.
//
//=========================================================================

//=== ViewerAction ========================================================

/// High-level command produced by a key binding or a chrome click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    /// Switch to the catalog entry at this index.
    SwitchScene(usize),

    /// Leave the viewer.
    Exit,
}

//=== InputContext ========================================================

/// Identifies which set of bindings is active.
///
/// Follows the render mode: scene switching only exists while a panorama
/// is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// Panoramic mode: menu shortcuts and exit.
    Panoramic,

    /// Procedural mode: exit only.
    Procedural,
}

impl Default for InputContext {
    fn default() -> Self {
        Self::Panoramic
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
