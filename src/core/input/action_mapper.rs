//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps key presses to viewer actions based on bindings and context.
//
// Architecture:
//   (key, modifiers, context) → HashMap → ViewerAction
//
// Only bindings in the active context resolve to actions. Clicks are not
// bound here; they resolve against the chrome layout.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{InputContext, ViewerAction},
    event::{InputEvent, KeyCode, Modifiers},
};

//=== ActionMapper ========================================================

/// Maps key events to actions via (key, modifiers, context) lookups.
#[derive(Debug, Clone)]
pub struct ActionMapper {
    /// (key, modifiers, context) → action
    key_bindings: HashMap<(KeyCode, Modifiers, InputContext), ViewerAction>,

    /// Currently active input context
    current_context: InputContext,
}

impl ActionMapper {
    //--- Construction -----------------------------------------------------

    /// Creates a mapper with no bindings, panoramic context active.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            current_context: InputContext::Panoramic,
        }
    }

    /// Standard viewer bindings.
    ///
    /// - Escape → Exit (both contexts)
    /// - 1..9 → SwitchScene(0..8) (panoramic only)
    pub fn with_default_bindings() -> Self {
        let mut mapper = Self::new();

        mapper.bind_key(KeyCode::Escape, ViewerAction::Exit, InputContext::Panoramic);
        mapper.bind_key(KeyCode::Escape, ViewerAction::Exit, InputContext::Procedural);

        for (index, key) in KeyCode::MENU_DIGITS.into_iter().enumerate() {
            mapper.bind_key(key, ViewerAction::SwitchScene(index), InputContext::Panoramic);
        }

        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action (no modifiers).
    pub fn bind_key(&mut self, key: KeyCode, action: ViewerAction, context: InputContext) {
        self.bind_key_with_mods(key, Modifiers::NONE, action, context);
    }

    /// Binds a key with modifiers to an action (exact match required).
    pub fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: ViewerAction,
        context: InputContext,
    ) {
        self.key_bindings.insert((key, modifiers, context), action);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a key press to an action in the active context.
    ///
    /// Key releases and mouse events map to nothing.
    pub fn map_event(&self, event: &InputEvent) -> Option<ViewerAction> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.map_key(*key, *modifiers),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<ViewerAction> {
        self.key_bindings
            .get(&(key, modifiers, self.current_context))
            .copied()
    }

    //--- Context ----------------------------------------------------------

    pub fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub fn current_context(&self) -> InputContext {
        self.current_context
    }
}

impl Default for ActionMapper {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
