//=========================================================================
// Chrome Layout
//=========================================================================
//
// Places overlay controls in logical pixels and resolves clicks.
//
// Architecture:
//   Chrome + viewport → compute() → ChromeLayout { exit, menu rects }
//   (x, y)            → hit_test() → ViewerAction
//
// Exit is pinned top-right, the switch menu stacks down from top-left.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Anchor, Chrome};
use crate::core::input::ViewerAction;

//=== Metrics =============================================================

const EDGE_MARGIN: f32 = 16.0;
const MENU_PADDING: f32 = 12.0;
const MENU_ENTRY_WIDTH: f32 = 160.0;
const MENU_ENTRY_HEIGHT: f32 = 28.0;
const MENU_ENTRY_GAP: f32 = 8.0;
const EXIT_WIDTH: f32 = 96.0;
const EXIT_HEIGHT: f32 = 40.0;

//=== Rect ================================================================

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: right and bottom edges are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

//=== ChromeLayout ========================================================

/// Screen rectangles for every clickable overlay control.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    pub exit: Rect,
    /// (rect, catalog index) per menu entry, in display order.
    pub menu_entries: Vec<(Rect, usize)>,
}

impl ChromeLayout {
    /// Lays out `chrome` in a viewport `width` logical pixels wide.
    ///
    /// Controls are anchored to the top edge, so height does not matter.
    pub fn compute(chrome: &Chrome, width: f32) -> Self {
        let exit = anchored(chrome.exit.anchor, EXIT_WIDTH, EXIT_HEIGHT, width);

        let menu_entries = chrome
            .menu
            .as_ref()
            .map(|menu| {
                let origin = anchored(menu.anchor, MENU_ENTRY_WIDTH + 2.0 * MENU_PADDING, 0.0, width);
                menu.entries
                    .iter()
                    .enumerate()
                    .map(|(row, entry)| {
                        let y = origin.y + MENU_PADDING + row as f32 * (MENU_ENTRY_HEIGHT + MENU_ENTRY_GAP);
                        let rect = Rect::new(origin.x + MENU_PADDING, y, MENU_ENTRY_WIDTH, MENU_ENTRY_HEIGHT);
                        (rect, entry.index)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { exit, menu_entries }
    }

    /// Resolves a click to the action of the control under it.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ViewerAction> {
        if self.exit.contains(x, y) {
            return Some(ViewerAction::Exit);
        }

        self.menu_entries
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|&(_, index)| ViewerAction::SwitchScene(index))
    }
}

//--- Internal Helpers ----------------------------------------------------

fn anchored(anchor: Anchor, width: f32, height: f32, viewport_width: f32) -> Rect {
    match anchor {
        Anchor::TopLeft => Rect::new(EDGE_MARGIN, EDGE_MARGIN, width, height),
        Anchor::TopRight => Rect::new(
            (viewport_width - EDGE_MARGIN - width).max(0.0),
            EDGE_MARGIN,
            width,
            height,
        ),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
