//=========================================================================
// Platform Subsystem
//
// Hosts the viewer in a Winit window on the main thread.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ├─ window_event                            │
//  │   │    ↓                                     │
//  │   │  InputProcessor (modifiers, cursor)      │
//  │   │    ↓                                     │
//  │   │  Viewer::handle_input                    │
//  │   │                                          │
//  │   └─ about_to_wait (every tick)              │
//  │        ↓                                     │
//  │      Viewer::update ← readiness signals ─────┼──── backend loader threads
//  │        ↓                                     │
//  │      window title ← Presentation             │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Single thread**: the viewer is never shared; backends reach it only
//   through readiness notifiers, drained on the next tick
// - **WaitUntil pacing**: the loop sleeps between ticks instead of
//   spinning, waking early for OS events
// - **Close callback = exit**: the viewer's close callback raises a flag;
//   the loop exits once the current event is handled
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `ViewerApp::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::dispatch::{Presentation, StatusOverlay};
use crate::core::input::InputEvent;
use crate::core::viewer::Viewer;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// Fatal: without an event loop the viewer cannot run windowed.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== WindowSettings ======================================================

/// Window and pacing parameters handed down from the app builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub tick_interval: Duration,
}

//=== Platform ============================================================

/// Window owner and viewer driver.
///
/// NOT Send/Sync: must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    viewer: Viewer,

    /// Converts Winit events to viewer InputEvents.
    input_processor: InputProcessor,

    settings: WindowSettings,

    /// Raised by the viewer's close callback.
    exit_requested: Rc<Cell<bool>>,

    /// Title last pushed to the window.
    shown_title: String,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform around an opened viewer.
    ///
    /// `exit_requested` must be the flag the viewer's close callback sets.
    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(viewer: Viewer, settings: WindowSettings, exit_requested: Rc<Cell<bool>>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            viewer,
            input_processor: InputProcessor::new(),
            settings,
            exit_requested,
            shown_title: String::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the viewer closes or the window is closed.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn dispatch_input(&mut self, event: InputEvent) {
        if let Some(action) = self.viewer.handle_input(&event, Instant::now()) {
            debug!(target: "platform::input", "{:?} -> {:?}", event, action);
            self.refresh_title();
        }
    }

    /// Pushes the presentation summary to the window title if it changed.
    fn refresh_title(&mut self) {
        let title = window_title(&self.settings.title, self.viewer.presentation().as_ref());
        if title == self.shown_title {
            return;
        }

        trace!(target: "platform", "Title: {}", title);
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.shown_title = title;
    }

    fn exit_if_requested(&self, event_loop: &ActiveEventLoop) {
        if self.exit_requested.get() {
            info!(target: "platform", "Viewer closed, leaving event loop");
            event_loop.exit();
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation (or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.as_str())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.viewer.resize(logical.width);
                window.request_redraw();
                self.window = Some(window);
                self.refresh_title();
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.viewer.dismiss();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let scale = self.window.as_ref().map_or(1.0, Window::scale_factor);

        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.viewer.close();
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                self.viewer.resize(size.to_logical::<f32>(scale).width);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale);
                self.input_processor.process_mouse_move(logical.x, logical.y);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.repeat {
                    return;
                }
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.dispatch_input(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.dispatch_input(event);
            }

            WindowEvent::RedrawRequested => {
                if let Some(presentation) = self.viewer.presentation() {
                    trace!(target: "platform", "Frame: {:?}", presentation.chrome.status);
                }
            }

            _ => {}
        }

        self.exit_if_requested(event_loop);
    }

    /// Tick: apply readiness signals and timeouts, then sleep until the next one.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if self.viewer.update(now) {
            self.refresh_title();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        self.exit_if_requested(event_loop);
        event_loop.set_control_flow(ControlFlow::WaitUntil(now + self.settings.tick_interval));
    }
}

//=== Title ===============================================================

/// Summarizes a presentation as a window title.
///
/// `"<base> - <scene>"` plus the status text while loading or failed.
fn window_title(base: &str, presentation: Option<&Presentation>) -> String {
    let Some(presentation) = presentation else {
        return base.to_owned();
    };

    let scene = presentation
        .chrome
        .menu
        .as_ref()
        .and_then(|menu| menu.highlighted())
        .map(|entry| entry.label.clone());

    let mut title = match scene {
        Some(label) => format!("{} - {}", base, label),
        None => base.to_owned(),
    };

    match presentation.chrome.status {
        Some(StatusOverlay::Loading { text }) | Some(StatusOverlay::Failed { text }) => {
            title.push_str(" (");
            title.push_str(text);
            title.push(')');
        }
        None => {}
    }

    title
}

//=========================================================================
// Unit Tests
//=========================================================================
