//=========================================================================
// Viewer App
//
// Main entry point for running the viewer in a window.
//
// Architecture:
// ```text
//     ViewerAppBuilder  ──build(backends)──>  ViewerApp  ──run(material)──>  [Event Loop]
//         │                                      │
//         ├─ with_catalog()                      ├─ opens the viewer
//         ├─ with_load_timeout()                 └─ runs platform on this thread
//         ├─ with_window_title() / _size()          blocks until close
//         └─ on_close()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::backend::BackendProvider;
use crate::core::catalog::SceneCatalog;
use crate::core::material::RequestedMaterial;
use crate::core::viewer::{Viewer, ViewerConfig};
use crate::platform::{Platform, PlatformError, WindowSettings};

//=== ViewerAppBuilder ====================================================

/// Builder for configuring and constructing a [`ViewerApp`].
///
/// # Default Values
///
/// - **Catalog**: the built-in three scenes
/// - **Load timeout**: 20 s
/// - **Signal budget**: 64 readiness signals per tick
/// - **Window**: "Immersive Viewer", 1280x720
/// - **Tick interval**: 16 ms
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use immersive_viewer::ViewerAppBuilder;
/// use immersive_viewer::core::backend::Backends;
/// use immersive_viewer::core::catalog::SceneCatalog;
/// use immersive_viewer::core::material::RequestedMaterial;
///
/// let catalog = SceneCatalog::default();
/// let first = RequestedMaterial::from(catalog.get(0).unwrap());
///
/// ViewerAppBuilder::new()
///     .with_catalog(catalog)
///     .with_load_timeout(Duration::from_secs(10))
///     .on_close(|| println!("viewer closed"))
///     .build(Backends::headless())
///     .run(first)
///     .unwrap();
/// ```
pub struct ViewerAppBuilder {
    catalog: SceneCatalog,
    load_timeout: Option<Duration>,
    signal_budget: usize,
    window_title: String,
    window_size: (u32, u32),
    tick_interval: Duration,
    on_close: Option<Box<dyn FnMut()>>,
}

impl ViewerAppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        let defaults = ViewerConfig::default();
        Self {
            catalog: SceneCatalog::default(),
            load_timeout: defaults.load_timeout,
            signal_budget: defaults.signal_budget,
            window_title: "Immersive Viewer".to_owned(),
            window_size: (1280, 720),
            tick_interval: Duration::from_millis(16),
            on_close: None,
        }
    }

    /// Sets the scenes offered in the switch menu.
    pub fn with_catalog(mut self, catalog: SceneCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets how long a panorama may load before it is shown as failed.
    ///
    /// Default: 20 s
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "Load timeout must be positive, got {:?}", timeout);
        self.load_timeout = Some(timeout);
        self
    }

    /// Lets panoramas load indefinitely.
    pub fn without_load_timeout(mut self) -> Self {
        self.load_timeout = None;
        self
    }

    /// Sets how many readiness signals are applied per tick.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `budget == 0`.
    pub fn with_signal_budget(mut self, budget: usize) -> Self {
        assert!(budget > 0, "Signal budget must be positive");
        self.signal_budget = budget;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.window_size = (width, height);
        self
    }

    /// Sets the update tick. Readiness and timeouts are checked once per tick.
    ///
    /// Default: 16 ms
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        self.tick_interval = interval;
        self
    }

    /// Sets the callback invoked when the viewer closes.
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Builds the app around `backends`.
    pub fn build<B>(self, backends: B) -> ViewerApp
    where
        B: BackendProvider + 'static,
    {
        info!(
            "Building viewer ({} scenes, timeout: {:?}, tick: {:?})",
            self.catalog.len(),
            self.load_timeout,
            self.tick_interval
        );

        let config = ViewerConfig {
            load_timeout: self.load_timeout,
            signal_budget: self.signal_budget,
        };

        let exit_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&exit_requested);
        let mut host_callback = self.on_close;

        let viewer = Viewer::new(self.catalog, backends, config).on_close(move || {
            flag.set(true);
            if let Some(callback) = host_callback.as_mut() {
                callback();
            }
        });

        ViewerApp {
            viewer,
            settings: WindowSettings {
                title: self.window_title,
                width: self.window_size.0,
                height: self.window_size.1,
                tick_interval: self.tick_interval,
            },
            exit_requested,
        }
    }
}

impl Default for ViewerAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== ViewerApp ===========================================================

/// Windowed viewer runtime. Create via [`ViewerAppBuilder`].
pub struct ViewerApp {
    viewer: Viewer,
    settings: WindowSettings,
    exit_requested: Rc<Cell<bool>>,
}

impl ViewerApp {
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Opens the viewer on `material` and blocks until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms that require it.
    pub fn run(mut self, material: RequestedMaterial) -> Result<(), PlatformError> {
        info!("Starting viewer runtime");

        self.viewer.open(material, Instant::now());

        let platform = Platform::new(self.viewer, self.settings, self.exit_requested);
        let result = platform.run();

        match &result {
            Ok(()) => info!("Viewer shutdown complete"),
            Err(e) => error!("Platform error: {}", e),
        }

        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
