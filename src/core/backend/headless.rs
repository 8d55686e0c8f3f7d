//=========================================================================
// Headless Backends
//=========================================================================
//
// Window-less renderers: log what would be drawn, simulate asset latency.
//
// `HeadlessPanoramic` fires each readiness notifier from a short-lived
// loader thread after `load_delay`, the way a real asset loader completes
// off the viewer thread. Media refs marked unreachable never fire, which
// exercises the load timeout.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::{BackendError, PanoramicBackend, ProceduralBackend};
use crate::core::dispatch::{PanoramicInstructions, ProceduralInstructions};
use crate::core::readiness::ReadyNotifier;

//=== HeadlessPanoramic ===================================================

pub struct HeadlessPanoramic {
    load_delay: Duration,
    unreachable: HashSet<String>,
    mounted: Option<String>,
}

impl HeadlessPanoramic {
    //--- Construction -----------------------------------------------------

    pub fn new(load_delay: Duration) -> Self {
        Self {
            load_delay,
            unreachable: HashSet::new(),
            mounted: None,
        }
    }

    /// Never reports `media_ref` ready.
    pub fn with_unreachable(mut self, media_ref: impl Into<String>) -> Self {
        self.unreachable.insert(media_ref.into());
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Media currently shown.
    pub fn mounted_media(&self) -> Option<&str> {
        self.mounted.as_deref()
    }
}

impl Default for HeadlessPanoramic {
    /// 750 ms simulated load.
    fn default() -> Self {
        Self::new(Duration::from_millis(750))
    }
}

impl PanoramicBackend for HeadlessPanoramic {
    fn show(
        &mut self,
        instructions: &PanoramicInstructions,
        notifier: ReadyNotifier,
    ) -> Result<(), BackendError> {
        let media_ref = instructions.media.media_ref.clone();

        match self.mounted.replace(media_ref.clone()) {
            Some(previous) => debug!(
                target: "viewer::backend",
                "Re-targeting panorama '{}' -> '{}' ({:?})",
                previous, media_ref, instructions.surface
            ),
            None => info!(
                target: "viewer::backend",
                "Mounting panorama '{}' ({:?})",
                media_ref, instructions.surface
            ),
        }

        if self.unreachable.contains(&media_ref) {
            debug!(target: "viewer::backend", "'{}' is unreachable, never signalling", media_ref);
            return Ok(());
        }

        let delay = self.load_delay;
        thread::spawn(move || {
            thread::sleep(delay);
            let token = notifier.token();
            if notifier.notify() {
                trace!(target: "viewer::backend", "Loaded '{}' for {}", media_ref, token);
            } else {
                trace!(target: "viewer::backend", "Load of '{}' finished after {} was revoked", media_ref, token);
            }
        });

        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(media_ref) = self.mounted.take() {
            info!(target: "viewer::backend", "Unmounted panorama '{}'", media_ref);
        }
    }
}

//=== HeadlessProcedural ==================================================

#[derive(Default)]
pub struct HeadlessProcedural {
    mounted: Option<String>,
}

impl HeadlessProcedural {
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Name of the mounted model.
    pub fn mounted_model(&self) -> Option<&str> {
        self.mounted.as_deref()
    }
}

impl ProceduralBackend for HeadlessProcedural {
    fn mount(&mut self, instructions: &ProceduralInstructions) -> Result<(), BackendError> {
        let name = instructions.model.name().to_owned();
        info!(
            target: "viewer::backend",
            "Mounting model '{}' with {} lights, auto-rotate {}",
            name,
            instructions.lights.len(),
            instructions.orbit.auto_rotate
        );
        self.mounted = Some(name);
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(name) = self.mounted.take() {
            info!(target: "viewer::backend", "Unmounted model '{}'", name);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
