//=========================================================================
// Render Instructions
//=========================================================================
//
// What the dispatcher asks a rendering backend to do. Plain data; the
// backends decide how to realise it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::catalog::{MediaKind, PanoramicMedia};
use crate::core::material::ModelHandle;

//=== Panoramic ===========================================================

/// Enveloping surface the panoramic asset is projected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanoramicSurface {
    /// Textured sky sphere (still images).
    Sky,

    /// Video-textured sphere.
    Videosphere,
}

impl From<MediaKind> for PanoramicSurface {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => Self::Sky,
            MediaKind::Video => Self::Videosphere,
        }
    }
}

/// Playback settings for panoramic video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPlayback {
    pub looped: bool,
    pub autoplay: bool,
    pub muted: bool,
}

impl Default for VideoPlayback {
    /// Loop, autoplay, muted (autoplay needs muted in browsers).
    fn default() -> Self {
        Self {
            looped: true,
            autoplay: true,
            muted: true,
        }
    }
}

/// First-person camera used inside the panorama.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonRig {
    /// Camera height above the floor, in metres.
    pub eye_height: f32,
    pub look_controls: bool,
    pub move_controls: bool,
}

impl Default for FirstPersonRig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            look_controls: true,
            move_controls: true,
        }
    }
}

/// Mount request for the panoramic backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PanoramicInstructions {
    pub media: PanoramicMedia,
    pub surface: PanoramicSurface,
    /// Present for video only.
    pub playback: Option<VideoPlayback>,
    /// Fetch the asset without credentials (CORS "anonymous").
    pub anonymous_cross_origin: bool,
    pub camera: FirstPersonRig,
    /// Offer the headset "enter VR" control.
    pub vr_mode_ui: bool,
}

impl PanoramicInstructions {
    pub fn for_media(media: &PanoramicMedia) -> Self {
        let playback = match media.kind {
            MediaKind::Video => Some(VideoPlayback::default()),
            MediaKind::Image => None,
        };

        Self {
            media: media.clone(),
            surface: PanoramicSurface::from(media.kind),
            playback,
            anonymous_cross_origin: true,
            camera: FirstPersonRig::default(),
            vr_mode_ui: true,
        }
    }
}

//=== Procedural ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: [f32; 3],
    /// Vertical field of view, degrees.
    pub fov: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub zoom: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { intensity: f32 },
    Directional { position: [f32; 3], intensity: f32 },
}

/// Mount request for the procedural backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProceduralInstructions {
    pub model: ModelHandle,
    pub camera: PerspectiveCamera,
    pub orbit: OrbitControls,
    pub lights: Vec<Light>,
}

impl ProceduralInstructions {
    /// Standard stage: camera in front of the model, slow auto-rotate,
    /// ambient fill plus one key light.
    pub fn for_model(model: &ModelHandle) -> Self {
        Self {
            model: model.clone(),
            camera: PerspectiveCamera {
                position: [0.0, 1.5, 5.0],
                fov: 70.0,
            },
            orbit: OrbitControls {
                zoom: true,
                auto_rotate: true,
                auto_rotate_speed: 0.5,
            },
            lights: vec![
                Light::Ambient { intensity: 0.5 },
                Light::Directional {
                    position: [5.0, 5.0, 5.0],
                    intensity: 1.5,
                },
            ],
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
