//=========================================================================
// Requested Material
//=========================================================================
//
// What the host asks the viewer to show: a panoramic asset or a
// procedural 3D model. Exactly one arm, enforced by the enum.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::catalog::{MediaKind, PanoramicMedia, SceneDescriptor};

//=== ModelProducer =======================================================

/// Something the procedural backend knows how to build geometry from.
///
/// The viewer never inspects producers; it only hands them to the
/// procedural backend and logs their name.
pub trait ModelProducer: Send + Sync {
    fn name(&self) -> &str;
}

//=== ModelHandle =========================================================

/// Cheap, clonable, opaque reference to a [`ModelProducer`].
///
/// Handles compare equal only when they share the same producer.
#[derive(Clone)]
pub struct ModelHandle(Arc<dyn ModelProducer>);

impl ModelHandle {
    pub fn new<P: ModelProducer + 'static>(producer: P) -> Self {
        Self(Arc::new(producer))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Borrows the underlying producer.
    pub fn producer(&self) -> &dyn ModelProducer {
        self.0.as_ref()
    }
}

impl PartialEq for ModelHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModelHandle {}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelHandle").field(&self.name()).finish()
    }
}

//=== MaterialError =======================================================

/// Malformed material: the caller filled neither or both arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialError {
    Missing,
    Ambiguous,
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Material has neither a media reference nor a model"),
            Self::Ambiguous => write!(f, "Material has both a media reference and a model"),
        }
    }
}

impl std::error::Error for MaterialError {}

//=== RequestedMaterial ===================================================

/// Material handed to [`crate::core::viewer::Viewer::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedMaterial {
    Panoramic(PanoramicMedia),
    Procedural(ModelHandle),
}

impl RequestedMaterial {
    pub fn panoramic(media_ref: impl Into<String>, kind: MediaKind) -> Self {
        Self::Panoramic(PanoramicMedia::new(media_ref, kind))
    }

    pub fn procedural(model: ModelHandle) -> Self {
        Self::Procedural(model)
    }

    /// Builds a material from loosely-typed host data.
    ///
    /// Fails fast when the host supplied neither or both arms.
    pub fn from_parts(
        media: Option<PanoramicMedia>,
        model: Option<ModelHandle>,
    ) -> Result<Self, MaterialError> {
        match (media, model) {
            (Some(media), None) => Ok(Self::Panoramic(media)),
            (None, Some(model)) => Ok(Self::Procedural(model)),
            (None, None) => Err(MaterialError::Missing),
            (Some(_), Some(_)) => Err(MaterialError::Ambiguous),
        }
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self, Self::Procedural(_))
    }
}

impl From<&SceneDescriptor> for RequestedMaterial {
    fn from(descriptor: &SceneDescriptor) -> Self {
        Self::Panoramic(descriptor.media())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
