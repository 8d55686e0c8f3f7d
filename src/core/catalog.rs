//=========================================================================
// Scene Catalog
//=========================================================================
//
// Ordered, read-only list of alternate panoramic scenes offered by the
// switch menu.
//
// Architecture:
//   JSON / built-in entries → SceneCatalog::new() (id check) → Vec<SceneDescriptor>
//
// Catalog order is display order. Ids are unique.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

//=== MediaKind ===========================================================

/// Kind of panoramic asset behind a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Equirectangular still image.
    Image,

    /// Equirectangular video.
    Video,
}

//=== PanoramicMedia ======================================================

/// A panoramic asset: where it lives and what it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanoramicMedia {
    pub media_ref: String,
    pub kind: MediaKind,
}

impl PanoramicMedia {
    pub fn new(media_ref: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            media_ref: media_ref.into(),
            kind,
        }
    }
}

//=== SceneDescriptor =====================================================

/// One selectable entry of the switch menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    pub id: String,
    pub label: String,
    pub media_ref: String,
    pub media_kind: MediaKind,
}

impl SceneDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        media_ref: impl Into<String>,
        media_kind: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            media_ref: media_ref.into(),
            media_kind,
        }
    }

    /// Returns the panoramic asset this entry points at.
    pub fn media(&self) -> PanoramicMedia {
        PanoramicMedia::new(self.media_ref.clone(), self.media_kind)
    }
}

//=== CatalogError ========================================================

/// Catalog construction and loading errors.
#[derive(Debug)]
pub enum CatalogError {
    /// Two entries share the same id.
    DuplicateId(String),

    /// Catalog file could not be read.
    Io(std::io::Error),

    /// Catalog JSON is malformed.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "Duplicate scene id in catalog: {}", id),
            Self::Io(e) => write!(f, "Catalog read failed: {}", e),
            Self::Parse(e) => write!(f, "Catalog parse failed: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateId(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

//=== SceneCatalog ========================================================

/// Ordered scene list with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCatalog {
    entries: Vec<SceneDescriptor>,
}

impl SceneCatalog {
    //--- Construction -----------------------------------------------------

    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(entries: Vec<SceneDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Parses a JSON array of `{id, label, mediaRef, mediaKind}` records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<SceneDescriptor> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        debug!(target: "viewer", "Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&SceneDescriptor> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SceneCatalog {
    /// The built-in scenes: two still panoramas and one 360 video.
    fn default() -> Self {
        Self {
            entries: vec![
                SceneDescriptor::new(
                    "scene1",
                    "Scene 1",
                    "https://placehold.co/4096x2048/000000/FFFFFF?text=Scene+1",
                    MediaKind::Image,
                ),
                SceneDescriptor::new(
                    "scene2",
                    "Scene 2",
                    "https://placehold.co/4096x2048/333333/FFFFFF?text=Scene+2",
                    MediaKind::Image,
                ),
                SceneDescriptor::new(
                    "scene3",
                    "360 Video",
                    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
                    MediaKind::Video,
                ),
            ],
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
