//! Demo host for the immersive viewer.
//!
//! Opens the viewer in a window with headless backends: panoramas "load"
//! after a simulated delay, procedural models mount immediately. Press
//! 1-9 or click a menu entry to switch scenes, Escape or Exit to quit.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use immersive_viewer::core::backend::{Backends, HeadlessPanoramic, HeadlessProcedural};
use immersive_viewer::core::catalog::SceneCatalog;
use immersive_viewer::core::material::{ModelHandle, ModelProducer, RequestedMaterial};
use immersive_viewer::ViewerAppBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about = "Immersive 360 / 3D scene viewer", long_about = None)]
struct Cli {
    /// JSON catalog of scenes (array of {id, label, mediaRef, mediaKind}).
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Catalog id to open first.
    #[arg(long, value_name = "ID")]
    scene: Option<String>,

    /// Open a procedural model with this name instead of a panorama.
    #[arg(long, value_name = "NAME", conflicts_with = "scene")]
    model: Option<String>,

    /// Seconds a panorama may load before it is shown as failed.
    #[arg(long, default_value_t = 20, conflicts_with = "no_timeout")]
    timeout: u64,

    /// Wait for panoramas forever.
    #[arg(long)]
    no_timeout: bool,

    /// Simulated panorama load time in milliseconds.
    #[arg(long, default_value_t = 750)]
    load_delay_ms: u64,

    /// Media refs that never finish loading, comma separated.
    #[arg(long, value_delimiter = ',', value_name = "REF")]
    unreachable: Vec<String>,
}

/// Stand-in for a caller-supplied scene graph.
struct DemoModel {
    name: String,
}

impl ModelProducer for DemoModel {
    fn name(&self) -> &str {
        &self.name
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => SceneCatalog::load(path)?,
        None => SceneCatalog::default(),
    };

    let material = match (&cli.model, &cli.scene) {
        (Some(name), _) => RequestedMaterial::procedural(ModelHandle::new(DemoModel { name: name.clone() })),
        (None, Some(id)) => {
            let descriptor = catalog
                .find(id)
                .ok_or_else(|| format!("No scene with id '{}' in catalog", id))?;
            RequestedMaterial::from(descriptor)
        }
        (None, None) => {
            let descriptor = catalog.get(0).ok_or("Catalog is empty")?;
            RequestedMaterial::from(descriptor)
        }
    };

    let panoramic = cli
        .unreachable
        .iter()
        .fold(HeadlessPanoramic::new(Duration::from_millis(cli.load_delay_ms)), |backend, media_ref| {
            backend.with_unreachable(media_ref.as_str())
        });

    let mut builder = ViewerAppBuilder::new()
        .with_catalog(catalog)
        .with_window_title("Scene Viewer")
        .on_close(|| log::info!("Viewer closed by user"));

    builder = if cli.no_timeout {
        builder.without_load_timeout()
    } else {
        builder.with_load_timeout(Duration::from_secs(cli.timeout.max(1)))
    };

    builder
        .build(Backends::new(panoramic, HeadlessProcedural::default()))
        .run(material)?;

    Ok(())
}
