//! Output directory layout and artifact naming.
//!
//! Street-level photos land in `raw/`, each overhead map layer in its own
//! `maps{n}/` directory. Artifacts are named `{kind}_{index:05}.{ext}` with a
//! 1-based index matching the point's position in the final route.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct OutputLayout {
    base: PathBuf,
    map_layers: usize,
}

impl OutputLayout {
    pub fn new(base: impl Into<PathBuf>, map_layers: usize) -> Self {
        Self {
            base: base.into(),
            map_layers,
        }
    }

    /// Create the `raw/` and `maps{n}/` directories.
    pub async fn prepare(&self) -> Result<()> {
        fs::create_dir_all(self.raw_dir()).await?;
        for layer in 0..self.map_layers {
            fs::create_dir_all(self.maps_dir(layer)).await?;
        }
        Ok(())
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.base.join("raw")
    }

    pub fn maps_dir(&self, layer: usize) -> PathBuf {
        self.base.join(format!("maps{}", layer + 1))
    }

    pub fn street_view_path(&self, index: usize) -> PathBuf {
        self.raw_dir().join(artifact_name("sv", index, "jpg"))
    }

    pub fn map_path(&self, layer: usize, index: usize) -> PathBuf {
        self.maps_dir(layer).join(artifact_name("map", index, "png"))
    }

    pub async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).await?;
        Ok(())
    }
}

/// `{kind}_{index:05}.{ext}` naming convention for output artifacts.
pub fn artifact_name(kind: &str, index: usize, ext: &str) -> String {
    format!("{kind}_{index:05}.{ext}")
}
