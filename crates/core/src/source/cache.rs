//! Named tile maps stored under `<gen_folder>/maps/<name>.json`

use crate::core_types::TileImage;
use crate::error::GenerationError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk store of named tile maps
#[derive(Debug, Clone)]
pub struct MapCache {
    gen_folder: PathBuf,
}

impl MapCache {
    /// Cache rooted at `gen_folder`
    pub fn new<P: AsRef<Path>>(gen_folder: P) -> Self {
        Self {
            gen_folder: gen_folder.as_ref().to_path_buf(),
        }
    }

    /// Folder holding the map files
    pub fn maps_dir(&self) -> PathBuf {
        self.gen_folder.join("maps")
    }

    /// File path for a named map
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.maps_dir().join(format!("{name}.json"))
    }

    /// Whether a named map exists
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Load a named map.
    ///
    /// # Errors
    /// Returns `GenerationError::CacheRead` if the file cannot be read and
    /// `GenerationError::CacheParse` if it is not a valid tile image.
    pub fn load(&self, name: &str) -> Result<TileImage, GenerationError> {
        let path = self.path_for(name);
        let contents = fs::read_to_string(&path)
            .map_err(|e| GenerationError::CacheRead(format!("{}: {e}", path.display())))?;
        let image: TileImage = serde_json::from_str(&contents)
            .map_err(|e| GenerationError::CacheParse(format!("{}: {e}", path.display())))?;

        debug!(
            name,
            width = image.width(),
            height = image.height(),
            "Loaded cached map"
        );
        Ok(image)
    }

    /// Store a map under `name`, creating the folder if needed.
    ///
    /// # Errors
    /// Returns `GenerationError::CacheWrite` if the map cannot be written.
    pub fn store(&self, name: &str, image: &TileImage) -> Result<PathBuf, GenerationError> {
        fs::create_dir_all(self.maps_dir())
            .map_err(|e| GenerationError::CacheWrite(e.to_string()))?;

        let path = self.path_for(name);
        let contents = serde_json::to_string_pretty(image)
            .map_err(|e| GenerationError::CacheWrite(e.to_string()))?;
        fs::write(&path, contents)
            .map_err(|e| GenerationError::CacheWrite(format!("{}: {e}", path.display())))?;

        debug!(name, path = %path.display(), "Stored map");
        Ok(path)
    }
}
