use std::path::{Path, PathBuf};

use crate::effects::domain::effect_processor::BackendError;

/// Decoded replacement background in RGBA8.
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    path: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl BackgroundImage {
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let decoded = image::open(path).map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Loaded background {} ({width}x{height})", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
