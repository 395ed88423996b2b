use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::effect_selection::EffectSelection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Blur,
    Image,
}

/// One pickable entry in the effect picker.
///
/// `image` is an asset file name: the thumbnail for every preset, and also
/// the replacement background for image presets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectPreset {
    pub name: String,
    pub kind: PresetKind,
    pub image: String,
}

impl EffectPreset {
    pub fn new(name: impl Into<String>, kind: PresetKind, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            image: image.into(),
        }
    }

    /// Resolves the preset's asset against `asset_dir`. Absolute paths and
    /// URLs are returned unchanged.
    pub fn image_path(&self, asset_dir: Option<&Path>) -> PathBuf {
        let image = Path::new(&self.image);
        match asset_dir {
            Some(dir) if image.is_relative() && !self.image.contains("://") => dir.join(image),
            _ => image.to_path_buf(),
        }
    }

    pub fn selection(&self, blur_radius: f32, asset_dir: Option<&Path>) -> EffectSelection {
        match self.kind {
            PresetKind::Blur => EffectSelection::Blur {
                radius: blur_radius,
            },
            PresetKind::Image if self.image.is_empty() => EffectSelection::image(""),
            PresetKind::Image => {
                EffectSelection::image(self.image_path(asset_dir).to_string_lossy().into_owned())
            }
        }
    }
}

/// Built-in presets: one blur and two replacement backgrounds.
pub fn default_presets() -> Vec<EffectPreset> {
    vec![
        EffectPreset::new("Blur", PresetKind::Blur, "blur.jpg"),
        EffectPreset::new("Office", PresetKind::Image, "office.jpg"),
        EffectPreset::new("Nature", PresetKind::Image, "nature.jpg"),
    ]
}
