use std::path::PathBuf;

use thiserror::Error;

use crate::effects::domain::effect_preset::EffectPreset;
use crate::effects::domain::effect_selection::EffectSelection;
use crate::shared::settings::Settings;

#[derive(Error, Debug, PartialEq)]
pub enum PickerError {
    #[error("unknown effect preset: {0}")]
    UnknownPreset(String),
}

/// Selection state behind the effect picker UI.
///
/// Tracks which preset is highlighted ("Disable" when none) and turns
/// clicks into [`EffectSelection`]s for the reconciler. Rendering is left
/// to the UI layer.
pub struct EffectPicker {
    presets: Vec<EffectPreset>,
    blur_radius: f32,
    asset_dir: Option<PathBuf>,
    supported: bool,
    selected: Option<usize>,
}

impl EffectPicker {
    pub fn new(
        presets: Vec<EffectPreset>,
        blur_radius: f32,
        asset_dir: Option<PathBuf>,
        supported: bool,
    ) -> Self {
        Self {
            presets,
            blur_radius,
            asset_dir,
            supported,
            selected: None,
        }
    }

    pub fn from_settings(settings: &Settings, supported: bool) -> Self {
        Self::new(
            settings.presets.clone(),
            settings.blur_radius,
            settings.asset_dir.clone(),
            supported,
        )
    }

    pub fn presets(&self) -> &[EffectPreset] {
        &self.presets
    }

    /// Effect options are only offered when the backend can run them.
    pub fn options_visible(&self) -> bool {
        self.supported
    }

    pub fn selected(&self) -> Option<&EffectPreset> {
        self.selected.map(|i| &self.presets[i])
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected().is_some_and(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn is_disabled(&self) -> bool {
        self.selected.is_none()
    }

    pub fn select_preset(&mut self, name: &str) -> Result<EffectSelection, PickerError> {
        let index = self
            .presets
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PickerError::UnknownPreset(name.to_string()))?;
        self.selected = Some(index);
        Ok(self.selection())
    }

    pub fn disable(&mut self) -> EffectSelection {
        self.selected = None;
        EffectSelection::Disabled
    }

    /// The selection matching the current highlight.
    pub fn selection(&self) -> EffectSelection {
        self.selected()
            .map(|p| p.selection(self.blur_radius, self.asset_dir.as_deref()))
            .unwrap_or_default()
    }

    /// Where the UI should load a preset's thumbnail from.
    pub fn thumbnail_path(&self, preset: &EffectPreset) -> PathBuf {
        preset.image_path(self.asset_dir.as_deref())
    }
}
