use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    BLUR_PROCESSOR_NAME, DEFAULT_BLUR_RADIUS, VIRTUAL_BACKGROUND_PROCESSOR_NAME,
};

/// Mutually exclusive background processing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectFamily {
    Blur,
    ImageReplacement,
}

impl EffectFamily {
    pub const ALL: &[EffectFamily] = &[EffectFamily::Blur, EffectFamily::ImageReplacement];

    /// Name the backend reports for processors of this family.
    pub fn processor_name(self) -> &'static str {
        match self {
            EffectFamily::Blur => BLUR_PROCESSOR_NAME,
            EffectFamily::ImageReplacement => VIRTUAL_BACKGROUND_PROCESSOR_NAME,
        }
    }

    /// Options a processor of this family is constructed with before the
    /// first selection is applied to it.
    pub fn default_options(self) -> EffectOptions {
        match self {
            EffectFamily::Blur => EffectOptions::Blur {
                blur_radius: DEFAULT_BLUR_RADIUS,
            },
            EffectFamily::ImageReplacement => EffectOptions::ImageReplacement {
                image_path: String::new(),
            },
        }
    }
}

impl fmt::Display for EffectFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.processor_name())
    }
}

/// Parameters applied to a running processor.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectOptions {
    Blur { blur_radius: f32 },
    ImageReplacement { image_path: String },
}

impl EffectOptions {
    pub fn family(&self) -> EffectFamily {
        match self {
            EffectOptions::Blur { .. } => EffectFamily::Blur,
            EffectOptions::ImageReplacement { .. } => EffectFamily::ImageReplacement,
        }
    }
}

/// The effect a user asked for.
///
/// Built fresh on every picker interaction and consumed by the reconciler.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum EffectSelection {
    #[default]
    Disabled,
    Blur {
        radius: f32,
    },
    ImageReplacement {
        /// Background image reference (file path or URL) resolved by the UI layer.
        image: String,
    },
}

impl EffectSelection {
    /// Blur at the default radius.
    pub fn blur() -> Self {
        EffectSelection::Blur {
            radius: DEFAULT_BLUR_RADIUS,
        }
    }

    pub fn image(image: impl Into<String>) -> Self {
        EffectSelection::ImageReplacement {
            image: image.into(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, EffectSelection::Disabled)
    }

    pub fn family(&self) -> Option<EffectFamily> {
        self.options().map(|options| options.family())
    }

    /// Processor options for this selection, `None` when disabled.
    pub fn options(&self) -> Option<EffectOptions> {
        match self {
            EffectSelection::Disabled => None,
            EffectSelection::Blur { radius } => Some(EffectOptions::Blur {
                blur_radius: *radius,
            }),
            EffectSelection::ImageReplacement { image } => {
                Some(EffectOptions::ImageReplacement {
                    image_path: image.clone(),
                })
            }
        }
    }

    /// Whether the selection carries enough to configure a processor.
    ///
    /// An image replacement without an image reference can't be applied.
    pub fn is_valid(&self) -> bool {
        match self {
            EffectSelection::Disabled | EffectSelection::Blur { .. } => true,
            EffectSelection::ImageReplacement { image } => !image.trim().is_empty(),
        }
    }
}

impl fmt::Display for EffectSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectSelection::Disabled => write!(f, "disabled"),
            EffectSelection::Blur { radius } => write!(f, "blur(radius={radius})"),
            EffectSelection::ImageReplacement { image } => write!(f, "image({image:?})"),
        }
    }
}
