use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PagescanError, Result};

/// Output size/quality preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityTier {
    EmailFriendly,
    #[default]
    Balanced,
    PrintQuality,
}

impl QualityTier {
    /// Fraction of the print baseline resolution kept by this tier.
    pub fn scale_factor(&self) -> f32 {
        match self {
            Self::EmailFriendly => 0.6,
            Self::Balanced => 0.8,
            Self::PrintQuality => 1.0,
        }
    }

    /// JPEG quality used when a page of this tier is encoded.
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            Self::EmailFriendly => 60,
            Self::Balanced => 80,
            Self::PrintQuality => 92,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailFriendly => write!(f, "Email friendly"),
            Self::Balanced => write!(f, "Balanced"),
            Self::PrintQuality => write!(f, "Print quality"),
        }
    }
}

impl FromStr for QualityTier {
    type Err = PagescanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "email_friendly" | "email" => Ok(Self::EmailFriendly),
            "balanced" => Ok(Self::Balanced),
            "print_quality" | "print" => Ok(Self::PrintQuality),
            _ => Err(PagescanError::UnknownQualityTier(s.to_string())),
        }
    }
}
