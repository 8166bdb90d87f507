//! The closed catalog of recognized script variants.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Writing system a variant renders in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Script {
    Simplified,
    Traditional,
}

impl Script {
    /// User-facing script name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simplified => "Simplified",
            Self::Traditional => "Traditional",
        }
    }
}

impl Display for Script {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized script/locale variant.
///
/// The catalog is closed: the only way to obtain a `Variant` from free text
/// is [`Variant::parse`], so every value in circulation is a catalog member.
/// Absence of a variant is always `Option::None`, never an empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Variant {
    /// Mainland China (Simplified).
    ZhCn,
    /// Singapore (Simplified).
    ZhSg,
    /// Malaysia (Simplified).
    ZhMy,
    /// Taiwan (Traditional).
    ZhTw,
    /// Hong Kong (Traditional).
    ZhHk,
    /// Macau (Traditional).
    ZhMo,
}

impl Variant {
    /// Stable variant code for storage and serialization.
    pub fn code(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-cn",
            Self::ZhSg => "zh-sg",
            Self::ZhMy => "zh-my",
            Self::ZhTw => "zh-tw",
            Self::ZhHk => "zh-hk",
            Self::ZhMo => "zh-mo",
        }
    }

    /// Writing system this variant renders in.
    pub fn script(self) -> Script {
        match self {
            Self::ZhCn | Self::ZhSg | Self::ZhMy => Script::Simplified,
            Self::ZhTw | Self::ZhHk | Self::ZhMo => Script::Traditional,
        }
    }

    /// User-facing region name.
    pub fn region_name(self) -> &'static str {
        match self {
            Self::ZhCn => "Mainland China",
            Self::ZhSg => "Singapore",
            Self::ZhMy => "Malaysia",
            Self::ZhTw => "Taiwan",
            Self::ZhHk => "Hong Kong",
            Self::ZhMo => "Macau",
        }
    }

    /// Full catalog in stable order.
    pub fn all() -> &'static [Variant] {
        const VARIANTS: [Variant; 6] = [
            Variant::ZhCn,
            Variant::ZhSg,
            Variant::ZhMy,
            Variant::ZhTw,
            Variant::ZhHk,
            Variant::ZhMo,
        ];
        &VARIANTS
    }

    /// Parse free text into a catalog member.
    ///
    /// Input is normalized with [`normalize_code`] before matching, so
    /// `"zh_TW"` and `" ZH-TW "` both yield [`Variant::ZhTw`]. Anything
    /// outside the catalog yields `None`.
    pub fn parse(input: &str) -> Option<Variant> {
        let code = normalize_code(input);
        Variant::all().iter().copied().find(|v| v.code() == code)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for [`Variant::from_str`] on text outside the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized variant code `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::parse(s).ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Normalize a variant code for catalog lookup.
///
/// - Trims whitespace.
/// - Converts `_` to `-` (platforms often report `zh_TW`).
/// - Lowercases ASCII.
pub fn normalize_code(input: &str) -> String {
    input.trim().replace('_', "-").to_ascii_lowercase()
}
