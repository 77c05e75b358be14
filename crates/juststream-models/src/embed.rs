use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Third-party player used to build a playable embed URL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbedSource {
    #[default]
    Vip,
    Multiembed,
    VidSrc,
}

impl EmbedSource {
    pub const ALL: [EmbedSource; 3] = [EmbedSource::Vip, EmbedSource::Multiembed, EmbedSource::VidSrc];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedSource::Vip => "vip",
            EmbedSource::Multiembed => "multiembed",
            EmbedSource::VidSrc => "vidsrc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmbedSource::Vip => "VIP Player",
            EmbedSource::Multiembed => "Multiembed",
            EmbedSource::VidSrc => "VidSrc",
        }
    }
}

impl fmt::Display for EmbedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vip" => Ok(EmbedSource::Vip),
            "multiembed" => Ok(EmbedSource::Multiembed),
            "vidsrc" => Ok(EmbedSource::VidSrc),
            other => Err(format!("Invalid embed source: {}. Use 'vip', 'multiembed', or 'vidsrc'", other)),
        }
    }
}
