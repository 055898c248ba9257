use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One logical channel with every quality variant found for it in the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Slug derived from `name`
    pub id: String,
    pub name: String,
    /// Logo of the first entry seen for this channel, empty when it had none
    pub logo: String,
    /// Quality label to stream URL, in preference order
    pub qualities: IndexMap<String, String>,
}

/// Canonical quality labels, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    P720,
    P480,
    P360,
}

impl QualityTier {
    /// Output preference order
    pub const PREFERENCE: [QualityTier; 3] = [QualityTier::P720, QualityTier::P480, QualityTier::P360];

    /// Quality assumed when an entry carries no annotation
    pub const DEFAULT: QualityTier = QualityTier::P360;

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::P720 => "720p",
            QualityTier::P480 => "480p",
            QualityTier::P360 => "360p",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_tier_labels() {
        let labels: Vec<&str> = QualityTier::PREFERENCE.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["720p", "480p", "360p"]);
        assert_eq!(QualityTier::DEFAULT.label(), "360p");
    }

    #[test]
    fn test_channel_record_json_shape() {
        let mut qualities = IndexMap::new();
        qualities.insert("720p".to_string(), "http://stream/a".to_string());
        qualities.insert("360p".to_string(), "http://stream/b".to_string());
        let record = ChannelRecord {
            id: "vtv1".to_string(),
            name: "vtv1".to_string(),
            logo: String::new(),
            qualities,
        };

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"vtv1","name":"vtv1","logo":"","qualities":{"720p":"http://stream/a","360p":"http://stream/b"}}"#
        );
    }
}
