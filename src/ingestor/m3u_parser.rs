//! Extended M3U playlist parsing
//!
//! Parsing happens in three steps:
//! 1. [`entries`] pairs every `#EXTINF:` line with the line that follows it and
//!    drops pairs whose second line is not a stream URL.
//! 2. [`extract_variant`] turns one pair into a channel name, quality label, logo
//!    and URL.
//! 3. [`ChannelCatalog`] folds the variants into one record per channel id.
//!
//! Nothing here fails: malformed input is skipped.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::models::{ChannelRecord, QualityTier};

const EXTINF_PREFIX: &str = "#EXTINF:";
const STREAM_URL_PREFIX: &str = "http";
const UNKNOWN_CHANNEL: &str = "Unknown Channel";

struct ExtinfPatterns {
    tvg_id: Regex,
    tvg_logo: Regex,
    resolution: Regex,
    resolution_annotation: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static ExtinfPatterns {
    static PATTERNS: OnceLock<ExtinfPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ExtinfPatterns {
        tvg_id: Regex::new(r#"tvg-id="([^"]+)""#).expect("valid tvg-id pattern"),
        tvg_logo: Regex::new(r#"tvg-logo="([^"]+)""#).expect("valid tvg-logo pattern"),
        resolution: Regex::new(r"\(([0-9]+p)\)").expect("valid resolution pattern"),
        resolution_annotation: Regex::new(r"(?i)\s*\([0-9]+p\)")
            .expect("valid resolution annotation pattern"),
        whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
    })
}

/// An `#EXTINF` metadata line and the stream URL line that followed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPlaylistEntry<'a> {
    pub metadata: &'a str,
    pub url: &'a str,
}

impl<'a> RawPlaylistEntry<'a> {
    /// Pair a metadata line with its candidate URL line
    ///
    /// Returns `None` when the candidate is missing, blank, or not an http(s) URL.
    pub fn from_lines(metadata: &'a str, candidate: Option<&'a str>) -> Option<Self> {
        let url = candidate?.trim();
        if url.is_empty() || !url.starts_with(STREAM_URL_PREFIX) {
            return None;
        }
        Some(Self { metadata, url })
    }

    /// Text after the last comma of the metadata line
    pub fn display_name(&self) -> &'a str {
        match self.metadata.rfind(',') {
            Some(pos) => self.metadata[pos + 1..].trim(),
            None => UNKNOWN_CHANNEL,
        }
    }

    pub fn tvg_id(&self) -> &'a str {
        first_capture(&patterns().tvg_id, self.metadata)
    }

    pub fn tvg_logo(&self) -> &'a str {
        first_capture(&patterns().tvg_logo, self.metadata)
    }
}

fn first_capture<'a>(pattern: &Regex, haystack: &'a str) -> &'a str {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Iterate over the valid metadata/URL pairs of a playlist, in file order
pub fn entries(content: &str) -> impl Iterator<Item = RawPlaylistEntry<'_>> {
    let mut lines = content.lines().enumerate().peekable();

    std::iter::from_fn(move || {
        while let Some((line_num, line)) = lines.next() {
            if !line.starts_with(EXTINF_PREFIX) {
                continue;
            }
            let candidate = lines.peek().map(|(_, next)| *next);
            match RawPlaylistEntry::from_lines(line, candidate) {
                Some(entry) => return Some(entry),
                None => trace!(
                    "Skipping EXTINF entry at line {} without a stream URL",
                    line_num + 1
                ),
            }
        }
        None
    })
}

/// One quality variant of a channel, as described by a single playlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamVariant {
    pub channel_name: String,
    pub quality: String,
    pub logo: String,
    pub url: String,
}

/// Derive channel name and quality for an entry
///
/// A `tvg-id` of the form `name@quality` takes precedence over the display name.
pub fn extract_variant(entry: &RawPlaylistEntry<'_>) -> StreamVariant {
    let tvg_id = entry.tvg_id();

    let (channel_name, quality) = if tvg_id.contains('@') {
        let mut parts = tvg_id.split('@');
        let name = parts.next().unwrap_or_default();
        let quality = parts.next().unwrap_or_default();
        (name.to_string(), quality.to_string())
    } else {
        split_display_name(entry.display_name())
    };

    StreamVariant {
        channel_name,
        quality,
        logo: entry.tvg_logo().to_string(),
        url: entry.url.to_string(),
    }
}

/// Split `"HTV7 (480p)"` into `("HTV7", "480p")`
fn split_display_name(display_name: &str) -> (String, String) {
    let patterns = patterns();
    match patterns.resolution.captures(display_name) {
        Some(caps) => {
            let quality = caps[1].to_string();
            let name = patterns
                .resolution_annotation
                .replacen(display_name, 1, "")
                .trim()
                .to_string();
            (name, quality)
        }
        None => (
            display_name.to_string(),
            QualityTier::DEFAULT.label().to_string(),
        ),
    }
}

/// Slug used as the channel id: whitespace runs become `-`, then lowercase
pub fn channel_id(channel_name: &str) -> String {
    patterns()
        .whitespace
        .replace_all(channel_name, "-")
        .to_lowercase()
}

#[derive(Debug)]
struct PendingChannel {
    name: String,
    logo: String,
    qualities: IndexMap<String, String>,
}

/// Accumulates stream variants into channels keyed by id, in first-seen order
#[derive(Debug, Default)]
pub struct ChannelCatalog {
    channels: IndexMap<String, PendingChannel>,
}

impl ChannelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant; the first variant of a channel fixes its name and logo,
    /// later variants with the same quality label replace the earlier URL
    pub fn insert(&mut self, variant: StreamVariant) {
        let id = channel_id(&variant.channel_name);
        let channel = self.channels.entry(id).or_insert_with(|| PendingChannel {
            name: variant.channel_name,
            logo: variant.logo,
            qualities: IndexMap::new(),
        });
        channel.qualities.insert(variant.quality, variant.url);
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn into_records(self) -> Vec<ChannelRecord> {
        self.channels
            .into_iter()
            .map(|(id, channel)| ChannelRecord {
                id,
                name: channel.name,
                logo: channel.logo,
                qualities: order_qualities(channel.qualities),
            })
            .collect()
    }
}

/// Keep only canonical labels, best first; fall back to every label in
/// encounter order when the channel has none of them
fn order_qualities(raw: IndexMap<String, String>) -> IndexMap<String, String> {
    let ordered: IndexMap<String, String> = QualityTier::PREFERENCE
        .iter()
        .filter_map(|tier| {
            raw.get(tier.label())
                .map(|url| (tier.label().to_string(), url.clone()))
        })
        .collect();

    if ordered.is_empty() { raw } else { ordered }
}

/// Parse playlist text into channel records
pub fn parse_playlist(content: &str) -> Vec<ChannelRecord> {
    let mut catalog = ChannelCatalog::new();
    let mut accepted = 0usize;

    for entry in entries(content) {
        catalog.insert(extract_variant(&entry));
        accepted += 1;
    }

    debug!(
        "Parsed {} playlist entries into {} channels",
        accepted,
        catalog.len()
    );
    catalog.into_records()
}
