//! Playlist ingestion: turning raw M3U text into channel records

pub mod m3u_parser;

pub use m3u_parser::{
    ChannelCatalog, RawPlaylistEntry, StreamVariant, channel_id, entries, extract_variant,
    parse_playlist,
};
