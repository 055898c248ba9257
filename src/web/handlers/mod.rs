//! HTTP request handlers organized by route

pub mod channels;
pub mod health;
pub mod index;
pub mod playlist;
pub mod static_assets;
