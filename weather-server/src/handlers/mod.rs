//! HTTP request handlers

pub mod air_quality;
pub mod messages;
pub mod meta;
pub mod weather;
