// Akari: credibility scoring and audience-overlap engine for crypto Twitter.
//
// This is the library root. Each module corresponds to a major subsystem
// of the scoring pipeline.

pub mod circle;
pub mod config;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod sentiment;
pub mod sources;
pub mod topics;
