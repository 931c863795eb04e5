// Topic classification: keyword-rule labeling and per-topic scoring.

pub mod classifier;
