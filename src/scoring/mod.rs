// Scoring engine: the pure math that turns account and mention metrics
// into bounded scores. Every function in here is deterministic and
// side-effect free; fetching and persistence live elsewhere.

pub mod heat;
pub mod profile;
pub mod project;
pub mod rules;
pub mod sentiment;
pub mod tier;
