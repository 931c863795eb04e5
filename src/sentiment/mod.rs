// Sentiment boundary: the external text-sentiment function the engine
// consumes, plus the default lexicon-backed implementation.

pub mod lexicon;
pub mod traits;
