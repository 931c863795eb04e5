// Inner-circle engine: selecting a project's influential audience,
// weighting members, and measuring audience overlap between projects.

pub mod overlap;
pub mod segment;
pub mod selection;
pub mod weight;
