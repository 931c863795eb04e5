// Pipelines: the orchestration that feeds fetched data through the
// pure scoring engine and persists the results.

pub mod bulk;
pub mod profile;
pub mod project;
