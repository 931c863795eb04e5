// Data sources: the RapidAPI Twitter client and the normalizers that
// turn its heterogeneous JSON into the typed records the engine consumes.
//
// Contract with the engine: numeric fields are non-negative, optional
// fields get named neutral defaults, and unparseable records normalize
// to None/empty rather than propagating partial data into scoring.

pub mod client;
pub mod followers;
pub mod profiles;
pub mod tweets;
