// Heuristic extraction of structured facts from unstructured resume / job text.
// Rule-based only (regex + keyword lists). Every function here degrades to an
// empty / zero result instead of failing.

pub mod education;
pub mod experience;
pub mod normalize;
pub mod profile;
pub mod skills;
