// Match Ranker and the job catalog it iterates. Thin orchestration around the
// scoring engine; no scoring logic lives here.

pub mod jobs;
pub mod ranker;
