// Decision-intelligence engine: turns a resume and a job description into a
// weighted, explainable match score. Pure apart from the embedding call.

pub mod engine;
pub mod lexical;
pub mod suggestions;
pub mod weights;
