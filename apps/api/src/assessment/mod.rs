// Assessment core: answer normalization, readiness scoring, and intake.
// Scoring inputs only ever arrive through `normalize`; scores are never taken
// from the client.

pub mod answers;
pub mod handlers;
pub mod intake;
pub mod legacy;
pub mod normalize;
pub mod scoring;
pub mod store;
pub mod submission;
pub mod validation;
