// Respondent registration and lookup, plus the "latest assessment" views the
// dashboard reads.

pub mod handlers;
