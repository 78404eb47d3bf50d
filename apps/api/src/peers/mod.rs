// Peer Aggregation: compares one respondent's score against stored responses
// for an (industry, role_level) slice. Read-only.

pub mod handlers;
pub mod insights;
pub mod stats;
