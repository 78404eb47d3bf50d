pub mod assessment;
pub mod employer;
pub mod respondent;
