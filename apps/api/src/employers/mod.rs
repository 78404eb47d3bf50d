pub mod handlers;
pub mod leads;
