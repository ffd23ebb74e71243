pub mod pipe;
pub mod query;
pub mod sweep;
