pub mod header;
pub mod journal;
