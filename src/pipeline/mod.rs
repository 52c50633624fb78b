pub mod extraction;
pub mod merge;
