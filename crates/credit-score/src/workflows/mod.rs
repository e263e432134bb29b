pub mod history;
pub mod scoring;
