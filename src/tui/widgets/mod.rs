//! Console widgets

pub mod annotators;
pub mod jobs;

pub use annotators::render_annotators;
pub use jobs::render_jobs;
