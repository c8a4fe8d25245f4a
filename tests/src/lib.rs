//! End-to-end checks of the report pipeline, from YAML on disk to the PDF.

mod fixtures;
mod pipeline;
