//! Domain layer: document model, field names, ranking and search

pub mod discovery;
pub mod entities;
