//! Artifacts domain: catalog records, likes, discovery, session routes

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{ArtifactFields, Document};

// Re-export repository types
pub use repository::{
    ArtifactRepository, ArtifactsRepositories, DocumentCollection, Filter, LikeRepository,
    MemoryCollection, PgCollection,
};

// Re-export API types
pub use api::routes;
pub use api::{ArtifactsState, SessionState};
