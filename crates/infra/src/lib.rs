//! Infrastructure layer: storage and the mutation pipeline.

pub mod pipeline;
pub mod repository;


pub use pipeline::{MutationOutcome, MutationPipeline};
pub use repository::{AuthorRepository, InMemoryAuthorRepository, RepositoryError};
