//! Portfolio document model, fallback content and typed mutations.

pub mod fallback;
pub mod model;
pub mod mutation;

pub use fallback::fallback_document;
pub use model::{PortfolioDocument, Project, ProjectId, SectionKey, Sections, asset_url};
pub use mutation::{
    DocumentMutation, ProjectField, ProjectIdGenerator, ScalarField, apply, parse_tags,
};
