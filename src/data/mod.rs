//! Loading vocabularies and documents, and persisting run artefacts.

pub mod documents;
pub mod normalize;
pub mod reference;
pub mod store;
pub mod vocab;
