//! `peopleops-policy` — lexical policy matching and the question responder.
//!
//! Not semantic search: documents and questions become bag-of-words
//! term-frequency vectors, ranked by cosine similarity plus small audience and
//! tag boosts. The corpus is loaded once at startup and immutable for the
//! process lifetime.

pub mod document;
pub mod index;
pub mod sanitize;
pub mod service;

pub use document::{DatasetError, PolicyDocument, load_dataset};
pub use index::{PolicyIndex, TermVector, cosine_similarity, tokenize};
pub use sanitize::sanitize_question;
pub use service::{PolicyAnswer, PolicyCitation, PolicyError, PolicyService};
