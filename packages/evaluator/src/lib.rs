//! # Pagecraft Evaluator
//!
//! Turns the editor's layer tree ([`SourceNode`]) into render-ready
//! [`Node`](pagecraft_tree::Node)s, right before the canvas renders or the
//! compiler emits markup.

pub mod fingerprint;
pub mod source;
pub mod transformer;

pub use fingerprint::{Fingerprint, FingerprintTree, Fingerprints};
pub use source::SourceNode;
pub use transformer::{CacheStats, Transformer};
