//! # Pagecraft HTML Compiler
//!
//! Emits indented markup from a render-ready node forest, either as plain
//! HTML or as the JSX flavour used by component previews.
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_compiler_html::{compile_to_markup, CompileOptions};
//! use pagecraft_tree::Node;
//!
//! let page = Node::container("div", 0u64).with_child(Node::container("span", 1u64));
//! let markup = compile_to_markup(&[page], &CompileOptions::default()).unwrap();
//! assert_eq!(markup, "<div>\n  <span></span>\n</div>\n");
//! ```

mod compiler;
mod options;
pub mod style;


pub use compiler::{compile_style_block, compile_to_markup, CompileError};
pub use options::{AttributeDialect, CompileOptions, StyleMode};
