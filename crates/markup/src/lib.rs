//! # Modus Migrate Markup
//!
//! Text-level helpers for moving markup from one web-component tag family to another.
//!
//! ## Architecture
//!
//! ```text
//! markup text
//!     │
//!     ├──> TagPattern (per tag name)
//!     │      ├─ opening: `<tag` + whitespace, `>` or `/`
//!     │      └─ closing: `</tag>`
//!     │
//!     ├──> scan
//!     │      ├─ count opening tags
//!     │      └─ extract `<prefix…` tag tokens in order
//!     │
//!     └──> rewrite
//!            ├─ mapped tags: rename opening + closing tags
//!            └─ unmapped tags: insert a marker comment before each opening tag
//! ```
//!
//! Matching is literal and single-pass. It is not an HTML parser: comments, attribute values
//! and script bodies that happen to contain `<tag ` are rewritten like any other occurrence.

mod error;
mod pattern;
mod rewrite;
mod scan;

pub use error::{MarkupError, Result};
pub use pattern::TagPattern;
pub use rewrite::{
    rewrite, unmapped_marker, ChangeKind, RewriteChange, RewriteOutcome, TagMapping,
};
pub use scan::{count_opening_tags, extract_prefixed_tags};
