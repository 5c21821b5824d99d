//! # Modus Migrate Catalog
//!
//! Read-only component data for source → target web-component migrations.
//!
//! ## Architecture
//!
//! ```text
//! data dir (JSON)
//!     │
//!     ├──> ComponentStore (read-through cache, one per process)
//!     │      ├─ ComponentTable  (tag key → ComponentRecord, file order kept)
//!     │      ├─ MappingTable    (source tag → target tag + plan/rules)
//!     │      └─ raw documents   (passed through to guidance payloads)
//!     │
//!     ├──> resolver   (user-supplied name → canonical tag key)
//!     ├──> related    (docs/examples → related target components)
//!     ├──> props      (source props/events → target attribute suggestions)
//!     ├──> listing    (component summaries for list views)
//!     ├──> analysis   (markup → per-tag counts + target suggestions)
//!     └──> mui        (MUI → Modus mapping lookups and prop transforms)
//! ```

mod analysis;
mod error;
mod listing;
mod mapping;
mod model;
mod mui;
mod naming;
mod ordered;
mod props;
mod related;
mod resolver;
mod store;

pub use analysis::{
    analyze_markup, AnalysisReport, IdentifiedComponent, ANALYSIS_COMPLETE, ANALYSIS_FAILED,
};
pub use error::{CatalogError, Result};
pub use listing::{summarize_table, ComponentSummary, MAX_CAPABILITIES};
pub use mapping::{normalize_target, MappingEntry, MappingTable, VerificationRule, NOT_FOUND_SENTINEL};
pub use model::{ComponentRecord, ComponentTable, EventSpec, PropSpec, SlotSpec, Storybook};
pub use mui::{MuiComponentMapping, MuiListing, MuiLookup, MuiMappingDocument, PropTransform};
pub use naming::{normalize_prop_name, TagNaming};
pub use props::{
    suggest_name_mappings, MappingCoverage, MemberMappingReport, NameMatch, NameSuggestion,
};
pub use related::{detect_related, RelatedComponent, Relationship};
pub use resolver::{resolve, suggestions, Resolution, ResolutionRule};
pub use store::ComponentStore;
