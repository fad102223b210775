//! Autoprop Rules
//!
//! The backing-field property rule: detection of read-only properties that
//! trivially forward a private readonly field, the code fix that collapses
//! them into getter-only auto-properties, and the fix-all coordinator that
//! converges documents, projects, and workspaces.

pub mod detector;
pub mod fix;
pub mod fixall;

mod references;

pub use detector::{
    FIX_TITLE, PropertyCandidate, RULE, RULE_ID, check_use_auto_property, detect,
};
pub use fix::convert_to_auto_property;
pub use fixall::{
    ChangedDocument, Document, FixAllResult, FixAllScope, Project, converge_document, fix_all,
};
