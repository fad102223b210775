//! Fix-all coordination
//!
//! Each document converges through a sequential detect/apply loop that
//! re-binds a fresh semantic model against the current snapshot on every
//! iteration; captured nodes are never trusted across an edit. Documents
//! are mutually independent, so they converge in parallel on the rayon
//! pool, and the final merge keeps only documents that actually changed.
//!
//! Termination: every applied fix removes the matched property from the
//! diagnostic set for good (the rule cannot fire on its own output), and
//! every failed application puts the diagnostic into a skip set, so the
//! loop is bounded even when the host model misbehaves. Cancellation is
//! checked at the top of each iteration and before the merge; a canceled
//! batch is discarded as a whole.

use std::collections::HashSet;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, debug_span, info};

use autoprop_core::cancel::CancelToken;
use autoprop_core::config::LintConfig;
use autoprop_core::cst::ast::{AstNode, PropertyDecl};
use autoprop_core::cst::{CsSyntaxNode, GreenNode};
use autoprop_core::diagnostics::{Diagnostic, Span};
use autoprop_core::result::Result;
use autoprop_core::semantic::{SemanticAnalyzer, SemanticModel};

use crate::detector::{PropertyCandidate, check_use_auto_property, detect};
use crate::fix::convert_to_auto_property;

/// One source document: a path for reporting plus its current tree
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub green: GreenNode,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, green: GreenNode) -> Self {
        Self {
            path: path.into(),
            green,
        }
    }

    pub fn from_root(path: impl Into<PathBuf>, root: &CsSyntaxNode) -> Self {
        Self::new(path, root.green().into_owned())
    }

    pub fn text(&self) -> String {
        CsSyntaxNode::new_root(self.green.clone()).text().to_string()
    }
}

/// A named set of documents
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub documents: Vec<Document>,
}

/// Scope of a bulk fix invocation
#[derive(Debug, Clone, Copy)]
pub enum FixAllScope<'a> {
    Document(&'a Document),
    Project(&'a [Document]),
    Workspace(&'a [Project]),
}

/// A document whose tree changed during the run
#[derive(Debug, Clone)]
pub struct ChangedDocument {
    pub path: PathBuf,
    pub green: GreenNode,
}

impl ChangedDocument {
    pub fn text(&self) -> String {
        CsSyntaxNode::new_root(self.green.clone()).text().to_string()
    }
}

/// Aggregate result of a fix-all run; unchanged documents are skipped
#[derive(Debug, Default)]
pub struct FixAllResult {
    pub changed: Vec<ChangedDocument>,
}

/// Converge every document in `scope` and merge the changed ones, in
/// input order
pub fn fix_all(
    analyzer: &dyn SemanticAnalyzer,
    scope: FixAllScope<'_>,
    config: &LintConfig,
    cancel: &CancelToken,
) -> Result<FixAllResult> {
    let documents: Vec<&Document> = match scope {
        FixAllScope::Document(document) => vec![document],
        FixAllScope::Project(documents) => documents.iter().collect(),
        FixAllScope::Workspace(projects) => projects
            .iter()
            .flat_map(|project| project.documents.iter())
            .collect(),
    };

    let converged: Result<Vec<Option<GreenNode>>> = documents
        .par_iter()
        .map(|document| converge_document(analyzer, document, config, cancel))
        .collect();
    let converged = converged?;

    // Never commit a partial batch.
    cancel.check()?;

    let changed: Vec<ChangedDocument> = documents
        .iter()
        .zip(converged)
        .filter_map(|(document, green)| {
            green.map(|green| ChangedDocument {
                path: document.path.clone(),
                green,
            })
        })
        .collect();
    info!(
        documents = documents.len(),
        changed = changed.len(),
        "fix-all completed"
    );
    Ok(FixAllResult { changed })
}

/// Drive one document to a fixed point; `Ok(None)` means nothing changed
pub fn converge_document(
    analyzer: &dyn SemanticAnalyzer,
    document: &Document,
    config: &LintConfig,
    cancel: &CancelToken,
) -> Result<Option<GreenNode>> {
    let span = debug_span!("converge", document = %document.path.display());
    let _enter = span.enter();

    let mut green = document.green.clone();
    let mut skipped: HashSet<(u32, u32, String)> = HashSet::new();
    let mut applied = 0usize;
    loop {
        cancel.check()?;
        let root = CsSyntaxNode::new_root(green.clone());
        let model = analyzer.analyze(&root);
        let diagnostics = check_use_auto_property(model.as_ref(), config);
        let Some(diagnostic) = diagnostics
            .into_iter()
            .find(|d| !skipped.contains(&skip_key(d)))
        else {
            break;
        };
        let outcome = resolve_candidate(model.as_ref(), &diagnostic)
            .and_then(|candidate| convert_to_auto_property(model.as_ref(), &candidate));
        match outcome {
            Some(new_green) => {
                green = new_green;
                applied += 1;
            }
            None => {
                // Recoverable: drop this diagnostic so the loop stays bounded.
                debug!(
                    property = %diagnostic.property_name,
                    "skipping diagnostic that failed to re-resolve"
                );
                skipped.insert(skip_key(&diagnostic));
            }
        }
    }
    debug!(applied, "document converged");
    Ok((applied > 0).then_some(green))
}

/// Re-resolve a diagnostic into a fresh candidate against the model's tree
fn resolve_candidate(
    model: &dyn SemanticModel,
    diagnostic: &Diagnostic,
) -> Option<PropertyCandidate> {
    let property = model
        .root()
        .descendants()
        .filter_map(PropertyDecl::cast)
        .find(|p| {
            p.name_token()
                .is_some_and(|token| Span::from(token.text_range()) == diagnostic.span)
        })?;
    detect(model, &property)
}

fn skip_key(diagnostic: &Diagnostic) -> (u32, u32, String) {
    (
        diagnostic.span.start,
        diagnostic.span.end,
        diagnostic.property_name.clone(),
    )
}
