//! Autoprop Core
//!
//! Infrastructure for the backing-field property elimination engine: a
//! lossless C# concrete syntax tree (Rowan-based), the semantic facade the
//! host plugs its symbol resolution into, diagnostics, configuration, and
//! cooperative cancellation. The rule itself lives in `autoprop-rules`.

pub mod cancel;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod semantic;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use config::{LintConfig, RuleSettings};
pub use diagnostics::{
    Diagnostic, RuleCategory, RuleDescriptor, Severity, Span, render_human, render_json,
};
pub use error::AutopropError;
pub use result::Result;
pub use semantic::{
    Accessibility, SemanticAnalyzer, SemanticModel, Symbol, SymbolId, SymbolKind, TypeId,
};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autoprop=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
