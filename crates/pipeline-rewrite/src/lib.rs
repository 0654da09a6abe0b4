//! Pipeline Rewrite
//!
//! Rewrites pipeline references inside serialized ingest pipelines and
//! injects the custom pipeline hook.
//!
//! # Core Operations
//!
//! - **Rewrite**: swap logical names inside `{{ IngestPipeline '...' }}`
//!   references for installation names, leaving every other byte alone
//! - **Resolve**: replace the whole reference construct with the name, for
//!   documents that must install without template rendering
//! - **Hook**: append a `pipeline` processor calling the `@custom` pipeline
//!
//! # Architecture
//!
//! ```text
//! Substitutions → SubstitutionTable ─┐
//!                                    ├→ Rewriter (per-format ReferencePattern) → document'
//! document → PipelineFormat::detect ─┘
//!
//! document' → PipelineFormat::append_step(CustomPipelineHook) → installable document
//! ```
//!
//! # Example
//!
//! ```rust
//! use pipeline_rewrite::{rewrite, Substitution};
//!
//! let doc = r#"{"processors":[{"pipeline":{"name":"{{ IngestPipeline 'pipeline-json' }}"}}]}"#;
//! let subs = [Substitution::ingest_pipeline("pipeline-json", "logs-coredns.log-1.0.1-pipeline-json")];
//!
//! let out = rewrite(doc, &subs).unwrap();
//! assert!(out.contains("'logs-coredns.log-1.0.1-pipeline-json'"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod formats;
pub mod hook;
pub mod plan;
pub mod reference;
pub mod rewriter;
pub mod substitution;

// Re-exports for convenience
pub use error::{ParseError, PipelineError, PipelineResult, PreconditionError, SerializeError};
pub use formats::PipelineFormat;
pub use hook::{add_custom_pipeline_hook, CustomPipelineHook, InstallContent, PipelineInstall};
pub use plan::{prepare_pipelines, select_pipeline_assets, PipelineAsset};
pub use reference::{QuoteStyle, ReferencePattern, RewriteMode, TemplateStyle};
pub use rewriter::{resolve, rewrite, rewrite_as, Rewriter, RewriterOptions};
pub use substitution::{Substitution, SubstitutionFile, SubstitutionTable, INGEST_PIPELINE_FUNCTION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for rewriting pipelines
    pub use crate::error::{ParseError, PipelineError, PreconditionError};
    pub use crate::formats::PipelineFormat;
    pub use crate::hook::{add_custom_pipeline_hook, PipelineInstall};
    pub use crate::reference::RewriteMode;
    pub use crate::rewriter::{resolve, rewrite, Rewriter, RewriterOptions};
    pub use crate::substitution::{Substitution, SubstitutionTable};
    pub use pipeline_naming::{DataStream, PipelineTarget};
}
