//! Pipeline Naming
//!
//! Deterministic installation names for ingest pipelines.
//!
//! # Overview
//!
//! - **DataStream**: `{type, dataset}` descriptor plus its entry pipeline
//! - **installation_name_for_pipeline**: version-qualified name under which
//!   a package pipeline is registered
//! - **custom_pipeline_name_for_data_stream**: the `@custom` hook pipeline
//! - **AssetPath**: classification of pipeline files inside a package
//!
//! Every function here is pure string composition with no shared state.
//!
//! # Example
//!
//! ```rust
//! use pipeline_naming::{custom_pipeline_name_for_data_stream, DataStream};
//!
//! let ds = DataStream::new("logs", "test").unwrap();
//! assert_eq!(custom_pipeline_name_for_data_stream(&ds), "logs-test@custom");
//! ```

#![warn(missing_docs)]

pub mod asset;
pub mod data_stream;
pub mod error;
pub mod names;

// Re-exports
pub use asset::{is_data_stream_pipeline, is_top_level_pipeline, AssetPath};
pub use data_stream::{DataStream, DEFAULT_ENTRY_PIPELINE};
pub use error::NamingError;
pub use names::{
    custom_pipeline_name_for_data_stream, installation_name_for_pipeline,
    pipeline_name_for_data_stream, top_level_pipeline_name, PipelineTarget, CUSTOM_PIPELINE_SUFFIX,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for name resolution
    pub use crate::{
        custom_pipeline_name_for_data_stream, installation_name_for_pipeline, AssetPath,
        DataStream, NamingError, PipelineTarget,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
