//! # sbecpp Codegen
//!
//! C++ header generation from SBE schemas.
//!
//! This crate provides:
//! - A schema walker that emits one header per composite, enum, set and message
//! - Include resolution between generated headers
//! - The naming policy shared by all templates
//! - Symbolic constant substitution for primitive types and sentinels
//! - A pluggable [`Renderer`] with a built-in C++ implementation
//!
//! ```ignore
//! use sbecpp_codegen::{GeneratorConfig, generate};
//!
//! let report = generate(&schema, GeneratorConfig::new("include/shapes").jobs(4))?;
//! println!("wrote {} headers", report.len());
//! ```

pub mod config;
pub mod constants;
pub mod cpp;
pub mod error;
pub mod generator;
pub mod includes;
pub mod naming;
pub mod render;

pub use config::GeneratorConfig;
pub use constants::{Sentinel, SentinelValue, SubstitutionTable, sentinel_token, sentinel_value};
pub use cpp::CppRenderer;
pub use error::CodegenError;
pub use generator::{ArtifactPlan, GenerationReport, Generator, RenderedArtifact, generate};
pub use includes::{IncludeResolver, IncludeSet};
pub use render::{Bindings, Helpers, Renderer, Subject, TemplateCategory};
