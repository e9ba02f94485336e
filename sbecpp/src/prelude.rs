//! Prelude module for convenient imports.
//!
//! ```ignore
//! use sbecpp::prelude::*;
//! ```

// Schema model
pub use sbecpp_schema::{
    CompositeDef, DataField, EncodedType, EnumDef, Field, GroupField, Message, PrimitiveDef,
    PrimitiveType, ScalarField, Schema, SetDef,
};

// Generation
pub use sbecpp_codegen::{
    CodegenError, GenerationReport, Generator, GeneratorConfig, Renderer, TemplateCategory,
    generate,
};
