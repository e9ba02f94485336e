//! # sbecpp
//!
//! Schema-driven C++ header generator for SBE (Simple Binary Encoding)
//! message schemas.
//!
//! Given an in-memory schema of composites, enums, sets and messages, sbecpp
//! writes one self-contained C++ flyweight header per entity plus an
//! umbrella header that includes every message.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sbecpp::prelude::*;
//!
//! let mut schema = Schema::new("shapes");
//! schema.add_type(EncodedType::Enum(
//!     EnumDef::new("Color", PrimitiveType::Uint8).with_value("RED", "0"),
//! ));
//! schema.add_message(Message::new("Shape", 1).with(ScalarField::new("color", 1, "Color")));
//!
//! generate(&schema, GeneratorConfig::new("include/shapes"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema model
//! - [`codegen`] - Schema walker, include resolution, naming and rendering

pub mod prelude;

/// Schema model.
pub mod schema {
    pub use sbecpp_schema::*;
}

/// Header generation.
pub mod codegen {
    pub use sbecpp_codegen::*;
}
