//! # sbecpp Schema
//!
//! Read-only model of an SBE message schema.
//!
//! This crate provides:
//! - Type definitions for schema elements (primitives, composites, enums, sets)
//! - Message, group and variable-length data definitions
//! - Type reference resolution used by the code generator
//!
//! The model is produced upstream by a schema loader and is assumed to be
//! valid. Every type derives `serde` traits, keyed by the `token`
//! discriminator, so any serde format can feed it.

pub mod error;
pub mod messages;
pub mod types;

pub use error::SchemaError;
pub use messages::{DataField, Field, GroupField, Message, ScalarField};
pub use types::{
    CompositeDef, CompositeMember, EncodedType, EnumDef, EnumValue, Presence, PrimitiveDef,
    PrimitiveType, Schema, SetChoice, SetDef, TypeRef,
};
