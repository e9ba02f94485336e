//! Render seam between the schema walker and template rendering.
//!
//! The walker never produces text itself. It hands a [`TemplateCategory`],
//! the [`Bindings`] for one artifact and the [`Helpers`] transform set to a
//! [`Renderer`]. Renderers must be deterministic: identical inputs yield
//! identical text.

use crate::constants::{Sentinel, SubstitutionTable};
use crate::error::CodegenError;
use crate::includes::IncludeSet;
use crate::naming;
use sbecpp_schema::{EncodedType, Message, PrimitiveType, Schema};
use std::fmt;

/// Template used for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    /// Composite struct.
    Composite,
    /// Enumeration.
    Enum,
    /// Bit set.
    Set,
    /// Message with its groups and data.
    Message,
    /// Umbrella header.
    Schema,
}

impl TemplateCategory {
    /// Template identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Composite => "composite",
            Self::Enum => "enum",
            Self::Set => "set",
            Self::Message => "message",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity an artifact is generated from.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A composite, enum or set.
    Type(&'a EncodedType),
    /// A message.
    Message(&'a Message),
    /// The whole schema (umbrella header).
    Schema,
}

/// Named values available to a template.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    /// Full schema.
    pub schema: &'a Schema,
    /// Entity being rendered.
    pub subject: Subject<'a>,
    /// Artifacts this one must include.
    pub includes: &'a IncludeSet,
    /// Name of the artifact being rendered.
    pub artifact: &'a str,
}

/// Transform functions exposed to templates.
#[derive(Debug, Clone, Copy)]
pub struct Helpers<'a> {
    table: &'a SubstitutionTable,
    extension: &'a str,
}

impl<'a> Helpers<'a> {
    /// Creates a helper set.
    #[must_use]
    pub fn new(table: &'a SubstitutionTable, extension: &'a str) -> Self {
        Self { table, extension }
    }

    /// See [`naming::class_name`].
    #[must_use]
    pub fn class_name(&self, identifier: &str) -> String {
        naming::class_name(identifier)
    }

    /// See [`naming::artifact_name_with`].
    #[must_use]
    pub fn artifact_name(&self, identifier: &str) -> String {
        naming::artifact_name_with(identifier, self.extension)
    }

    /// See [`naming::getter_name`].
    #[must_use]
    pub fn getter(&self, identifier: &str) -> String {
        naming::getter_name(identifier)
    }

    /// See [`naming::setter_name`].
    #[must_use]
    pub fn setter(&self, identifier: &str) -> String {
        naming::setter_name(identifier)
    }

    /// See [`naming::is_present_name`].
    #[must_use]
    pub fn is_present(&self, identifier: &str) -> String {
        naming::is_present_name(identifier)
    }

    /// See [`naming::reset_name`].
    #[must_use]
    pub fn reset(&self, identifier: &str) -> String {
        naming::reset_name(identifier)
    }

    /// See [`naming::length_name`].
    #[must_use]
    pub fn length(&self, identifier: &str) -> String {
        naming::length_name(identifier)
    }

    /// See [`naming::count_name`].
    #[must_use]
    pub fn count(&self, identifier: &str) -> String {
        naming::count_name(identifier)
    }

    /// See [`naming::constant_name`].
    #[must_use]
    pub fn constant(&self, identifier: &str) -> String {
        naming::constant_name(identifier)
    }

    /// See [`naming::include_guard`].
    #[must_use]
    pub fn include_guard(&self, artifact: &str) -> String {
        naming::include_guard(artifact)
    }

    /// Substitutes a symbolic token, passing unknown tokens through.
    #[must_use]
    pub fn replace_keyword<'t>(&self, token: &'t str) -> &'t str {
        self.table.lookup(token)
    }

    /// Target spelling of a primitive type.
    #[must_use]
    pub fn primitive(&self, prim: PrimitiveType) -> &'static str {
        self.table.primitive(prim)
    }

    /// Literal for a primitive sentinel.
    #[must_use]
    pub fn sentinel(&self, prim: PrimitiveType, sentinel: Sentinel) -> String {
        self.table.sentinel(prim, sentinel)
    }
}

/// Turns bindings into artifact text.
pub trait Renderer: Send + Sync {
    /// Renders one artifact.
    ///
    /// # Errors
    /// Returns [`CodegenError::Render`] if the bindings cannot be rendered
    /// with the requested template.
    fn render(
        &self,
        category: TemplateCategory,
        bindings: &Bindings<'_>,
        helpers: &Helpers<'_>,
    ) -> Result<String, CodegenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(TemplateCategory::Composite.to_string(), "composite");
        assert_eq!(TemplateCategory::Schema.as_str(), "schema");
    }

    #[test]
    fn test_helpers_delegate() {
        let helpers = Helpers::new(SubstitutionTable::cpp(), "hpp");
        assert_eq!(helpers.artifact_name("side"), "Side.hpp");
        assert_eq!(helpers.getter("Side"), helpers.setter("Side"));
        assert_eq!(helpers.is_present("px"), "isPxPresent");
        assert_eq!(helpers.replace_keyword("int16"), "std::int16_t");
        assert_eq!(helpers.replace_keyword("mystery"), "mystery");
        assert_eq!(
            helpers.sentinel(PrimitiveType::Uint8, Sentinel::Max),
            "std::numeric_limits<std::uint8_t>::max() - 1"
        );
    }
}
