//! Composite flyweight generation.

use super::INDENT;
use super::accessors::AccessorWriter;
use crate::error::CodegenError;
use crate::render::Helpers;
use sbecpp_schema::{CompositeDef, Presence, Schema};

/// Generates the flyweight class for a composite type.
pub struct CompositeGenerator<'a> {
    schema: &'a Schema,
    helpers: &'a Helpers<'a>,
}

impl<'a> CompositeGenerator<'a> {
    /// Creates a new composite generator.
    #[must_use]
    pub fn new(schema: &'a Schema, helpers: &'a Helpers<'a>) -> Self {
        Self { schema, helpers }
    }

    /// Generates the class body for a composite.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] if a member type cannot be
    /// resolved.
    pub fn generate(&self, composite: &CompositeDef) -> Result<String, CodegenError> {
        let class = self.helpers.class_name(&composite.name);
        let writer = AccessorWriter::new(self.schema, self.helpers, class.as_str());

        let mut members = String::new();
        let mut offset = 0;
        for member in &composite.contained_types {
            offset += writer.field(
                &mut members,
                &member.name,
                &member.type_name,
                offset,
                Presence::Required,
                &format!("{}.{}", composite.name, member.name),
            )?;
        }

        let mut output = String::new();
        if let Some(desc) = &composite.description {
            output.push_str(&format!("/// {desc}\n"));
        }
        output.push_str(&format!("class {class}\n{{\npublic:\n"));
        output.push_str(&format!(
            "{INDENT}static constexpr std::size_t kEncodedLength = {offset};\n\n"
        ));
        output.push_str(&format!(
            "{INDENT}{class}(char* buffer, std::size_t offset)\n{INDENT}    : buffer_(buffer), offset_(offset)\n{INDENT}{{\n{INDENT}}}\n\n"
        ));
        output.push_str(&format!("{INDENT}char* buffer() const {{ return buffer_; }}\n"));
        output.push_str(&format!(
            "{INDENT}std::size_t offset() const {{ return offset_; }}\n\n"
        ));
        output.push_str(&members);
        output.push_str("private:\n");
        output.push_str(&format!("{INDENT}char* buffer_;\n"));
        output.push_str(&format!("{INDENT}std::size_t offset_;\n"));
        output.push_str("};\n\n");

        Ok(output)
    }
}
