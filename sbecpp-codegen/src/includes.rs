//! Include resolution.
//!
//! Computes, for every generated header, the set of sibling headers it must
//! include. Primitive aliases are inlined and never appear in a set.

use crate::error::CodegenError;
use crate::naming;
use sbecpp_schema::{CompositeDef, Field, Message, Schema};
use std::collections::BTreeSet;

/// De-duplicated set of artifact names, iterated in sorted order.
pub type IncludeSet = BTreeSet<String>;

/// Resolves include sets against a schema.
#[derive(Debug, Clone, Copy)]
pub struct IncludeResolver<'a> {
    schema: &'a Schema,
    extension: &'a str,
}

impl<'a> IncludeResolver<'a> {
    /// Creates a resolver using the default header extension.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            extension: naming::DEFAULT_EXTENSION,
        }
    }

    /// Sets the artifact extension.
    #[must_use]
    pub fn with_extension(mut self, extension: &'a str) -> Self {
        self.extension = extension;
        self
    }

    /// Includes of a message header: every referenced composite, enum and
    /// set, every group dimension type, every data type, and the schema
    /// header type.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] if a field references a type
    /// that is neither declared nor a built-in primitive.
    pub fn for_message(&self, message: &Message) -> Result<IncludeSet, CodegenError> {
        self.for_fields(
            &message.name,
            &message.fields,
            Some(self.schema.header_type.as_str()),
        )
    }

    /// Includes of a field list.
    ///
    /// `header` is only passed by the outermost message call; groups recurse
    /// with `None`, so the header include is added exactly once.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] on an unresolvable field type.
    pub fn for_fields(
        &self,
        owner: &str,
        fields: &[Field],
        header: Option<&str>,
    ) -> Result<IncludeSet, CodegenError> {
        let mut includes = IncludeSet::new();

        for field in fields {
            match field {
                Field::Scalar(f) => {
                    let referenced_by = format!("{owner}.{}", f.name);
                    let resolved = self.schema.resolve_type(&f.type_name, &referenced_by)?;
                    if resolved.has_artifact() {
                        includes.insert(self.artifact(&f.type_name));
                    }
                }
                Field::Group(g) => {
                    includes.insert(self.artifact(&g.dimension_type));
                    let nested = self.for_fields(&format!("{owner}.{}", g.name), &g.fields, None)?;
                    includes.extend(nested);
                }
                Field::Data(d) => {
                    includes.insert(self.artifact(&d.type_name));
                }
            }
        }

        if let Some(header) = header {
            includes.insert(self.artifact(header));
        }

        Ok(includes)
    }

    /// Includes of a composite header: members typed by composites, enums
    /// or sets.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] on an unresolvable member type.
    pub fn for_composite(&self, composite: &CompositeDef) -> Result<IncludeSet, CodegenError> {
        let mut includes = IncludeSet::new();

        for member in &composite.contained_types {
            let referenced_by = format!("{}.{}", composite.name, member.name);
            let resolved = self.schema.resolve_type(&member.type_name, &referenced_by)?;
            if resolved.has_artifact() {
                includes.insert(self.artifact(&member.type_name));
            }
        }

        Ok(includes)
    }

    /// Includes of the umbrella header: every message, never standalone
    /// types.
    #[must_use]
    pub fn for_schema(&self) -> IncludeSet {
        self.schema
            .messages
            .iter()
            .map(|m| self.artifact(&m.name))
            .collect()
    }

    fn artifact(&self, name: &str) -> String {
        naming::artifact_name_with(name, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbecpp_schema::{
        DataField, EncodedType, EnumDef, GroupField, PrimitiveDef, PrimitiveType, ScalarField,
        SetDef,
    };

    fn set(names: &[&str]) -> IncludeSet {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn base_schema() -> Schema {
        let mut schema = Schema::new("test").with_header_type("MessageHeader");
        schema.add_type(EncodedType::Type(PrimitiveDef::new(
            "Qty",
            PrimitiveType::Uint32,
        )));
        schema.add_type(EncodedType::Enum(
            EnumDef::new("Color", PrimitiveType::Uint8)
                .with_value("RED", "0")
                .with_value("GREEN", "1"),
        ));
        schema.add_type(EncodedType::Composite(
            CompositeDef::new("Point")
                .with_member("x", "int32")
                .with_member("y", "int32"),
        ));
        schema.add_type(EncodedType::Set(
            SetDef::new("Flags", PrimitiveType::Uint8).with_choice("Active", 0),
        ));
        schema.add_type(EncodedType::Composite(
            CompositeDef::new("groupSizeEncoding")
                .with_member("blockLength", "uint16")
                .with_member("numInGroup", "uint16"),
        ));
        schema.add_type(EncodedType::Composite(
            CompositeDef::new("varStringEncoding")
                .with_member("length", "uint32")
                .with_member("varData", "uint8"),
        ));
        schema
    }

    #[test]
    fn test_message_includes_referenced_types_and_header() {
        let schema = base_schema();
        let message = Message::new("Shape", 1)
            .with(ScalarField::new("position", 1, "Point"))
            .with(ScalarField::new("color", 2, "Color"));

        let includes = IncludeResolver::new(&schema)
            .for_message(&message)
            .expect("resolvable");
        assert_eq!(includes, set(&["Color.h", "MessageHeader.h", "Point.h"]));
    }

    #[test]
    fn test_primitive_fields_contribute_nothing() {
        let schema = base_schema();
        let message = Message::new("Fill", 2)
            .with(ScalarField::new("qty", 1, "Qty"))
            .with(ScalarField::new("px", 2, "int64"));

        let includes = IncludeResolver::new(&schema)
            .for_message(&message)
            .expect("resolvable");
        assert_eq!(includes, set(&["MessageHeader.h"]));
    }

    #[test]
    fn test_header_included_for_empty_message() {
        let schema = base_schema();
        let includes = IncludeResolver::new(&schema)
            .for_message(&Message::new("Heartbeat", 3))
            .expect("resolvable");
        assert_eq!(includes, set(&["MessageHeader.h"]));
    }

    #[test]
    fn test_group_with_data_adds_header_once() {
        let schema = base_schema();
        let message = Message::new("Note", 4).with(
            GroupField::new("entries", 10).with(DataField::new("text", 11, "varStringEncoding")),
        );

        let includes = IncludeResolver::new(&schema)
            .for_message(&message)
            .expect("resolvable");
        assert_eq!(
            includes,
            set(&["GroupSizeEncoding.h", "MessageHeader.h", "VarStringEncoding.h"])
        );
    }

    #[test]
    fn test_nested_call_does_not_add_header() {
        let schema = base_schema();
        let group = GroupField::new("entries", 10)
            .with(ScalarField::new("flags", 11, "Flags"))
            .with(GroupField::new("inner", 12).with(ScalarField::new("color", 13, "Color")));

        let includes = IncludeResolver::new(&schema)
            .for_fields("Note.entries", &group.fields, None)
            .expect("resolvable");
        assert_eq!(includes, set(&["Color.h", "Flags.h", "GroupSizeEncoding.h"]));
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let schema = base_schema();
        let message = Message::new("Segment", 5)
            .with(ScalarField::new("from", 1, "Point"))
            .with(ScalarField::new("to", 2, "Point"))
            .with(GroupField::new("waypoints", 3).with(ScalarField::new("at", 4, "Point")));

        let includes = IncludeResolver::new(&schema)
            .for_message(&message)
            .expect("resolvable");
        assert_eq!(
            includes,
            set(&["GroupSizeEncoding.h", "MessageHeader.h", "Point.h"])
        );
    }

    #[test]
    fn test_unknown_field_type_fails_fast() {
        let schema = base_schema();
        let message = Message::new("Broken", 6).with(ScalarField::new("px", 1, "Decimal"));

        let err = IncludeResolver::new(&schema)
            .for_message(&message)
            .expect_err("unknown type");
        match err {
            CodegenError::UnknownType {
                type_name,
                referenced_by,
            } => {
                assert_eq!(type_name, "Decimal");
                assert_eq!(referenced_by, "Broken.px");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_composite_includes() {
        let mut schema = base_schema();
        let line = CompositeDef::new("Line")
            .with_member("start", "Point")
            .with_member("color", "Color")
            .with_member("width", "Qty")
            .with_member("style", "uint8");
        schema.add_type(EncodedType::Composite(line.clone()));

        let includes = IncludeResolver::new(&schema)
            .for_composite(&line)
            .expect("resolvable");
        assert_eq!(includes, set(&["Color.h", "Point.h"]));
    }

    #[test]
    fn test_schema_includes_only_messages() {
        let mut schema = base_schema();
        schema.add_message(Message::new("Shape", 1).with(ScalarField::new("p", 1, "Point")));
        schema.add_message(Message::new("heartbeat", 2));

        let includes = IncludeResolver::new(&schema).for_schema();
        assert_eq!(includes, set(&["Heartbeat.h", "Shape.h"]));
    }

    #[test]
    fn test_custom_extension() {
        let schema = base_schema();
        let includes = IncludeResolver::new(&schema)
            .with_extension("hpp")
            .for_message(&Message::new("Shape", 1).with(ScalarField::new("c", 1, "Color")))
            .expect("resolvable");
        assert_eq!(includes, set(&["Color.hpp", "MessageHeader.hpp"]));
    }
}
