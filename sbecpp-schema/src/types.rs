//! Schema type definitions.
//!
//! This module contains the data structures representing schema elements:
//! the root [`Schema`], the [`EncodedType`] variants and the primitive
//! encodings they are built from.

use crate::error::SchemaError;
use crate::messages::Message;
use serde::{Deserialize, Serialize};

/// Complete schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Package name (namespace of the generated code).
    pub package: String,
    /// Name of the message header type shared by all messages.
    pub header_type: String,
    /// Type definitions in declaration order.
    #[serde(default)]
    pub types: Vec<EncodedType>,
    /// Message definitions in declaration order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Schema {
    /// Creates a new empty schema using the conventional `messageHeader`
    /// header type.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            header_type: "messageHeader".to_string(),
            types: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Sets the header type name.
    #[must_use]
    pub fn with_header_type(mut self, name: impl Into<String>) -> Self {
        self.header_type = name.into();
        self
    }

    /// Adds a type definition to the schema.
    pub fn add_type(&mut self, type_def: EncodedType) {
        self.types.push(type_def);
    }

    /// Adds a message definition to the schema.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Looks up a declared type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&EncodedType> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Returns true if a type with the given name is declared.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.get_type(name).is_some()
    }

    /// Resolves a type reference made by `referenced_by`.
    ///
    /// Declared types win over built-in primitive names, so a schema may
    /// shadow `int32` with its own alias.
    ///
    /// # Errors
    /// Returns [`SchemaError::TypeNotFound`] if the name is neither declared
    /// nor a built-in primitive.
    pub fn resolve_type<'a>(
        &'a self,
        name: &str,
        referenced_by: &str,
    ) -> Result<TypeRef<'a>, SchemaError> {
        if let Some(declared) = self.get_type(name) {
            return Ok(TypeRef::Declared(declared));
        }
        PrimitiveType::from_sbe_name(name)
            .map(TypeRef::Primitive)
            .ok_or_else(|| SchemaError::type_not_found(name, referenced_by))
    }
}

/// A resolved type reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeRef<'a> {
    /// Type declared in the schema.
    Declared(&'a EncodedType),
    /// Built-in primitive used inline.
    Primitive(PrimitiveType),
}

impl TypeRef<'_> {
    /// Returns true if the referenced type has its own generated header.
    #[must_use]
    pub fn has_artifact(&self) -> bool {
        match self {
            Self::Declared(t) => t.has_artifact(),
            Self::Primitive(_) => false,
        }
    }

    /// Returns the primitive encoding when the reference is a scalar or
    /// array alias.
    #[must_use]
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Declared(EncodedType::Type(p)) => Some(p.primitive_type),
            Self::Declared(_) => None,
            Self::Primitive(p) => Some(*p),
        }
    }
}

/// Type definition variants, discriminated by `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "token", rename_all = "lowercase")]
pub enum EncodedType {
    /// Primitive alias, inlined at point of use.
    #[serde(rename = "type")]
    Type(PrimitiveDef),
    /// Composite type definition.
    Composite(CompositeDef),
    /// Enum type definition.
    Enum(EnumDef),
    /// Set (bitfield) type definition.
    Set(SetDef),
}

impl EncodedType {
    /// Returns the name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Type(p) => &p.name,
            Self::Composite(c) => &c.name,
            Self::Enum(e) => &e.name,
            Self::Set(s) => &s.name,
        }
    }

    /// Returns the `token` discriminator.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Composite(_) => "composite",
            Self::Enum(_) => "enum",
            Self::Set(_) => "set",
        }
    }

    /// Returns true for composites, enums and sets.
    #[must_use]
    pub const fn has_artifact(&self) -> bool {
        !matches!(self, Self::Type(_))
    }

    /// Returns the encoded size of the type in bytes, resolving composite
    /// members against `schema`. Unknown members count as zero.
    #[must_use]
    pub fn encoded_length(&self, schema: &Schema) -> usize {
        match self {
            Self::Type(p) => p.encoded_length(),
            Self::Composite(c) => c
                .contained_types
                .iter()
                .map(|m| match schema.resolve_type(&m.type_name, &c.name) {
                    Ok(TypeRef::Declared(t)) => t.encoded_length(schema),
                    Ok(TypeRef::Primitive(p)) => p.size(),
                    Err(_) => 0,
                })
                .sum(),
            Self::Enum(e) => e.encoding_type.size(),
            Self::Set(s) => s.encoding_type.size(),
        }
    }
}

/// Primitive alias definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveDef {
    /// Type name.
    pub name: String,
    /// Underlying primitive type.
    pub primitive_type: PrimitiveType,
    /// Array length (None for scalar).
    #[serde(default)]
    pub length: Option<usize>,
    /// Presence of values of this type.
    #[serde(default)]
    pub presence: Presence,
    /// Constant value (if presence is constant).
    #[serde(default)]
    pub constant_value: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl PrimitiveDef {
    /// Creates a new primitive alias definition.
    #[must_use]
    pub fn new(name: impl Into<String>, primitive_type: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            primitive_type,
            length: None,
            presence: Presence::Required,
            constant_value: None,
            description: None,
        }
    }

    /// Returns the encoded length in bytes.
    #[must_use]
    pub fn encoded_length(&self) -> usize {
        let base_size = self.primitive_type.size();
        self.length.map_or(base_size, |len| base_size * len)
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.length.is_some() && self.length != Some(1)
    }
}

/// SBE primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Single character (1 byte).
    Char,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveType {
    /// All primitive types, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Char,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float,
        Self::Double,
    ];

    /// Returns the size of the primitive type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Char | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double => 8,
        }
    }

    /// Returns the SBE type name.
    #[must_use]
    pub const fn sbe_name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parses a primitive type from its SBE name.
    #[must_use]
    pub fn from_sbe_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.sbe_name() == name)
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

/// Composite type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeDef {
    /// Type name.
    pub name: String,
    /// Members in declaration order.
    #[serde(default)]
    pub contained_types: Vec<CompositeMember>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CompositeDef {
    /// Creates a new composite type definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contained_types: Vec::new(),
            description: None,
        }
    }

    /// Adds a member to the composite.
    pub fn add_member(&mut self, member: CompositeMember) {
        self.contained_types.push(member);
    }

    /// Builder-style variant of [`CompositeDef::add_member`].
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.add_member(CompositeMember::new(name, type_name));
        self
    }
}

/// Member of a composite type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeMember {
    /// Member name.
    pub name: String,
    /// Referenced type name (declared type or built-in primitive).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CompositeMember {
    /// Creates a new composite member.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: None,
        }
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    /// Type name.
    pub name: String,
    /// Underlying encoding type.
    pub encoding_type: PrimitiveType,
    /// Valid values.
    #[serde(default)]
    pub valid_values: Vec<EnumValue>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl EnumDef {
    /// Creates a new enum type definition.
    #[must_use]
    pub fn new(name: impl Into<String>, encoding_type: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            encoding_type,
            valid_values: Vec::new(),
            description: None,
        }
    }

    /// Adds a valid value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.valid_values.push(value);
    }

    /// Builder-style variant of [`EnumDef::add_value`].
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_value(EnumValue::new(name, value));
        self
    }
}

/// Enum valid value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Encoded value as written in the schema (`'A'` for char enums).
    pub value: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// Set (bitfield) type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDef {
    /// Type name.
    pub name: String,
    /// Underlying encoding type.
    pub encoding_type: PrimitiveType,
    /// Bit choices.
    #[serde(default)]
    pub choices: Vec<SetChoice>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl SetDef {
    /// Creates a new set type definition.
    #[must_use]
    pub fn new(name: impl Into<String>, encoding_type: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            encoding_type,
            choices: Vec::new(),
            description: None,
        }
    }

    /// Adds a choice to the set.
    pub fn add_choice(&mut self, choice: SetChoice) {
        self.choices.push(choice);
    }

    /// Builder-style variant of [`SetDef::add_choice`].
    #[must_use]
    pub fn with_choice(mut self, name: impl Into<String>, bit_position: u8) -> Self {
        self.add_choice(SetChoice::new(name, bit_position));
        self
    }
}

/// Set choice (bit position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetChoice {
    /// Choice name.
    pub name: String,
    /// Bit position (0-based).
    pub bit_position: u8,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl SetChoice {
    /// Creates a new set choice.
    #[must_use]
    pub fn new(name: impl Into<String>, bit_position: u8) -> Self {
        Self {
            name: name.into(),
            bit_position,
            description: None,
        }
    }

    /// Returns the bit mask for this choice, or `None` if the bit position
    /// does not fit in 64 bits.
    #[must_use]
    pub const fn mask(&self) -> Option<u64> {
        1u64.checked_shl(self.bit_position as u32)
    }
}

/// Field presence indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Field is required and must have a value.
    #[default]
    Required,
    /// Field is optional and may hold the null sentinel.
    Optional,
    /// Field has a constant value defined in the schema.
    Constant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        let mut schema = Schema::new("test").with_header_type("MessageHeader");
        schema.add_type(EncodedType::Type(PrimitiveDef::new(
            "Price",
            PrimitiveType::Int64,
        )));
        schema.add_type(EncodedType::Composite(
            CompositeDef::new("Decimal")
                .with_member("mantissa", "int64")
                .with_member("exponent", "int8"),
        ));
        schema.add_type(EncodedType::Enum(
            EnumDef::new("Side", PrimitiveType::Uint8)
                .with_value("Buy", "1")
                .with_value("Sell", "2"),
        ));
        schema
    }

    #[test]
    fn test_primitive_type_size() {
        assert_eq!(PrimitiveType::Char.size(), 1);
        assert_eq!(PrimitiveType::Int64.size(), 8);
        assert_eq!(PrimitiveType::Float.size(), 4);
    }

    #[test]
    fn test_primitive_type_from_sbe_name() {
        for prim in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_sbe_name(prim.sbe_name()), Some(prim));
        }
        assert_eq!(PrimitiveType::from_sbe_name("int128"), None);
    }

    #[test]
    fn test_primitive_type_classes() {
        assert!(PrimitiveType::Int32.is_signed());
        assert!(!PrimitiveType::Int32.is_unsigned());
        assert!(PrimitiveType::Uint16.is_unsigned());
        assert!(PrimitiveType::Double.is_float());
        assert!(!PrimitiveType::Char.is_signed());
    }

    #[test]
    fn test_primitive_def_encoded_length() {
        let scalar = PrimitiveDef::new("price", PrimitiveType::Int64);
        assert_eq!(scalar.encoded_length(), 8);
        assert!(!scalar.is_array());

        let mut array = PrimitiveDef::new("symbol", PrimitiveType::Char);
        array.length = Some(8);
        assert_eq!(array.encoded_length(), 8);
        assert!(array.is_array());
    }

    #[test]
    fn test_resolve_declared_and_primitive() {
        let schema = sample_schema();

        let side = schema.resolve_type("Side", "order").expect("declared");
        assert!(side.has_artifact());

        let price = schema.resolve_type("Price", "order").expect("alias");
        assert!(!price.has_artifact());
        assert_eq!(price.primitive(), Some(PrimitiveType::Int64));

        let inline = schema.resolve_type("uint32", "order").expect("builtin");
        assert_eq!(inline, TypeRef::Primitive(PrimitiveType::Uint32));
        assert!(!inline.has_artifact());
    }

    #[test]
    fn test_resolve_unknown_type() {
        let schema = sample_schema();
        let err = schema
            .resolve_type("Missing", "order")
            .expect_err("unknown");
        assert!(err.to_string().contains("Missing"));
        assert!(err.to_string().contains("order"));
    }

    #[test]
    fn test_composite_encoded_length() {
        let schema = sample_schema();
        let decimal = schema.get_type("Decimal").expect("declared");
        assert_eq!(decimal.encoded_length(&schema), 9);
    }

    #[test]
    fn test_encoded_type_token() {
        let schema = sample_schema();
        let tokens: Vec<_> = schema.types.iter().map(EncodedType::token).collect();
        assert_eq!(tokens, ["type", "composite", "enum"]);
    }

    #[test]
    fn test_set_choice_mask() {
        assert_eq!(SetChoice::new("Flag1", 0).mask(), Some(1));
        assert_eq!(SetChoice::new("Flag8", 7).mask(), Some(128));
        assert_eq!(SetChoice::new("Top", 63).mask(), Some(1 << 63));
        assert_eq!(SetChoice::new("Past", 64).mask(), None);
        assert_eq!(SetChoice::new("Far", 255).mask(), None);
    }

    #[test]
    fn test_has_type() {
        let schema = sample_schema();
        assert!(schema.has_type("Side"));
        assert!(schema.has_type("Price"));
        assert!(!schema.has_type("uint32"));
        assert!(!schema.has_type("messageHeader"));
    }

    #[test]
    fn test_deserialize_tagged_types() {
        let json = r#"{
            "package": "test",
            "headerType": "MessageHeader",
            "types": [
                {"token": "type", "name": "Qty", "primitiveType": "uint32"},
                {"token": "composite", "name": "Point", "containedTypes": [
                    {"name": "x", "type": "int32"},
                    {"name": "y", "type": "int32"}
                ]},
                {"token": "set", "name": "Flags", "encodingType": "uint8", "choices": [
                    {"name": "Active", "bitPosition": 0}
                ]}
            ]
        }"#;

        let schema: Schema = serde_json::from_str(json).expect("valid schema");
        assert_eq!(schema.header_type, "MessageHeader");
        assert_eq!(schema.types.len(), 3);
        assert!(matches!(schema.types[0], EncodedType::Type(_)));
        match &schema.types[1] {
            EncodedType::Composite(c) => assert_eq!(c.contained_types[1].type_name, "int32"),
            other => panic!("expected composite, got {other:?}"),
        }
        assert!(schema.messages.is_empty());
    }
}
