//! Field accessor generation shared by composites, messages and groups.

use crate::constants::Sentinel;
use crate::error::CodegenError;
use crate::render::Helpers;
use sbecpp_schema::{
    CompositeDef, DataField, EncodedType, Presence, PrimitiveType, Schema, TypeRef,
};

/// Emits accessors into the body of one flyweight class.
///
/// `base` is the expression holding the start of the fixed block and
/// `position` the lvalue tracking the variable-length cursor.
pub struct AccessorWriter<'a> {
    schema: &'a Schema,
    helpers: &'a Helpers<'a>,
    owner: String,
    base: &'static str,
    position: &'static str,
    indent: String,
}

impl<'a> AccessorWriter<'a> {
    /// Creates a writer for members of class `owner`.
    #[must_use]
    pub fn new(schema: &'a Schema, helpers: &'a Helpers<'a>, owner: impl Into<String>) -> Self {
        Self {
            schema,
            helpers,
            owner: owner.into(),
            base: "offset_",
            position: "position_",
            indent: super::INDENT.to_string(),
        }
    }

    /// Sets the cursor lvalue (`*position_` inside groups).
    #[must_use]
    pub fn position(mut self, position: &'static str) -> Self {
        self.position = position;
        self
    }

    /// Sets the member indentation.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Emits accessors for a fixed-size member at `offset` and returns its
    /// encoded length.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] if `type_name` cannot be resolved.
    pub fn field(
        &self,
        output: &mut String,
        name: &str,
        type_name: &str,
        offset: usize,
        presence: Presence,
        referenced_by: &str,
    ) -> Result<usize, CodegenError> {
        let resolved = self.schema.resolve_type(type_name, referenced_by)?;

        let length = match resolved {
            TypeRef::Primitive(prim) => {
                self.scalar(output, name, prim, offset, presence);
                prim.size()
            }
            TypeRef::Declared(EncodedType::Type(def)) => {
                let presence = if presence == Presence::Required {
                    def.presence
                } else {
                    presence
                };
                match (&def.constant_value, presence) {
                    (Some(value), Presence::Constant) => {
                        self.constant(output, name, def.primitive_type, value);
                        0
                    }
                    _ if def.is_array() => {
                        let count = def.length.unwrap_or(1);
                        self.array(output, name, def.primitive_type, offset, count);
                        def.encoded_length()
                    }
                    _ => {
                        self.scalar(output, name, def.primitive_type, offset, presence);
                        def.primitive_type.size()
                    }
                }
            }
            TypeRef::Declared(EncodedType::Enum(e)) => {
                self.enumeration(output, name, &e.name, e.encoding_type, offset, presence);
                e.encoding_type.size()
            }
            TypeRef::Declared(EncodedType::Set(s)) => {
                self.set(output, name, &s.name, offset);
                s.encoding_type.size()
            }
            TypeRef::Declared(t @ EncodedType::Composite(c)) => {
                self.composite(output, name, &c.name, offset);
                t.encoded_length(self.schema)
            }
        };

        Ok(length)
    }

    /// Emits accessors for a variable-length data field.
    ///
    /// # Errors
    /// Returns [`CodegenError::Render`] if the data type has no primitive
    /// length prefix.
    pub fn data(&self, output: &mut String, data: &DataField, owner: &str) -> Result<(), CodegenError> {
        let prefix = length_prefix(self.schema, &data.type_name).ok_or_else(|| {
            CodegenError::render(
                owner,
                format!(
                    "data field '{}' needs a composite type with a primitive length prefix, got '{}'",
                    data.name, data.type_name
                ),
            )
        })?;
        let h = self.helpers;
        let i = &self.indent;
        let pos = self.position;
        let len_type = h.primitive(prefix);
        let length = h.length(&data.name);
        let getter = h.getter(&data.name);
        let setter = h.setter(&data.name);

        output.push_str(&format!("{i}// data: {} (id={})\n", data.name, data.id));
        output.push_str(&format!("{i}{len_type} {length}() const\n{i}{{\n"));
        output.push_str(&format!("{i}    {len_type} length;\n"));
        output.push_str(&format!(
            "{i}    std::memcpy(&length, buffer_ + {pos}, sizeof(length));\n"
        ));
        output.push_str(&format!("{i}    return length;\n{i}}}\n\n"));

        output.push_str(&format!("{i}const char* {getter}()\n{i}{{\n"));
        output.push_str(&format!("{i}    const std::size_t length = {length}();\n"));
        output.push_str(&format!(
            "{i}    const char* data = buffer_ + {pos} + sizeof({len_type});\n"
        ));
        output.push_str(&format!("{i}    {pos} += sizeof({len_type}) + length;\n"));
        output.push_str(&format!("{i}    return data;\n{i}}}\n\n"));

        output.push_str(&format!(
            "{i}{}& {setter}(const char* src, {len_type} length)\n{i}{{\n",
            self.owner
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {pos}, &length, sizeof(length));\n"
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {pos} + sizeof(length), src, length);\n"
        ));
        output.push_str(&format!("{i}    {pos} += sizeof(length) + length;\n"));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));
        Ok(())
    }

    fn scalar(
        &self,
        output: &mut String,
        name: &str,
        prim: PrimitiveType,
        offset: usize,
        presence: Presence,
    ) {
        let h = self.helpers;
        let i = &self.indent;
        let base = self.base;
        let ty = h.primitive(prim);
        let getter = h.getter(name);
        let setter = h.setter(name);

        output.push_str(&format!("{i}// field: {name} ({})\n", prim.sbe_name()));
        for (suffix, sentinel) in [
            ("NullValue", Sentinel::Null),
            ("MinValue", Sentinel::Min),
            ("MaxValue", Sentinel::Max),
        ] {
            output.push_str(&format!(
                "{i}static constexpr {ty} {getter}{suffix}() {{ return {}; }}\n",
                h.sentinel(prim, sentinel)
            ));
        }
        output.push('\n');

        output.push_str(&format!("{i}{ty} {getter}() const\n{i}{{\n"));
        output.push_str(&format!("{i}    {ty} value;\n"));
        output.push_str(&format!(
            "{i}    std::memcpy(&value, buffer_ + {base} + {offset}, sizeof(value));\n"
        ));
        output.push_str(&format!("{i}    return value;\n{i}}}\n\n"));

        output.push_str(&format!(
            "{i}{}& {setter}({ty} value)\n{i}{{\n",
            self.owner
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {base} + {offset}, &value, sizeof(value));\n"
        ));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));

        if presence == Presence::Optional {
            let check = if prim.is_float() {
                // NaN never compares equal to itself.
                format!("const {ty} value = {getter}(); return value == value;")
            } else {
                format!("return {getter}() != {getter}NullValue();")
            };
            output.push_str(&format!(
                "{i}bool {}() const {{ {check} }}\n",
                h.is_present(name)
            ));
            output.push_str(&format!(
                "{i}{}& {}() {{ return {setter}({getter}NullValue()); }}\n\n",
                self.owner,
                h.reset(name)
            ));
        }
    }

    fn array(
        &self,
        output: &mut String,
        name: &str,
        prim: PrimitiveType,
        offset: usize,
        count: usize,
    ) {
        let h = self.helpers;
        let i = &self.indent;
        let base = self.base;
        let ty = h.primitive(prim);
        let getter = h.getter(name);

        output.push_str(&format!(
            "{i}// field: {name} ({}[{count}])\n",
            prim.sbe_name()
        ));
        output.push_str(&format!(
            "{i}static constexpr std::size_t {}() {{ return {count}; }}\n\n",
            h.length(name)
        ));
        output.push_str(&format!(
            "{i}const {ty}* {getter}() const\n{i}{{\n{i}    return reinterpret_cast<const {ty}*>(buffer_ + {base} + {offset});\n{i}}}\n\n"
        ));
        output.push_str(&format!(
            "{i}{}& {}(const {ty}* src)\n{i}{{\n",
            self.owner,
            h.setter(name)
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {base} + {offset}, src, sizeof({ty}) * {count});\n"
        ));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));
    }

    fn constant(&self, output: &mut String, name: &str, prim: PrimitiveType, value: &str) {
        let h = self.helpers;
        let i = &self.indent;
        let getter = h.getter(name);

        output.push_str(&format!("{i}// constant: {name}\n"));
        if prim == PrimitiveType::Char && value.chars().count() != 1 {
            output.push_str(&format!(
                "{i}static constexpr const char* {getter}() {{ return \"{value}\"; }}\n\n"
            ));
        } else if prim == PrimitiveType::Char {
            output.push_str(&format!(
                "{i}static constexpr char {getter}() {{ return '{value}'; }}\n\n"
            ));
        } else {
            output.push_str(&format!(
                "{i}static constexpr {} {getter}() {{ return {value}; }}\n\n",
                h.primitive(prim)
            ));
        }
    }

    fn enumeration(
        &self,
        output: &mut String,
        name: &str,
        type_name: &str,
        encoding: PrimitiveType,
        offset: usize,
        presence: Presence,
    ) {
        let h = self.helpers;
        let i = &self.indent;
        let base = self.base;
        let class = h.class_name(type_name);
        let raw = h.primitive(encoding);
        let getter = h.getter(name);
        let setter = h.setter(name);

        output.push_str(&format!("{i}// field: {name} ({class})\n"));
        output.push_str(&format!("{i}{class} {getter}() const\n{i}{{\n"));
        output.push_str(&format!("{i}    {raw} raw;\n"));
        output.push_str(&format!(
            "{i}    std::memcpy(&raw, buffer_ + {base} + {offset}, sizeof(raw));\n"
        ));
        output.push_str(&format!(
            "{i}    return static_cast<{class}>(raw);\n{i}}}\n\n"
        ));

        output.push_str(&format!(
            "{i}{}& {setter}({class} value)\n{i}{{\n",
            self.owner
        ));
        output.push_str(&format!(
            "{i}    const {raw} raw = static_cast<{raw}>(value);\n"
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {base} + {offset}, &raw, sizeof(raw));\n"
        ));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));

        if presence == Presence::Optional {
            output.push_str(&format!(
                "{i}bool {}() const {{ return {getter}() != {class}::NULL_VALUE; }}\n",
                h.is_present(name)
            ));
            output.push_str(&format!(
                "{i}{}& {}() {{ return {setter}({class}::NULL_VALUE); }}\n\n",
                self.owner,
                h.reset(name)
            ));
        }
    }

    fn set(&self, output: &mut String, name: &str, type_name: &str, offset: usize) {
        let h = self.helpers;
        let i = &self.indent;
        let base = self.base;
        let class = h.class_name(type_name);
        let getter = h.getter(name);

        output.push_str(&format!("{i}// field: {name} ({class})\n"));
        output.push_str(&format!("{i}{class} {getter}() const\n{i}{{\n"));
        output.push_str(&format!("{i}    {class}::Encoding raw;\n"));
        output.push_str(&format!(
            "{i}    std::memcpy(&raw, buffer_ + {base} + {offset}, sizeof(raw));\n"
        ));
        output.push_str(&format!("{i}    return {class}(raw);\n{i}}}\n\n"));

        output.push_str(&format!(
            "{i}{}& {}({class} value)\n{i}{{\n",
            self.owner,
            h.setter(name)
        ));
        output.push_str(&format!(
            "{i}    const {class}::Encoding raw = value.raw();\n"
        ));
        output.push_str(&format!(
            "{i}    std::memcpy(buffer_ + {base} + {offset}, &raw, sizeof(raw));\n"
        ));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));
    }

    fn composite(&self, output: &mut String, name: &str, type_name: &str, offset: usize) {
        let h = self.helpers;
        let i = &self.indent;
        let class = h.class_name(type_name);

        output.push_str(&format!("{i}// field: {name} ({class})\n"));
        output.push_str(&format!(
            "{i}{class} {}() const {{ return {class}(buffer_, {} + {offset}); }}\n\n",
            h.getter(name),
            self.base
        ));
    }
}

/// Primitive type of the length prefix of a data type: the first member of
/// a declared composite. Aliases and inline primitives have no header of
/// their own to include, so they never qualify.
pub(crate) fn length_prefix(schema: &Schema, type_name: &str) -> Option<PrimitiveType> {
    match schema.get_type(type_name)? {
        EncodedType::Composite(c) => {
            let first = c.contained_types.first()?;
            schema.resolve_type(&first.type_name, &c.name).ok()?.primitive()
        }
        _ => None,
    }
}

/// Primitive type of a named composite member.
pub(crate) fn member_primitive(
    schema: &Schema,
    composite: &CompositeDef,
    member: &str,
) -> Option<PrimitiveType> {
    let member = composite.contained_types.iter().find(|m| m.name == member)?;
    schema
        .resolve_type(&member.type_name, &composite.name)
        .ok()?
        .primitive()
}
