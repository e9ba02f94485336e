//! Message flyweight generation, including repeating groups and var data.

use super::INDENT;
use super::accessors::{AccessorWriter, member_primitive};
use crate::error::CodegenError;
use crate::render::Helpers;
use sbecpp_schema::{EncodedType, Field, GroupField, Message, Schema, TypeRef};

/// Header length assumed when the schema does not declare its header type.
pub const DEFAULT_HEADER_LENGTH: usize = 8;

/// Class being filled with accessors.
struct Scope {
    class: String,
    path: String,
    indent: String,
    in_group: bool,
}

impl Scope {
    fn cursor(&self) -> &'static str {
        if self.in_group { "*position_" } else { "position_" }
    }

    fn cursor_ptr(&self) -> &'static str {
        if self.in_group { "position_" } else { "&position_" }
    }
}

/// Generates the flyweight class for a message.
pub struct MessageGenerator<'a> {
    schema: &'a Schema,
    helpers: &'a Helpers<'a>,
}

impl<'a> MessageGenerator<'a> {
    /// Creates a new message generator.
    #[must_use]
    pub fn new(schema: &'a Schema, helpers: &'a Helpers<'a>) -> Self {
        Self { schema, helpers }
    }

    /// Generates the message class.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] for unresolved field types and
    /// [`CodegenError::Render`] for unusable group or data encodings.
    pub fn generate(&self, message: &Message) -> Result<String, CodegenError> {
        let class = self.helpers.class_name(&message.name);
        let artifact = self.helpers.artifact_name(&message.name);
        let scope = Scope {
            class: class.clone(),
            path: message.name.clone(),
            indent: INDENT.to_string(),
            in_group: false,
        };

        let mut nested = String::new();
        let mut members = String::new();
        let block_length =
            self.fields(&mut nested, &mut members, &scope, &message.fields, &artifact)?;

        let header = self.schema.get_type(&self.schema.header_type);
        let header_length =
            header.map_or(DEFAULT_HEADER_LENGTH, |t| t.encoded_length(self.schema));

        let mut output = String::new();
        if let Some(desc) = &message.description {
            output.push_str(&format!("/// {desc}\n"));
        }
        output.push_str(&format!("class {class}\n{{\npublic:\n"));
        output.push_str(&format!(
            "{INDENT}static constexpr std::uint16_t kTemplateId = {};\n",
            message.id
        ));
        output.push_str(&format!(
            "{INDENT}static constexpr std::size_t kBlockLength = {block_length};\n"
        ));
        output.push_str(&format!(
            "{INDENT}static constexpr std::size_t kHeaderLength = {header_length};\n\n"
        ));
        output.push_str(&nested);

        output.push_str(&format!(
            "{INDENT}{class}(char* buffer, std::size_t offset)\n"
        ));
        output.push_str(&format!("{INDENT}    : buffer_(buffer)\n"));
        output.push_str(&format!("{INDENT}    , offset_(offset + kHeaderLength)\n"));
        output.push_str(&format!(
            "{INDENT}    , position_(offset + kHeaderLength + kBlockLength)\n"
        ));
        output.push_str(&format!("{INDENT}{{\n{INDENT}}}\n\n"));

        if let Some(EncodedType::Composite(c)) = header {
            let header_class = self.helpers.class_name(&c.name);
            output.push_str(&format!(
                "{INDENT}{header_class} header() const {{ return {header_class}(buffer_, offset_ - kHeaderLength); }}\n"
            ));
        }
        output.push_str(&format!("{INDENT}char* buffer() const {{ return buffer_; }}\n"));
        output.push_str(&format!(
            "{INDENT}std::size_t encodedLength() const {{ return position_ - offset_ + kHeaderLength; }}\n\n"
        ));

        output.push_str(&members);
        output.push_str("private:\n");
        output.push_str(&format!("{INDENT}char* buffer_;\n"));
        output.push_str(&format!("{INDENT}std::size_t offset_;\n"));
        output.push_str(&format!("{INDENT}std::size_t position_;\n"));
        output.push_str("};\n\n");

        Ok(output)
    }

    /// Emits accessors for `fields` and returns the fixed block length.
    fn fields(
        &self,
        nested: &mut String,
        members: &mut String,
        scope: &Scope,
        fields: &[Field],
        artifact: &str,
    ) -> Result<usize, CodegenError> {
        let writer = AccessorWriter::new(self.schema, self.helpers, scope.class.as_str())
            .indent(scope.indent.as_str())
            .position(scope.cursor());

        let mut offset = 0;
        for field in fields {
            match field {
                Field::Scalar(f) => {
                    offset += writer.field(
                        members,
                        &f.name,
                        &f.type_name,
                        offset,
                        f.presence,
                        &format!("{}.{}", scope.path, f.name),
                    )?;
                }
                Field::Group(g) => {
                    let group_class = self.group(nested, g, scope, artifact)?;
                    let i = &scope.indent;
                    let getter = self.helpers.getter(&g.name);
                    let ptr = scope.cursor_ptr();
                    members.push_str(&format!("{i}// group: {} (id={})\n", g.name, g.id));
                    members.push_str(&format!(
                        "{i}{group_class} {getter}() {{ return {group_class}(buffer_, {ptr}); }}\n"
                    ));
                    members.push_str(&format!(
                        "{i}{group_class} {getter}(std::size_t count) {{ return {group_class}(buffer_, {ptr}, count); }}\n\n"
                    ));
                }
                Field::Data(d) => writer.data(members, d, artifact)?,
            }
        }
        Ok(offset)
    }

    /// Emits the nested class for a group and returns its name.
    fn group(
        &self,
        output: &mut String,
        group: &GroupField,
        parent: &Scope,
        artifact: &str,
    ) -> Result<String, CodegenError> {
        let path = format!("{}.{}", parent.path, group.name);
        let dimension = match self.schema.resolve_type(&group.dimension_type, &path)? {
            TypeRef::Declared(EncodedType::Composite(c)) => c,
            _ => {
                return Err(CodegenError::render(
                    artifact,
                    format!(
                        "group '{path}' needs a composite dimension type, got '{}'",
                        group.dimension_type
                    ),
                ));
            }
        };
        let count_type = member_primitive(self.schema, dimension, "numInGroup").ok_or_else(|| {
            CodegenError::render(
                artifact,
                format!(
                    "dimension type '{}' has no primitive numInGroup member",
                    dimension.name
                ),
            )
        })?;
        let block_type = member_primitive(self.schema, dimension, "blockLength");

        let scope = Scope {
            class: format!("{}Group", self.helpers.class_name(&group.name)),
            path,
            indent: format!("{}{INDENT}", parent.indent),
            in_group: true,
        };
        let mut nested = String::new();
        let mut members = String::new();
        let block_length = self.fields(&mut nested, &mut members, &scope, &group.fields, artifact)?;

        let o = &parent.indent;
        let i = &scope.indent;
        let class = &scope.class;
        let dim = self.helpers.class_name(&dimension.name);
        let count = self.helpers.count(&group.name);

        output.push_str(&format!("{o}class {class}\n{o}{{\n{o}public:\n"));
        output.push_str(&format!(
            "{i}static constexpr std::size_t kBlockLength = {block_length};\n\n"
        ));
        output.push_str(&nested);

        output.push_str(&format!("{i}{class}(char* buffer, std::size_t* position)\n"));
        output.push_str(&format!("{i}    : buffer_(buffer), position_(position)\n{i}{{\n"));
        output.push_str(&format!("{i}    {dim} dimensions(buffer_, *position_);\n"));
        output.push_str(&format!("{i}    count_ = dimensions.numInGroup();\n"));
        output.push_str(&format!("{i}    *position_ += {dim}::kEncodedLength;\n{i}}}\n\n"));

        output.push_str(&format!(
            "{i}{class}(char* buffer, std::size_t* position, std::size_t count)\n"
        ));
        output.push_str(&format!(
            "{i}    : buffer_(buffer), position_(position), count_(count)\n{i}{{\n"
        ));
        output.push_str(&format!("{i}    {dim} dimensions(buffer_, *position_);\n"));
        if let Some(block_type) = block_type {
            output.push_str(&format!(
                "{i}    dimensions.blockLength(static_cast<{}>(kBlockLength));\n",
                self.helpers.primitive(block_type)
            ));
        }
        output.push_str(&format!(
            "{i}    dimensions.numInGroup(static_cast<{}>(count));\n",
            self.helpers.primitive(count_type)
        ));
        output.push_str(&format!("{i}    *position_ += {dim}::kEncodedLength;\n{i}}}\n\n"));

        output.push_str(&format!(
            "{i}std::size_t {count}() const {{ return count_; }}\n"
        ));
        output.push_str(&format!(
            "{i}bool hasNext() const {{ return index_ < count_; }}\n\n"
        ));
        output.push_str(&format!("{i}{class}& next()\n{i}{{\n"));
        output.push_str(&format!("{i}    offset_ = *position_;\n"));
        output.push_str(&format!("{i}    *position_ += kBlockLength;\n"));
        output.push_str(&format!("{i}    ++index_;\n"));
        output.push_str(&format!("{i}    return *this;\n{i}}}\n\n"));

        output.push_str(&members);
        output.push_str(&format!("{o}private:\n"));
        output.push_str(&format!("{i}char* buffer_;\n"));
        output.push_str(&format!("{i}std::size_t* position_;\n"));
        output.push_str(&format!("{i}std::size_t offset_ = 0;\n"));
        output.push_str(&format!("{i}std::size_t count_ = 0;\n"));
        output.push_str(&format!("{i}std::size_t index_ = 0;\n"));
        output.push_str(&format!("{o}}};\n\n"));

        Ok(scope.class)
    }
}
