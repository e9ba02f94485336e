//! Enum and set generation.

use super::INDENT;
use crate::constants::Sentinel;
use crate::error::CodegenError;
use crate::render::Helpers;
use sbecpp_schema::{EnumDef, SetDef};

/// Generates a scoped enum with a null value and a `toString` helper.
pub struct EnumGenerator<'a> {
    helpers: &'a Helpers<'a>,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(helpers: &'a Helpers<'a>) -> Self {
        Self { helpers }
    }

    /// Generates the enum definition.
    #[must_use]
    pub fn generate(&self, enum_def: &EnumDef) -> String {
        let name = self.helpers.class_name(&enum_def.name);
        let encoding = self.helpers.primitive(enum_def.encoding_type);
        let null = self.helpers.sentinel(enum_def.encoding_type, Sentinel::Null);
        let mut output = String::new();

        if let Some(desc) = &enum_def.description {
            output.push_str(&format!("/// {desc}\n"));
        }
        output.push_str(&format!("enum class {name} : {encoding}\n{{\n"));
        for value in &enum_def.valid_values {
            if let Some(desc) = &value.description {
                output.push_str(&format!("{INDENT}/// {desc}\n"));
            }
            output.push_str(&format!("{INDENT}{} = {},\n", value.name, value.value));
        }
        output.push_str(&format!("{INDENT}NULL_VALUE = {null}\n}};\n\n"));

        output.push_str(&format!("inline const char* toString({name} value)\n{{\n"));
        output.push_str(&format!("{INDENT}switch (value)\n{INDENT}{{\n"));
        for value in &enum_def.valid_values {
            output.push_str(&format!(
                "{INDENT}case {name}::{0}: return \"{0}\";\n",
                value.name
            ));
        }
        output.push_str(&format!(
            "{INDENT}case {name}::NULL_VALUE: return \"NULL_VALUE\";\n"
        ));
        output.push_str(&format!("{INDENT}}}\n{INDENT}return \"UNKNOWN\";\n}}\n\n"));

        output
    }
}

/// Generates a bit set value class.
pub struct SetGenerator<'a> {
    helpers: &'a Helpers<'a>,
}

impl<'a> SetGenerator<'a> {
    /// Creates a new set generator.
    #[must_use]
    pub fn new(helpers: &'a Helpers<'a>) -> Self {
        Self { helpers }
    }

    /// Generates the set class.
    ///
    /// # Errors
    /// Returns [`CodegenError::Render`] if a choice's bit position does not
    /// fit in the set's encoding type.
    pub fn generate(&self, set_def: &SetDef) -> Result<String, CodegenError> {
        let h = self.helpers;
        let name = h.class_name(&set_def.name);
        let encoding = h.primitive(set_def.encoding_type);
        let bits = set_def.encoding_type.size() * 8;
        let mut output = String::new();

        if let Some(desc) = &set_def.description {
            output.push_str(&format!("/// {desc}\n"));
        }
        output.push_str(&format!("class {name}\n{{\npublic:\n"));
        output.push_str(&format!("{INDENT}using Encoding = {encoding};\n\n"));

        for choice in &set_def.choices {
            let mask = choice
                .mask()
                .filter(|_| usize::from(choice.bit_position) < bits)
                .ok_or_else(|| {
                    CodegenError::render(
                        h.artifact_name(&set_def.name),
                        format!(
                            "set choice '{}' bit {} does not fit in {} ({bits} bits)",
                            choice.name,
                            choice.bit_position,
                            set_def.encoding_type.sbe_name()
                        ),
                    )
                })?;
            output.push_str(&format!(
                "{INDENT}static constexpr Encoding {} = {mask:#x};\n",
                h.constant(&choice.name)
            ));
        }
        if !set_def.choices.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("{INDENT}{name}() = default;\n"));
        output.push_str(&format!(
            "{INDENT}explicit {name}(Encoding raw) : raw_(raw) {{}}\n\n"
        ));
        output.push_str(&format!("{INDENT}Encoding raw() const {{ return raw_; }}\n"));
        output.push_str(&format!(
            "{INDENT}{name}& clear()\n{INDENT}{{\n{INDENT}    raw_ = 0;\n{INDENT}    return *this;\n{INDENT}}}\n\n"
        ));

        for choice in &set_def.choices {
            let constant = h.constant(&choice.name);
            output.push_str(&format!(
                "{INDENT}bool {}() const {{ return (raw_ & {constant}) != 0; }}\n",
                h.getter(&choice.name)
            ));
            output.push_str(&format!(
                "{INDENT}{name}& {}(bool value)\n{INDENT}{{\n",
                h.setter(&choice.name)
            ));
            output.push_str(&format!(
                "{INDENT}    raw_ = static_cast<Encoding>(value ? (raw_ | {constant}) : (raw_ & ~{constant}));\n"
            ));
            output.push_str(&format!("{INDENT}    return *this;\n{INDENT}}}\n\n"));
        }

        output.push_str("private:\n");
        output.push_str(&format!("{INDENT}Encoding raw_ = 0;\n"));
        output.push_str("};\n\n");

        Ok(output)
    }
}
