//! Built-in C++ renderer.
//!
//! Produces self-contained C++17 flyweight headers: every composite, message
//! and group wraps a caller-owned `char*` buffer and reads or writes fields
//! in place with `std::memcpy`.

pub mod accessors;
pub mod composites;
pub mod enums;
pub mod messages;
pub mod umbrella;

pub use composites::CompositeGenerator;
pub use enums::{EnumGenerator, SetGenerator};
pub use messages::MessageGenerator;
pub use umbrella::UmbrellaGenerator;

use crate::error::CodegenError;
use crate::render::{Bindings, Helpers, Renderer, Subject, TemplateCategory};
use sbecpp_schema::EncodedType;

/// Indentation unit of generated code.
pub(crate) const INDENT: &str = "    ";

/// Renders C++ headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppRenderer;

impl CppRenderer {
    /// Creates a new C++ renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Renderer for CppRenderer {
    fn render(
        &self,
        category: TemplateCategory,
        bindings: &Bindings<'_>,
        helpers: &Helpers<'_>,
    ) -> Result<String, CodegenError> {
        let body = match (category, bindings.subject) {
            (TemplateCategory::Composite, Subject::Type(EncodedType::Composite(c))) => {
                CompositeGenerator::new(bindings.schema, helpers).generate(c)?
            }
            (TemplateCategory::Enum, Subject::Type(EncodedType::Enum(e))) => {
                EnumGenerator::new(helpers).generate(e)
            }
            (TemplateCategory::Set, Subject::Type(EncodedType::Set(s))) => {
                SetGenerator::new(helpers).generate(s)?
            }
            (TemplateCategory::Message, Subject::Message(m)) => {
                MessageGenerator::new(bindings.schema, helpers).generate(m)?
            }
            (TemplateCategory::Schema, Subject::Schema) => {
                UmbrellaGenerator::new(bindings.schema).generate()
            }
            (category, _) => {
                return Err(CodegenError::render(
                    bindings.artifact,
                    format!("bindings do not match the {category} template"),
                ));
            }
        };

        let mut output = prologue(bindings, helpers);
        output.push_str(&body);
        output.push_str(&epilogue(bindings, helpers));
        Ok(output)
    }
}

/// Header preamble: guard, standard includes, sibling includes, namespace.
fn prologue(bindings: &Bindings<'_>, helpers: &Helpers<'_>) -> String {
    let mut output = String::new();
    let guard = helpers.include_guard(bindings.artifact);
    let umbrella = matches!(bindings.subject, Subject::Schema);

    output.push_str("// Generated by sbecpp. Do not edit.\n");
    output.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));

    if !umbrella {
        output.push_str("#include <cstddef>\n");
        output.push_str("#include <cstdint>\n");
        output.push_str("#include <cstring>\n");
        output.push_str("#include <limits>\n\n");
    }

    for include in bindings.includes {
        output.push_str(&format!("#include \"{include}\"\n"));
    }
    if !bindings.includes.is_empty() {
        output.push('\n');
    }

    if !umbrella {
        output.push_str(&format!("namespace {} {{\n\n", namespace(&bindings.schema.package)));
    }
    output
}

fn epilogue(bindings: &Bindings<'_>, helpers: &Helpers<'_>) -> String {
    let mut output = String::new();
    if !matches!(bindings.subject, Subject::Schema) {
        output.push_str(&format!(
            "}} // namespace {}\n\n",
            namespace(&bindings.schema.package)
        ));
    }
    output.push_str(&format!(
        "#endif // {}\n",
        helpers.include_guard(bindings.artifact)
    ));
    output
}

/// C++ namespace for a schema package (`com.acme` -> `com::acme`).
pub(crate) fn namespace(package: &str) -> String {
    package.replace(['.', '-'], "::")
}
