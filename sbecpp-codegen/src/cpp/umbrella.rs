//! Umbrella header body.

use sbecpp_schema::Schema;

/// Generates the body of the umbrella header. The includes themselves are
/// written by the shared prologue.
pub struct UmbrellaGenerator<'a> {
    schema: &'a Schema,
}

impl<'a> UmbrellaGenerator<'a> {
    /// Creates a new umbrella generator.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Generates a summary of the messages pulled in by the umbrella.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("// Package: {}\n", self.schema.package));
        for message in &self.schema.messages {
            output.push_str(&format!(
                "// Message {} (template id {})\n",
                message.name, message.id
            ));
        }
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbecpp_schema::Message;

    #[test]
    fn test_umbrella_lists_messages() {
        let mut schema = Schema::new("shapes");
        schema.add_message(Message::new("Shape", 1));
        schema.add_message(Message::new("Erase", 2));

        let body = UmbrellaGenerator::new(&schema).generate();
        assert_eq!(
            body,
            "// Package: shapes\n// Message Shape (template id 1)\n// Message Erase (template id 2)\n\n"
        );
    }
}
