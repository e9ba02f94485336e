//! Message definitions.
//!
//! A message is an ordered list of [`Field`]s. Groups carry their own nested
//! field list of the same shape, so repeating groups may nest arbitrarily.

use crate::types::Presence;
use serde::{Deserialize, Serialize};

/// Message definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message name.
    pub name: String,
    /// Message template ID.
    #[serde(default)]
    pub id: u16,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Fields, groups and data in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Message {
    /// Creates a new message definition.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u16) -> Self {
        Self {
            name: name.into(),
            id,
            description: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field, group or data entry.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Builder-style variant of [`Message::add_field`].
    #[must_use]
    pub fn with(mut self, field: impl Into<Field>) -> Self {
        self.add_field(field.into());
        self
    }

    /// Returns true if the message has any repeating groups.
    #[must_use]
    pub fn has_groups(&self) -> bool {
        self.fields.iter().any(|f| matches!(f, Field::Group(_)))
    }

    /// Returns true if the message has any variable-length data.
    #[must_use]
    pub fn has_var_data(&self) -> bool {
        self.fields.iter().any(|f| matches!(f, Field::Data(_)))
    }
}

/// Entry of a message or group body, discriminated by `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "token", rename_all = "lowercase")]
pub enum Field {
    /// Fixed-size field referencing a type.
    #[serde(rename = "field")]
    Scalar(ScalarField),
    /// Repeating group.
    Group(GroupField),
    /// Variable-length data.
    Data(DataField),
}

impl Field {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(f) => &f.name,
            Self::Group(g) => &g.name,
            Self::Data(d) => &d.name,
        }
    }

    /// Returns the `token` discriminator.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "field",
            Self::Group(_) => "group",
            Self::Data(_) => "data",
        }
    }
}

impl From<ScalarField> for Field {
    fn from(field: ScalarField) -> Self {
        Self::Scalar(field)
    }
}

impl From<GroupField> for Field {
    fn from(group: GroupField) -> Self {
        Self::Group(group)
    }
}

impl From<DataField> for Field {
    fn from(data: DataField) -> Self {
        Self::Data(data)
    }
}

/// Fixed-size field within a message or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// Field name.
    pub name: String,
    /// Field ID (tag).
    #[serde(default)]
    pub id: u16,
    /// Referenced type name (declared type or built-in primitive).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Field presence.
    #[serde(default)]
    pub presence: Presence,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ScalarField {
    /// Creates a new required field.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u16, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            type_name: type_name.into(),
            presence: Presence::Required,
            description: None,
        }
    }

    /// Marks the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Returns true if the field is optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.presence == Presence::Optional
    }
}

/// Repeating group definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupField {
    /// Group name.
    pub name: String,
    /// Group ID.
    #[serde(default)]
    pub id: u16,
    /// Dimension type (usually `groupSizeEncoding`).
    pub dimension_type: String,
    /// Fields within each entry.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl GroupField {
    /// Creates a new group definition with the conventional dimension type.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u16) -> Self {
        Self {
            name: name.into(),
            id,
            dimension_type: "groupSizeEncoding".to_string(),
            fields: Vec::new(),
            description: None,
        }
    }

    /// Sets the dimension type name.
    #[must_use]
    pub fn with_dimension_type(mut self, name: impl Into<String>) -> Self {
        self.dimension_type = name.into();
        self
    }

    /// Adds an entry field.
    #[must_use]
    pub fn with(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }
}

/// Variable-length data field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    /// Field name.
    pub name: String,
    /// Field ID.
    #[serde(default)]
    pub id: u16,
    /// Type name (e.g., `varDataEncoding`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl DataField {
    /// Creates a new data field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u16, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            type_name: type_name.into(),
            description: None,
        }
    }
}
