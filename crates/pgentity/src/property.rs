//! Property metadata: the declarative description an entity is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement kinds a property may take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Select,
        Operation::Insert,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Boolean,
    String,
    Number,
    Integer,
    Float,
    Even,
    Odd,
    Positive,
    Negative,
    PowerOfTwo,
    Ascii,
    Array,
    Jwt,
    Symbol,
    Password,
    Email,
    Regex,
    Json,
    IpAddress,
    Slug,
    Hexadecimal,
    Date,
    Timestamp,
    Function,
    HtmlElement,
    HtmlEventAttribute,
    Node,
    Object,
    Geometry,
}

/// The filter-compatibility class of a [`PropertyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappedType {
    String,
    Number,
    Date,
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MappedType::String => "string",
            MappedType::Number => "number",
            MappedType::Date => "date",
        })
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => f.write_str(&s),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl PropertyType {
    pub fn mapped_type(self) -> MappedType {
        use PropertyType::*;
        match self {
            Integer | Float | Even | Odd | Positive | Negative | PowerOfTwo | Ascii => {
                MappedType::Number
            }
            Date | Timestamp => MappedType::Date,
            Boolean | String | Number | Array | Jwt | Symbol | Password | Email | Regex | Json
            | IpAddress | Slug | Hexadecimal | Function | HtmlElement | HtmlEventAttribute
            | Node | Object | Geometry => MappedType::String,
        }
    }
}

fn default_filterable() -> bool {
    true
}

fn default_operations() -> Vec<Operation> {
    Operation::ALL.to_vec()
}

/// One property of an entity.
///
/// ```
/// use pgentity::{Operation, Property, PropertyType};
///
/// let p = Property::new("password", PropertyType::Password)
///     .filterable(false)
///     .operations([Operation::Insert, Operation::Update]);
/// assert!(!p.allows(Operation::Select));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub key: String,
    #[serde(rename = "type")]
    pub declared_type: PropertyType,
    #[serde(default = "default_filterable")]
    pub filterable: bool,
    #[serde(default = "default_operations")]
    pub operations: Vec<Operation>,
}

impl Property {
    /// A filterable property taking part in every operation.
    pub fn new(key: impl Into<String>, declared_type: PropertyType) -> Self {
        Self {
            key: key.into(),
            declared_type,
            filterable: true,
            operations: default_operations(),
        }
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Replace the operation set. Duplicates are ignored.
    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        let mut ops: Vec<Operation> = ops.into_iter().collect();
        ops.sort();
        ops.dedup();
        self.operations = ops;
        self
    }

    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    pub fn mapped_type(&self) -> MappedType {
        self.declared_type.mapped_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_types() {
        assert_eq!(PropertyType::Integer.mapped_type(), MappedType::Number);
        assert_eq!(PropertyType::Ascii.mapped_type(), MappedType::Number);
        assert_eq!(PropertyType::Timestamp.mapped_type(), MappedType::Date);
        assert_eq!(PropertyType::Email.mapped_type(), MappedType::String);
        // "number" itself is a string for filtering purposes.
        assert_eq!(PropertyType::Number.mapped_type(), MappedType::String);
    }

    #[test]
    fn deserialize_with_defaults() {
        let p: Property = serde_json::from_str(r#"{"key": "maxLevel", "type": "powerOfTwo"}"#).unwrap();
        assert_eq!(p.declared_type, PropertyType::PowerOfTwo);
        assert!(p.filterable);
        assert_eq!(p.operations, Operation::ALL.to_vec());
    }

    #[test]
    fn deserialize_operations() {
        let p: Property = serde_json::from_str(
            r#"{"key": "name", "type": "string", "filterable": false, "operations": ["SELECT"]}"#,
        )
        .unwrap();
        assert!(!p.filterable);
        assert!(p.allows(Operation::Select));
        assert!(!p.allows(Operation::Insert));
    }
}
