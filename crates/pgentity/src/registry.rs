//! Per-operation column registries.

use crate::builder::{ColumnBuilder, Consumer, InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::property::{Operation, Property};

/// The select, insert and update builders of an entity, populated once from
/// its property list.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    pub select: SelectBuilder,
    pub insert: InsertBuilder,
    pub update: UpdateBuilder,
}

impl ColumnRegistry {
    pub fn from_properties(properties: &[Property]) -> Self {
        let mut registry = Self::default();
        for p in properties {
            for op in &p.operations {
                match op {
                    Operation::Select => registry.select.add_column(&p.key),
                    Operation::Insert => registry.insert.add_column(&p.key),
                    Operation::Update => registry.update.add_column(&p.key),
                    // Deletes address rows by id only.
                    Operation::Delete => {}
                }
            }
        }
        registry
    }

    /// Column names an operation writes or reads, in registration order.
    ///
    /// Insert and update include the consumer columns they can stamp.
    pub fn columns(&self, op: Operation) -> Vec<String> {
        match op {
            Operation::Select => owned(self.select.column_keys()),
            Operation::Insert => with_consumer(owned(self.insert.column_keys())),
            Operation::Update => with_consumer(owned(self.update.column_keys())),
            Operation::Delete => Vec::new(),
        }
    }
}

fn with_consumer(mut cols: Vec<String>) -> Vec<String> {
    cols.push(Consumer::ID.to_string());
    cols.push(Consumer::NAME.to_string());
    cols
}

fn owned(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    fn props() -> Vec<Property> {
        vec![
            Property::new("id", PropertyType::Integer).operations([Operation::Select, Operation::Delete]),
            Property::new("title", PropertyType::String).operations([
                Operation::Select,
                Operation::Insert,
                Operation::Update,
            ]),
            Property::new("content", PropertyType::String)
                .operations([Operation::Insert, Operation::Update]),
        ]
    }

    #[test]
    fn registers_by_operation() {
        let reg = ColumnRegistry::from_properties(&props());
        assert_eq!(reg.columns(Operation::Select), vec!["id", "title"]);
        assert_eq!(
            reg.columns(Operation::Insert),
            vec!["title", "content", "consumerId", "consumerName"]
        );
        assert_eq!(
            reg.columns(Operation::Update),
            vec!["title", "content", "consumerId", "consumerName"]
        );
        assert!(reg.columns(Operation::Delete).is_empty());
    }
}
