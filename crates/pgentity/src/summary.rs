//! Entity statistics and the human-readable summary logged at construction.

use crate::property::{Operation, Property};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    pub name: String,
    pub table: String,
    pub total_properties: usize,
    /// Number of properties taking part in each operation.
    pub operation_distribution: BTreeMap<Operation, usize>,
    /// Property keys per operation, in declaration order.
    pub crud_mappings: BTreeMap<Operation, Vec<String>>,
}

impl EntityStats {
    pub fn new(name: &str, table: &str, properties: &[Property]) -> Self {
        let mut operation_distribution = BTreeMap::new();
        let mut crud_mappings: BTreeMap<Operation, Vec<String>> =
            Operation::ALL.iter().map(|op| (*op, Vec::new())).collect();
        for p in properties {
            for op in &p.operations {
                *operation_distribution.entry(*op).or_insert(0) += 1;
                crud_mappings.entry(*op).or_default().push(p.key.clone());
            }
        }
        Self {
            name: name.to_string(),
            table: table.to_string(),
            total_properties: properties.len(),
            operation_distribution,
            crud_mappings,
        }
    }
}

/// Render the summary tree.
pub fn render(stats: &EntityStats, properties: &[Property]) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "┌─ SQLEntity: \"{}\" (Table: {})",
        stats.name, stats.table
    ));
    lines.push(format!("├─ Total Properties: {}", stats.total_properties));

    lines.push("├─ Operation Distribution:".to_string());
    for (op, count) in &stats.operation_distribution {
        lines.push(format!("│  └─ {op}: {count} properties"));
    }

    lines.push("├─ Property Details:".to_string());
    let last = properties.len().saturating_sub(1);
    for (i, p) in properties.iter().enumerate() {
        let (branch, rail) = if i == last { ("└─", " ") } else { ("├─", "│") };
        let ops = p
            .operations
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("│  {branch} {}:", p.key));
        lines.push(format!("│  {rail}   ├─ Type: {}", p.declared_type));
        lines.push(format!("│  {rail}   ├─ Operations: [{ops}]"));
        lines.push(format!("│  {rail}   └─ Filterable: {}", p.filterable));
    }

    lines.push("├─ CRUD Mappings:".to_string());
    for (op, keys) in &stats.crud_mappings {
        lines.push(format!("│  ├─ {op}: [{}]", keys.join(", ")));
    }
    lines.push("└─ Entity initialization completed".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    fn posts() -> Vec<Property> {
        vec![
            Property::new("id", PropertyType::Number).operations([Operation::Select, Operation::Delete]),
            Property::new("title", PropertyType::String).operations([
                Operation::Select,
                Operation::Insert,
                Operation::Update,
            ]),
            Property::new("content", PropertyType::String)
                .operations([Operation::Insert, Operation::Update])
                .filterable(false),
        ]
    }

    #[test]
    fn stats_count_operations() {
        let stats = EntityStats::new("posts", "posts", &posts());
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.operation_distribution[&Operation::Select], 2);
        assert_eq!(stats.operation_distribution[&Operation::Delete], 1);
        assert_eq!(stats.crud_mappings[&Operation::Update], vec!["title", "content"]);
    }

    #[test]
    fn stats_serialize_with_operation_keys() {
        let stats = EntityStats::new("posts", "posts", &posts());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalProperties"], 3);
        assert_eq!(json["crudMappings"]["DELETE"], serde_json::json!(["id"]));
    }

    #[test]
    fn summary_tree() {
        let props = posts();
        let text = render(&EntityStats::new("posts", "blog_posts", &props), &props);
        assert!(text.starts_with("┌─ SQLEntity: \"posts\" (Table: blog_posts)"));
        assert!(text.contains("│  └─ SELECT: 2 properties"));
        assert!(text.contains("│  ├─ id:"));
        assert!(text.contains("│  └─ content:"));
        assert!(text.contains("├─ Operations: [SELECT, INSERT, UPDATE]"));
        assert!(text.contains("└─ Filterable: false"));
        assert!(text.contains("│  ├─ SELECT: [id, title]"));
        assert!(text.contains("│  ├─ DELETE: [id]"));
        assert!(text.ends_with("└─ Entity initialization completed"));
    }
}
