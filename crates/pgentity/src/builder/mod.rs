//! Statement builders.
//!
//! Each entity owns one builder per operation. Columns are registered from
//! the property list at construction; afterwards a builder only reads its
//! state, so building is idempotent.
//!
//! - [`SelectBuilder`]: column list, optional window count, filter clauses.
//! - [`InsertBuilder`]: multi-row `VALUES` with contiguous placeholder blocks.
//! - [`UpdateBuilder`]: per-column `CASE WHEN id = ...` batch update.
//! - [`delete`]: delete by id set, or archived rows older than a date.

pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;

pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use traits::{Column, ColumnBuilder};
pub use update::UpdateBuilder;

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// The caller on whose behalf rows are written.
///
/// Stamped onto every inserted or updated row as `consumerId` and
/// `consumerName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    pub id: Value,
    pub name: String,
}

impl Consumer {
    pub const ID: &'static str = "consumerId";
    pub const NAME: &'static str = "consumerName";

    pub fn new(id: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
