//! Match modes and the SQL comparators they compile to.

use crate::property::MappedType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a filter value is compared with a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    StartsWith,
    EndsWith,
    Contains,
    NotContains,
    Equals,
    NotEquals,
    Between,
    In,
    Lt,
    Lte,
    Gt,
    Gte,
    Is,
    IsNot,
    Before,
    After,
    #[serde(rename = "st_contains")]
    StContains,
    #[serde(rename = "st_dwithin")]
    StDwithin,
}

/// SQL comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
    /// `IN`
    In,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "<>",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Is => "IS",
            Comparator::IsNot => "IS NOT",
            Comparator::In => "IN",
            Comparator::Like => "LIKE",
            Comparator::NotLike => "NOT LIKE",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MatchMode {
    /// The comparator for this mode, or `None` for modes that have no scalar
    /// SQL form (`between` and the spatial modes).
    pub fn comparator(self) -> Option<Comparator> {
        use MatchMode::*;
        match self {
            StartsWith | EndsWith | Contains => Some(Comparator::Like),
            NotContains => Some(Comparator::NotLike),
            Equals => Some(Comparator::Eq),
            NotEquals => Some(Comparator::Ne),
            In => Some(Comparator::In),
            Lt | Before => Some(Comparator::Lt),
            Lte => Some(Comparator::Lte),
            Gt | After => Some(Comparator::Gt),
            Gte => Some(Comparator::Gte),
            Is => Some(Comparator::Is),
            IsNot => Some(Comparator::IsNot),
            Between | StContains | StDwithin => None,
        }
    }

    /// Render the placeholder side of a condition for the given ordinals.
    ///
    /// Several ordinals are joined with `,` (no space).
    ///
    /// ```
    /// use pgentity::MatchMode;
    ///
    /// assert_eq!(MatchMode::StartsWith.placeholder_pattern(&[1]), "$1%");
    /// assert_eq!(MatchMode::In.placeholder_pattern(&[2, 3, 4]), "($2,$3,$4)");
    /// ```
    pub fn placeholder_pattern(self, ordinals: &[usize]) -> String {
        let joined = ordinals
            .iter()
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(",");
        use MatchMode::*;
        match self {
            StartsWith => format!("{joined}%"),
            EndsWith => format!("%{joined}"),
            Contains | NotContains => format!("%{joined}%"),
            In => format!("({joined})"),
            NotEquals | Equals | Between | Lt | Lte | Gt | Gte | Is | IsNot | Before | After
            | StContains | StDwithin => joined,
        }
    }

    /// Whether this mode may filter a property of the given mapped type.
    pub fn allowed_for(self, ty: MappedType) -> bool {
        use MatchMode::*;
        match ty {
            MappedType::String => matches!(
                self,
                StartsWith
                    | EndsWith
                    | Contains
                    | NotContains
                    | Equals
                    | NotEquals
                    | Lt
                    | Lte
                    | Gt
                    | Gte
            ),
            MappedType::Number => matches!(self, Equals | NotEquals | Lt | Lte | Gt | Gte),
            MappedType::Date => matches!(self, Is | IsNot | Before | After),
        }
    }

    /// Parse the wire name of a match mode (`startsWith`, `st_dwithin`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(s.to_string())).ok()
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => f.write_str(&s),
            _ => write!(f, "{self:?}"),
        }
    }
}
