use super::Filters;
use crate::ident::quote_ident;
use crate::value::Value;

/// Output of [`compile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compiled {
    /// One `<column> <comparator> <pattern>` fragment per emitted filter.
    pub conditions: Vec<String>,
    /// Arguments in ordinal order.
    pub args: Vec<Value>,
    /// First ordinal not consumed.
    pub next: usize,
}

/// Compile validated filters into conditions, numbering placeholders from
/// `start`.
///
/// Array values take one ordinal per element and are flattened into the
/// arguments. Filters without a comparator, and empty arrays, are skipped
/// without consuming an ordinal, so the placeholders stay contiguous.
pub fn compile(filters: &Filters, start: usize) -> Compiled {
    let mut out = Compiled {
        next: start,
        ..Compiled::default()
    };

    for (key, filter) in filters.iter() {
        let Some(mode) = filter.match_mode else {
            continue;
        };
        let Some(comparator) = mode.comparator() else {
            continue;
        };

        let values: Vec<&Value> = match &filter.value {
            Value::Array(items) => items.iter().collect(),
            scalar => vec![scalar],
        };
        if values.is_empty() {
            continue;
        }

        let ordinals: Vec<usize> = (out.next..out.next + values.len()).collect();
        out.next += values.len();

        out.conditions.push(format!(
            "{} {} {}",
            quote_ident(key),
            comparator,
            mode.placeholder_pattern(&ordinals)
        ));
        out.args.extend(values.into_iter().cloned());
    }

    out
}
