//! Identifier quoting.
//!
//! Property names are camelCase and occasionally collide with keywords, so an
//! identifier is double-quoted when it contains an ASCII uppercase letter or
//! is a reserved word. Everything else is emitted bare.
//!
//! # Example
//! ```
//! use pgentity::quote_ident;
//!
//! assert_eq!(quote_ident("name"), "name");
//! assert_eq!(quote_ident("maxLevel"), r#""maxLevel""#);
//! assert_eq!(quote_ident("default"), r#""default""#);
//! ```

/// Reserved key words of PostgreSQL that cannot be used as bare column or
/// table names. Sorted for binary search.
pub const RESERVED: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "authorization",
    "between",
    "binary",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "column",
    "constraint",
    "create",
    "cross",
    "current_catalog",
    "current_date",
    "current_role",
    "current_schema",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "fetch",
    "for",
    "foreign",
    "from",
    "full",
    "grant",
    "group",
    "having",
    "ilike",
    "in",
    "initially",
    "inner",
    "intersect",
    "into",
    "is",
    "isnull",
    "join",
    "lateral",
    "leading",
    "left",
    "like",
    "limit",
    "localtime",
    "localtimestamp",
    "natural",
    "not",
    "notnull",
    "null",
    "offset",
    "on",
    "only",
    "or",
    "order",
    "outer",
    "overlaps",
    "placing",
    "primary",
    "references",
    "returning",
    "right",
    "select",
    "session_user",
    "similar",
    "some",
    "symmetric",
    "table",
    "tablesample",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "variadic",
    "verbose",
    "when",
    "where",
    "window",
    "with",
];

/// Whether `name` is a reserved word (case-insensitive).
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RESERVED.binary_search(&lower.as_str()).is_ok()
}

/// Whether `name` must be quoted to survive Postgres case folding.
pub fn needs_quotes(name: &str) -> bool {
    name.bytes().any(|b| b.is_ascii_uppercase()) || is_reserved(name)
}

/// Return `name` unchanged, or double-quoted with embedded `"` doubled.
///
/// Call this once per identifier; quoting an already quoted name quotes it
/// again.
pub fn quote_ident(name: &str) -> String {
    if !needs_quotes(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_list_is_sorted() {
        assert!(RESERVED.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lowercase_passes_through() {
        assert_eq!(quote_ident("name"), "name");
        assert_eq!(quote_ident("archived_at"), "archived_at");
    }

    #[test]
    fn camel_case_is_quoted() {
        assert_eq!(quote_ident("maxLevel"), r#""maxLevel""#);
        assert_eq!(quote_ident("consumerId"), r#""consumerId""#);
    }

    #[test]
    fn reserved_words_are_quoted() {
        assert_eq!(quote_ident("default"), r#""default""#);
        assert_eq!(quote_ident("order"), r#""order""#);
        assert_eq!(quote_ident("USER"), r#""USER""#);
        assert!(is_reserved("Select"));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(quote_ident(r#"Say"hi"#), r#""Say""hi""#);
    }

    #[test]
    fn non_reserved_keywords_stay_bare() {
        assert_eq!(quote_ident("name"), "name");
        assert_eq!(quote_ident("level"), "level");
        assert!(!is_reserved("id"));
    }
}
