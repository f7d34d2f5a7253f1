use super::Filters;
use crate::property::Property;

/// Drop filters that cannot be compiled for this entity.
///
/// An entry is removed, with a warning, when its key names no property, the
/// property is not filterable, or the match mode is missing or not allowed
/// for the property's mapped type. Survivors keep their order. Nothing here
/// is an error.
pub fn clean_filters<'p, F>(mut filters: Filters, property: F) -> Filters
where
    F: Fn(&str) -> Option<&'p Property>,
{
    filters.retain(|key, filter| {
        let Some(prop) = property(key) else {
            tracing::warn!(target: "pgentity", key, "Filters: skipping unknown property");
            return false;
        };
        if !prop.filterable {
            tracing::warn!(target: "pgentity", key, "Filters: skipping unfilterable property");
            return false;
        }
        let ty = prop.mapped_type();
        match filter.match_mode {
            Some(mode) if mode.allowed_for(ty) => true,
            mode => {
                tracing::warn!(
                    target: "pgentity",
                    key,
                    match_mode = ?mode,
                    mapped_type = %ty,
                    "Filters: skipping invalid match mode"
                );
                false
            }
        }
    });
    filters
}
