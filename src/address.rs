//! Query-string side of the URL synchronizer.
//!
//! Two one-directional reactions form the bidirectional link between store
//! and address bar. This module owns the pure halves: parsing a query
//! string into candidate state values and serializing state back into a
//! query string. The session wires them up with a write-if-different guard
//! on each side, which collapses the would-be two-node cycle into a fixed
//! point — neither reaction ever fires against the other in the same tick.
//!
//! Query strings are handled without the leading `?`. Replacement is
//! always in place; nothing here ever creates a history entry.

use url::form_urlencoded;

use crate::store::{SearchState, SearchStore};
use crate::types::SortKey;

/// The fixed set of recognized query parameters. Anything else present in
/// the address is preserved verbatim by both sync directions.
pub const RECOGNIZED_KEYS: [&str; 6] = ["city", "type", "min", "max", "sort", "q"];

/// Candidate state values parsed from a query string. Absent or blank
/// keys parse to their "no constraint" value, so applying the fields
/// makes the mirrored part of the state an exact image of the address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFields {
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub sort: SortKey,
    pub query_text: String,
}

/// Parse the recognized parameters out of a query string. Repeated keys
/// keep the last occurrence; unparsable numeric values are ignored rather
/// than surfaced as errors.
#[must_use]
pub fn parse_query(query: &str) -> QueryFields {
    let mut fields = QueryFields::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.into_owned();
        if value.trim().is_empty() {
            continue;
        }
        match key.as_ref() {
            "city" => fields.city = Some(value),
            "type" => fields.property_type = Some(value),
            "min" => fields.price_min = value.trim().parse().ok().or(fields.price_min),
            "max" => fields.price_max = value.trim().parse().ok().or(fields.price_max),
            "sort" => fields.sort = SortKey::from_param(&value),
            "q" => fields.query_text = value,
            _ => {}
        }
    }
    fields
}

/// Address → State. Writes each mirrored field only when the parsed value
/// differs from what the store already holds; returns whether anything
/// changed. Non-mirrored filters (bedrooms, amenities) are untouched.
pub fn apply_fields(store: &mut SearchStore, fields: &QueryFields) -> bool {
    let mut next = store.state().filters.clone();
    next.city = fields.city.clone();
    next.property_type = fields.property_type.clone();
    next.price_min = fields.price_min;
    next.price_max = fields.price_max;

    let mut changed = store.set_filters(next);
    changed |= store.set_sort(fields.sort);
    changed |= store.set_query_text(fields.query_text.clone());
    changed
}

/// State → Address. Serializes the mirrored fields over the current query
/// string: unrecognized pairs are kept first, in their original order,
/// then the recognized keys in a fixed order, each omitted entirely when
/// its value is empty or blank. `bounds`, `active_id` and the listing sets
/// are never written.
#[must_use]
pub fn merge_query(current: &str, state: &SearchState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in form_urlencoded::parse(current.as_bytes()) {
        if !RECOGNIZED_KEYS.contains(&key.as_ref()) {
            serializer.append_pair(&key, &value);
        }
    }

    let filters = &state.filters;
    if let Some(city) = nonblank(filters.city.as_deref()) {
        serializer.append_pair("city", city);
    }
    if let Some(property_type) = nonblank(filters.property_type.as_deref()) {
        serializer.append_pair("type", property_type);
    }
    if let Some(min) = filters.price_min {
        serializer.append_pair("min", &format_amount(min));
    }
    if let Some(max) = filters.price_max {
        serializer.append_pair("max", &format_amount(max));
    }
    if let Some(sort) = state.sort_key.as_param() {
        serializer.append_pair("sort", sort);
    }
    if let Some(query_text) = nonblank(Some(&state.query_text)) {
        serializer.append_pair("q", query_text);
    }

    serializer.finish()
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Render a price bound the way it is typed: integral values without the
/// trailing `.0` so a parsed `min=100` serializes back as `100`.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
