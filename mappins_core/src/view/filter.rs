use crate::data::{CategorySelector, Pin};

/// Returns the pins that pass both the category selector and the search
/// query, in input order.
///
/// The query is matched case-insensitively as a substring of either the
/// name or the description. An empty query keeps everything.
pub fn filter_pins<'a, I>(pins: I, selector: &CategorySelector, query: &str) -> Vec<&'a Pin>
where
    I: IntoIterator<Item = &'a Pin>,
{
    let query = normalize_query(query);
    pins.into_iter()
        .filter(|pin| selector.matches(pin.kind()))
        .filter(|pin| matches_query(pin, &query))
        .collect()
}

pub fn filter_by_category<'a, I>(pins: I, selector: &CategorySelector) -> Vec<&'a Pin>
where
    I: IntoIterator<Item = &'a Pin>,
{
    pins.into_iter().filter(|pin| selector.matches(pin.kind())).collect()
}

pub fn filter_by_query<'a, I>(pins: I, query: &str) -> Vec<&'a Pin>
where
    I: IntoIterator<Item = &'a Pin>,
{
    let query = normalize_query(query);
    pins.into_iter().filter(|pin| matches_query(pin, &query)).collect()
}

fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

// `query` must already be lowercased
fn matches_query(pin: &Pin, query: &str) -> bool {
    query.is_empty()
        || pin.name().to_lowercase().contains(query)
        || pin.description().to_lowercase().contains(query)
}
