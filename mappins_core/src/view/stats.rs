use std::collections::BTreeMap;

use crate::data::{time, Pin, YearMonth};

/// Aggregate figures for the analytics dashboard.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PinStats {
    pub total: usize,
    /// Number of pins per category tag, for every tag present.
    pub category_counts: BTreeMap<String, usize>,
    /// The most common tag. `None` only when there are no pins.
    pub dominant_category: Option<String>,
    /// Number of pins per `YYYY-MM` month, in chronological order.
    pub monthly_counts: BTreeMap<String, usize>,
    /// Number of pins per day of the week, Sunday first.
    pub weekday_counts: [usize; 7],
}

impl PinStats {
    pub fn compute<'a, I>(pins: I) -> Self
    where
        I: IntoIterator<Item = &'a Pin>,
        I::IntoIter: Clone,
    {
        let pins = pins.into_iter();
        let category_counts = category_counts(pins.clone());
        PinStats {
            total: pins.clone().count(),
            dominant_category: dominant_category(&category_counts),
            monthly_counts: monthly_counts(pins.clone()),
            weekday_counts: weekday_counts(pins),
            category_counts,
        }
    }
}

pub fn category_counts<'a, I>(pins: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Pin>,
{
    let mut counts = BTreeMap::new();
    for pin in pins {
        *counts.entry(pin.kind().to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Picks the tag with the highest count. On a tie the lexicographically
/// smallest tag wins, so the answer never depends on input order.
pub fn dominant_category(counts: &BTreeMap<String, usize>) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for (tag, &count) in counts {
        // strictly greater: the earlier (smaller) tag keeps ties
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((tag, count));
        }
    }
    best.map(|(tag, _)| tag.clone())
}

pub fn monthly_counts<'a, I>(pins: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Pin>,
{
    let mut counts = BTreeMap::new();
    for pin in pins {
        *counts.entry(YearMonth::of(pin.date())).or_insert(0) += 1;
    }
    counts.into_iter().map(|(month, count)| (month.key(), count)).collect()
}

pub fn weekday_counts<'a, I>(pins: I) -> [usize; 7]
where
    I: IntoIterator<Item = &'a Pin>,
{
    let mut counts = [0; 7];
    for pin in pins {
        counts[time::weekday_index(pin.date())] += 1;
    }
    counts
}
