use crate::data::{Pin, YearMonth};

/// A run of pins from the same calendar month, as shown under one heading in
/// the list.
#[derive(Debug, PartialEq, Clone)]
pub struct MonthGroup<'a> {
    pub month: YearMonth,
    /// The heading, e.g. `Mars 2024`.
    pub label: String,
    pub pins: Vec<&'a Pin>,
}

/// Buckets pins by the month of their date.
///
/// Groups appear in the order their month is first seen in the input, and
/// pins keep their input order within a group, so feeding pins sorted most
/// recent first yields the newest month first. Every pin lands in exactly
/// one group.
pub fn group_by_month<'a, I>(pins: I) -> Vec<MonthGroup<'a>>
where
    I: IntoIterator<Item = &'a Pin>,
{
    let mut groups: Vec<MonthGroup<'a>> = Vec::new();
    for pin in pins {
        let month = YearMonth::of(pin.date());
        // there are few months compared to pins, and most input is sorted,
        // so check the newest group first
        match groups.iter_mut().rev().find(|group| group.month == month) {
            Some(group) => group.pins.push(pin),
            None => groups.push(MonthGroup { month, label: month.label(), pins: vec![pin] }),
        }
    }
    groups
}
