use std::collections::BTreeMap;

use crate::data::{category::chip_label, time, Category, CategorySelector, Pin, PinId};
use crate::view::{MonthGroup, PinStats};

/// The presentation side: a map, a list/sidebar and the dashboard charts.
/// Implementations only draw what they are given and never hand state back
/// to the core.
pub trait Surfaces {
    /// Centers the map on a location at the given zoom level.
    fn set_map_view(&mut self, lat: f64, lon: f64, zoom: u8);
    fn render_pins(&mut self, pins: &[Pin]);
    fn set_pending_marker(&mut self, lat: f64, lon: f64);
    fn clear_pending_marker(&mut self);
    /// Moves the map view onto a location.
    fn focus_pin(&mut self, lat: f64, lon: f64, zoom: u8);

    fn open_form(&mut self);
    fn close_form(&mut self);

    fn render_chips(&mut self, chips: &[FilterChip]);
    fn render_groups(&mut self, sections: &[ListSection]);
    fn render_stats(
        &mut self,
        category_counts: &BTreeMap<String, usize>,
        dominant_category: Option<&str>,
        total: usize,
    );

    fn render_category_chart(&mut self, category_counts: &BTreeMap<String, usize>);
    fn render_timeline_chart(&mut self, monthly_counts: &BTreeMap<String, usize>);
    fn render_weekday_chart(&mut self, weekday_counts: &[usize; 7]);
    fn close_dashboard(&mut self);

    fn offer_download(&mut self, file_name: &str, contents: &str);
}

/// One instruction for a surface, produced by the coordinator.
#[derive(Debug, PartialEq, Clone)]
pub enum RenderCommand {
    SetMapView { lat: f64, lon: f64, zoom: u8 },
    RenderPins(Vec<Pin>),
    SetPendingMarker { lat: f64, lon: f64 },
    ClearPendingMarker,
    FocusPin { lat: f64, lon: f64, zoom: u8 },
    OpenForm,
    CloseForm,
    RenderChips(Vec<FilterChip>),
    RenderGroups(Vec<ListSection>),
    RenderStats {
        category_counts: BTreeMap<String, usize>,
        dominant_category: Option<String>,
        total: usize,
    },
    RenderCategoryChart(BTreeMap<String, usize>),
    RenderTimelineChart(BTreeMap<String, usize>),
    RenderWeekdayChart([usize; 7]),
    CloseDashboard,
    OfferDownload { file_name: String, contents: String },
}

/// A button in the sidebar's category filter row.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FilterChip {
    pub selector: CategorySelector,
    pub label: String,
    pub active: bool,
}

/// One month heading in the list, with its pins.
#[derive(Debug, PartialEq, Clone)]
pub struct ListSection {
    pub label: String,
    pub pins: Vec<PinCard>,
}

/// What a list entry shows for a pin.
#[derive(Debug, PartialEq, Clone)]
pub struct PinCard {
    pub id: PinId,
    pub name: String,
    pub kind: String,
    pub color: &'static str,
    /// E.g. `2 mars`.
    pub date_label: String,
}

impl RenderCommand {
    /// Forwards this command to the matching surface method.
    pub fn apply(&self, surfaces: &mut impl Surfaces) {
        match self {
            &RenderCommand::SetMapView { lat, lon, zoom } => surfaces.set_map_view(lat, lon, zoom),
            RenderCommand::RenderPins(pins) => surfaces.render_pins(pins),
            &RenderCommand::SetPendingMarker { lat, lon } => surfaces.set_pending_marker(lat, lon),
            RenderCommand::ClearPendingMarker => surfaces.clear_pending_marker(),
            &RenderCommand::FocusPin { lat, lon, zoom } => surfaces.focus_pin(lat, lon, zoom),
            RenderCommand::OpenForm => surfaces.open_form(),
            RenderCommand::CloseForm => surfaces.close_form(),
            RenderCommand::RenderChips(chips) => surfaces.render_chips(chips),
            RenderCommand::RenderGroups(sections) => surfaces.render_groups(sections),
            RenderCommand::RenderStats { category_counts, dominant_category, total } => {
                surfaces.render_stats(category_counts, dominant_category.as_deref(), *total)
            }
            RenderCommand::RenderCategoryChart(counts) => surfaces.render_category_chart(counts),
            RenderCommand::RenderTimelineChart(counts) => surfaces.render_timeline_chart(counts),
            RenderCommand::RenderWeekdayChart(counts) => surfaces.render_weekday_chart(counts),
            RenderCommand::CloseDashboard => surfaces.close_dashboard(),
            RenderCommand::OfferDownload { file_name, contents } => {
                surfaces.offer_download(file_name, contents)
            }
        }
    }

    /// Applies every command in order.
    pub fn apply_all<'a>(
        commands: impl IntoIterator<Item = &'a RenderCommand>,
        surfaces: &mut impl Surfaces,
    ) {
        for command in commands {
            command.apply(surfaces);
        }
    }

    pub(crate) fn stats(stats: PinStats) -> Self {
        let PinStats { total, category_counts, dominant_category, .. } = stats;
        RenderCommand::RenderStats { category_counts, dominant_category, total }
    }

    /// The three dashboard charts.
    pub(crate) fn charts(stats: PinStats) -> [Self; 3] {
        let PinStats { category_counts, monthly_counts, weekday_counts, .. } = stats;
        [
            RenderCommand::RenderCategoryChart(category_counts),
            RenderCommand::RenderTimelineChart(monthly_counts),
            RenderCommand::RenderWeekdayChart(weekday_counts),
        ]
    }
}

impl FilterChip {
    /// The chip row: "all" first, then each tag present, in order.
    pub fn row(tags: &[String], active: &CategorySelector) -> Vec<FilterChip> {
        std::iter::once(CategorySelector::All)
            .chain(tags.iter().map(|tag| CategorySelector::Only(tag.clone())))
            .map(|selector| FilterChip {
                label: selector.label(),
                active: &selector == active,
                selector,
            })
            .collect()
    }
}

impl From<MonthGroup<'_>> for ListSection {
    fn from(group: MonthGroup<'_>) -> Self {
        ListSection { label: group.label, pins: group.pins.into_iter().map(PinCard::from).collect() }
    }
}

impl From<&Pin> for PinCard {
    fn from(pin: &Pin) -> Self {
        PinCard {
            id: pin.id.clone(),
            name: pin.name().to_owned(),
            kind: chip_label(pin.kind()),
            color: Category::from_tag(pin.kind()).color(),
            date_label: time::card_date_label(pin.date()),
        }
    }
}
