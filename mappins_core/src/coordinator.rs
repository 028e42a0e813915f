//! Turns input events into catalog changes and render commands, so that the
//! map, the list and the charts always show the same state.

pub mod event;
pub mod surface;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::data::{CategorySelector, DraftError, FormInput, PinDraft, PinId};
use crate::export;
use crate::sync::{PersistenceError, PinCatalog, PinStore};
use crate::view::{filter_pins, group_by_month, PinStats};

pub use event::InputEvent;
pub use surface::{FilterChip, ListSection, PinCard, RenderCommand, Surfaces};

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Unable to serialize the export: {0}")]
    Export(#[from] serde_json::Error),
}

/// Where a new pin will go once its form is submitted.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct PendingLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Owns the catalog and the selector state (active category and search
/// query), and decides what each surface must redraw after every event.
pub struct ViewCoordinator<S: PinStore> {
    catalog: PinCatalog<S>,
    config: Config,
    active_category: CategorySelector,
    search_query: String,
    /// Set by a map click, cleared once the pin is added or the form is
    /// cancelled.
    pending_location: Option<PendingLocation>,
    dashboard_open: bool,
    /// Whether the map has been given its starting view yet.
    map_positioned: bool,
    /// Supplies the date stamped on exports.
    today: Box<dyn Fn() -> NaiveDate>,
}

impl<S: PinStore> ViewCoordinator<S> {
    pub fn new(catalog: PinCatalog<S>, config: Config) -> Self {
        Self {
            catalog,
            config,
            active_category: CategorySelector::All,
            search_query: String::new(),
            pending_location: None,
            dashboard_open: false,
            map_positioned: false,
            today: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Replaces the clock used to date exports.
    #[must_use]
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Handles one event and returns what the surfaces should do about it,
    /// in order.
    ///
    /// Only a submitted pin can fail: the form may be invalid, or the store
    /// may refuse the write. In both cases the catalog, the pending location
    /// and every view are left as they were.
    pub async fn handle(
        &mut self,
        event: InputEvent,
    ) -> Result<Vec<RenderCommand>, CoordinatorError> {
        debug!(?event, "handling event");
        let commands = match event {
            InputEvent::LoadRequested => {
                self.catalog.load().await;
                let mut commands = Vec::new();
                if !self.map_positioned {
                    commands.push(self.initial_view());
                    self.map_positioned = true;
                }
                commands.extend(self.refresh_all(false));
                commands
            }
            InputEvent::MapClicked { lat, lon } => {
                self.pending_location = Some(PendingLocation { lat, lon });
                vec![RenderCommand::SetPendingMarker { lat, lon }, RenderCommand::OpenForm]
            }
            InputEvent::PinSubmitted(form) => self.submit(form).await?,
            InputEvent::SubmissionCancelled => {
                self.pending_location = None;
                vec![RenderCommand::ClearPendingMarker, RenderCommand::CloseForm]
            }
            InputEvent::CategorySelected(selector) => {
                self.active_category = selector;
                let mut commands = vec![self.chips()];
                commands.extend(self.refresh_visible(false));
                commands
            }
            InputEvent::SearchChanged(query) => {
                self.search_query = query;
                self.refresh_visible(false)
            }
            InputEvent::PinSelected(id) => self.focus(&id),
            InputEvent::DashboardOpened => {
                self.dashboard_open = true;
                Vec::from(RenderCommand::charts(PinStats::compute(self.catalog.all())))
            }
            InputEvent::DashboardClosed => {
                self.dashboard_open = false;
                vec![RenderCommand::CloseDashboard]
            }
            InputEvent::ExportRequested => vec![self.export()?],
        };
        Ok(commands)
    }

    async fn submit(&mut self, form: FormInput) -> Result<Vec<RenderCommand>, CoordinatorError> {
        let Some(PendingLocation { lat, lon }) = self.pending_location else {
            warn!("pin submitted without a location, ignoring");
            return Ok(Vec::new());
        };
        let draft = PinDraft::from_form(form, lat, lon)?;
        let pin = self.catalog.add(draft).await?;
        info!(id = %pin.id, "pin added, refreshing views");

        self.pending_location = None;
        let mut commands = vec![RenderCommand::ClearPendingMarker, RenderCommand::CloseForm];
        // a new pin must show up on the map even if the sidebar filter hides
        // it, so the map gets the whole catalog
        commands.extend(self.refresh_all(true));
        Ok(commands)
    }

    /// Everything that depends on the catalog contents.
    fn refresh_all(&self, whole_map: bool) -> Vec<RenderCommand> {
        let mut commands = vec![self.chips()];
        commands.extend(self.refresh_visible(whole_map));

        let stats = PinStats::compute(self.catalog.all());
        if self.dashboard_open {
            commands.extend(RenderCommand::charts(stats.clone()));
        }
        commands.push(RenderCommand::stats(stats));
        commands
    }

    /// The map and the list, both showing the filtered pins unless
    /// `whole_map` asks for the map to show the unfiltered catalog.
    fn refresh_visible(&self, whole_map: bool) -> Vec<RenderCommand> {
        let visible = filter_pins(self.catalog.all(), &self.active_category, &self.search_query);
        debug!(visible = visible.len(), total = self.catalog.len(), "recomputed visible pins");

        let map_pins = if whole_map {
            self.catalog.all().to_vec()
        } else {
            visible.iter().map(|&pin| pin.clone()).collect()
        };
        let map = RenderCommand::RenderPins(map_pins);
        let sections = group_by_month(visible).into_iter().map(ListSection::from).collect();
        vec![map, RenderCommand::RenderGroups(sections)]
    }

    /// The configured starting view. Later loads keep wherever the user has
    /// moved the map.
    fn initial_view(&self) -> RenderCommand {
        let (lat, lon) = self.config.map_center;
        RenderCommand::SetMapView { lat, lon, zoom: self.config.map_zoom }
    }

    fn chips(&self) -> RenderCommand {
        RenderCommand::RenderChips(FilterChip::row(
            &self.catalog.categories(),
            &self.active_category,
        ))
    }

    fn focus(&self, id: &PinId) -> Vec<RenderCommand> {
        match self.catalog.get(id) {
            Some(pin) => vec![RenderCommand::FocusPin {
                lat: pin.data.lat,
                lon: pin.data.lon,
                zoom: self.config.focus_zoom,
            }],
            None => {
                warn!(%id, "selected pin is not in the catalog");
                Vec::new()
            }
        }
    }

    fn export(&self) -> Result<RenderCommand, CoordinatorError> {
        let contents = export::export_snapshot(self.catalog.all())?;
        let file_name = export::export_file_name(&self.config.export_prefix, (self.today)());
        info!(%file_name, pins = self.catalog.len(), "exporting catalog");
        Ok(RenderCommand::OfferDownload { file_name, contents })
    }

    pub fn catalog(&self) -> &PinCatalog<S> {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn active_category(&self) -> &CategorySelector {
        &self.active_category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn pending_location(&self) -> Option<PendingLocation> {
        self.pending_location
    }

    pub fn dashboard_open(&self) -> bool {
        self.dashboard_open
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::{Pin, PinRecord};
    use crate::sync::{MemoryStore, StoreError};

    fn record(id: &str, name: &str, kind: &str, date: &str, lat: f64, lon: f64) -> PinRecord {
        PinRecord {
            id: PinId(id.to_owned()),
            name: name.to_owned(),
            kind: kind.to_owned(),
            date: date.to_owned(),
            description: String::new(),
            lat,
            lon,
        }
    }

    fn paris() -> MemoryStore {
        MemoryStore::with_records(vec![
            record("louvre", "Louvre", "tourist-site", "2024-01-10", 48.86, 2.33),
            record("chat", "Le Chat Noir", "bar", "2024-03-02", 48.86, 2.35),
        ])
    }

    fn form(name: &str, kind: &str, date: &str) -> FormInput {
        FormInput {
            name: name.to_owned(),
            kind: kind.to_owned(),
            date: date.to_owned(),
            description: String::new(),
        }
    }

    async fn loaded(store: MemoryStore) -> ViewCoordinator<MemoryStore> {
        let mut coordinator = ViewCoordinator::new(PinCatalog::new(store), Config::default())
            .with_clock(|| NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        coordinator
    }

    fn map_names(commands: &[RenderCommand]) -> Vec<Vec<String>> {
        commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::RenderPins(pins) => {
                    Some(pins.iter().map(|pin| pin.name().to_owned()).collect::<Vec<_>>())
                }
                _ => None,
            })
            .collect()
    }

    fn list_names(commands: &[RenderCommand]) -> Vec<Vec<(String, Vec<String>)>> {
        commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::RenderGroups(sections) => Some(
                    sections
                        .iter()
                        .map(|section| {
                            let names: Vec<String> =
                                section.pins.iter().map(|card| card.name.clone()).collect();
                            (section.label.clone(), names)
                        })
                        .collect::<Vec<_>>(),
                ),
                _ => None,
            })
            .collect()
    }

    fn has_charts(commands: &[RenderCommand]) -> bool {
        commands.iter().any(|command| matches!(command, RenderCommand::RenderTimelineChart(_)))
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|&name| name.to_owned()).collect()
    }

    #[tokio::test]
    async fn load_renders_every_surface_from_the_catalog() {
        let mut coordinator = ViewCoordinator::new(PinCatalog::new(paris()), Config::default());
        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();

        assert_eq!(map_names(&commands), vec![strings(&["Le Chat Noir", "Louvre"])]);
        assert_eq!(
            list_names(&commands),
            vec![vec![
                ("Mars 2024".to_owned(), strings(&["Le Chat Noir"])),
                ("Janvier 2024".to_owned(), strings(&["Louvre"])),
            ]]
        );
        assert!(commands.contains(&RenderCommand::RenderStats {
            category_counts: BTreeMap::from([("bar".to_owned(), 1), ("tourist-site".to_owned(), 1)]),
            dominant_category: Some("bar".to_owned()),
            total: 2,
        }));
        assert!(!has_charts(&commands));
    }

    #[tokio::test]
    async fn first_load_positions_the_map_from_config() {
        let config = Config::default().with_map_center(45.76, 4.84);
        let mut coordinator = ViewCoordinator::new(PinCatalog::new(paris()), config);

        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        assert_eq!(commands[0], RenderCommand::SetMapView { lat: 45.76, lon: 4.84, zoom: 13 });

        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        let repositions =
            commands.iter().filter(|command| matches!(command, RenderCommand::SetMapView { .. }));
        assert_eq!(repositions.count(), 0);
    }

    #[tokio::test]
    async fn failed_load_renders_zero_state() {
        let store = paris();
        store.fail_with(Some(StoreError::Unavailable));
        let mut coordinator = ViewCoordinator::new(PinCatalog::new(store), Config::default());

        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        assert_eq!(map_names(&commands), vec![Vec::<String>::new()]);
        assert_eq!(list_names(&commands), vec![Vec::new()]);
        assert!(commands.contains(&RenderCommand::RenderStats {
            category_counts: BTreeMap::new(),
            dominant_category: None,
            total: 0,
        }));
    }

    #[tokio::test]
    async fn category_and_search_drive_map_and_list_together() {
        let mut coordinator = loaded(paris()).await;

        let commands = coordinator
            .handle(InputEvent::CategorySelected(CategorySelector::parse("bar")))
            .await
            .unwrap();
        assert_eq!(map_names(&commands), vec![strings(&["Le Chat Noir"])]);
        assert_eq!(
            list_names(&commands),
            vec![vec![("Mars 2024".to_owned(), strings(&["Le Chat Noir"]))]]
        );
        let chips = commands.iter().find_map(|command| match command {
            RenderCommand::RenderChips(chips) => Some(chips),
            _ => None,
        });
        assert_eq!(
            chips.map(|chips| chips.iter().filter(|chip| chip.active).count()),
            Some(1)
        );

        let commands =
            coordinator.handle(InputEvent::SearchChanged("LOUVRE".to_owned())).await.unwrap();
        assert_eq!(map_names(&commands), vec![Vec::<String>::new()]);

        coordinator.handle(InputEvent::CategorySelected(CategorySelector::All)).await.unwrap();
        let commands =
            coordinator.handle(InputEvent::SearchChanged("chat".to_owned())).await.unwrap();
        assert_eq!(map_names(&commands), vec![strings(&["Le Chat Noir"])]);
        assert_eq!(coordinator.search_query(), "chat");
    }

    #[tokio::test]
    async fn adding_a_pin_shows_it_on_the_map_but_keeps_the_list_filter() {
        let mut coordinator = loaded(paris()).await;
        coordinator
            .handle(InputEvent::CategorySelected(CategorySelector::parse("bar")))
            .await
            .unwrap();

        let commands =
            coordinator.handle(InputEvent::MapClicked { lat: 48.8584, lon: 2.2945 }).await.unwrap();
        assert_eq!(
            commands,
            vec![
                RenderCommand::SetPendingMarker { lat: 48.8584, lon: 2.2945 },
                RenderCommand::OpenForm
            ]
        );

        let commands = coordinator
            .handle(InputEvent::PinSubmitted(form("Tour Eiffel", "tourist-site", "2024-03-04")))
            .await
            .unwrap();

        assert_eq!(commands[0], RenderCommand::ClearPendingMarker);
        assert_eq!(commands[1], RenderCommand::CloseForm);
        assert_eq!(
            map_names(&commands),
            vec![strings(&["Le Chat Noir", "Louvre", "Tour Eiffel"])]
        );
        assert_eq!(
            list_names(&commands),
            vec![vec![("Mars 2024".to_owned(), strings(&["Le Chat Noir"]))]]
        );
        assert_eq!(coordinator.pending_location(), None);
        assert_eq!(coordinator.active_category(), &CategorySelector::parse("bar"));

        let added: Vec<&Pin> = coordinator
            .catalog()
            .all()
            .iter()
            .filter(|pin| pin.name() == "Tour Eiffel")
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!((added[0].data.lat, added[0].data.lon), (48.8584, 2.2945));
    }

    #[tokio::test]
    async fn submitting_without_a_location_does_nothing() {
        let store = paris();
        let mut coordinator = loaded(store.clone()).await;

        let commands = coordinator
            .handle(InputEvent::PinSubmitted(form("Nowhere", "bar", "2024-03-04")))
            .await
            .unwrap();
        assert!(commands.is_empty());
        assert_eq!(store.records().len(), 2);
    }

    #[tokio::test]
    async fn failed_add_keeps_everything_as_it_was() {
        let store = paris();
        let mut coordinator = loaded(store.clone()).await;
        coordinator.handle(InputEvent::MapClicked { lat: 1.0, lon: 2.0 }).await.unwrap();

        store.fail_with(Some(StoreError::Unavailable));
        let result = coordinator
            .handle(InputEvent::PinSubmitted(form("Tour Eiffel", "tourist-site", "2024-03-04")))
            .await;
        assert!(matches!(
            result,
            Err(CoordinatorError::Persistence(PersistenceError(StoreError::Unavailable)))
        ));
        assert_eq!(coordinator.catalog().len(), 2);
        assert_eq!(coordinator.pending_location(), Some(PendingLocation { lat: 1.0, lon: 2.0 }));

        // the user can retry once the store is back
        store.fail_with(None);
        coordinator
            .handle(InputEvent::PinSubmitted(form("Tour Eiffel", "tourist-site", "2024-03-04")))
            .await
            .unwrap();
        assert_eq!(coordinator.catalog().len(), 3);
    }

    #[tokio::test]
    async fn invalid_form_is_reported_and_nothing_is_stored() {
        let store = paris();
        let mut coordinator = loaded(store.clone()).await;
        coordinator.handle(InputEvent::MapClicked { lat: 1.0, lon: 2.0 }).await.unwrap();

        let result =
            coordinator.handle(InputEvent::PinSubmitted(form("", "bar", "2024-03-04"))).await;
        assert!(matches!(result, Err(CoordinatorError::Draft(DraftError::EmptyName))));
        assert_eq!(store.records().len(), 2);
        assert!(coordinator.pending_location().is_some());
    }

    #[tokio::test]
    async fn cancelling_clears_the_pending_location() {
        let mut coordinator = loaded(paris()).await;
        coordinator.handle(InputEvent::MapClicked { lat: 1.0, lon: 2.0 }).await.unwrap();
        let commands = coordinator.handle(InputEvent::SubmissionCancelled).await.unwrap();
        assert_eq!(commands, vec![RenderCommand::ClearPendingMarker, RenderCommand::CloseForm]);
        assert_eq!(coordinator.pending_location(), None);
    }

    #[tokio::test]
    async fn dashboard_uses_the_unfiltered_catalog() {
        let mut coordinator = loaded(paris()).await;
        coordinator
            .handle(InputEvent::CategorySelected(CategorySelector::parse("bar")))
            .await
            .unwrap();

        let commands = coordinator.handle(InputEvent::DashboardOpened).await.unwrap();
        assert_eq!(
            commands,
            vec![
                RenderCommand::RenderCategoryChart(BTreeMap::from([
                    ("bar".to_owned(), 1),
                    ("tourist-site".to_owned(), 1)
                ])),
                RenderCommand::RenderTimelineChart(BTreeMap::from([
                    ("2024-01".to_owned(), 1),
                    ("2024-03".to_owned(), 1)
                ])),
                RenderCommand::RenderWeekdayChart([0, 0, 0, 1, 0, 0, 1]),
            ]
        );

        // while open, a new pin refreshes the charts too
        coordinator.handle(InputEvent::MapClicked { lat: 1.0, lon: 2.0 }).await.unwrap();
        let commands = coordinator
            .handle(InputEvent::PinSubmitted(form("Bistro", "restaurant", "2024-03-04")))
            .await
            .unwrap();
        assert!(has_charts(&commands));

        let commands = coordinator.handle(InputEvent::DashboardClosed).await.unwrap();
        assert_eq!(commands, vec![RenderCommand::CloseDashboard]);
        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        assert!(!has_charts(&commands));
    }

    #[tokio::test]
    async fn selecting_a_pin_focuses_the_map() {
        let mut coordinator = loaded(paris()).await;
        let commands =
            coordinator.handle(InputEvent::PinSelected(PinId("louvre".to_owned()))).await.unwrap();
        assert_eq!(commands, vec![RenderCommand::FocusPin { lat: 48.86, lon: 2.33, zoom: 16 }]);

        let commands =
            coordinator.handle(InputEvent::PinSelected(PinId("gone".to_owned()))).await.unwrap();
        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn export_offers_a_dated_snapshot() {
        let mut coordinator = loaded(paris()).await;
        let commands = coordinator.handle(InputEvent::ExportRequested).await.unwrap();
        let [RenderCommand::OfferDownload { file_name, contents }] = &commands[..] else {
            panic!("expected a single download, got {commands:?}");
        };
        assert_eq!(file_name, "mappins_backup_2024-03-05.json");

        let records: Vec<PinRecord> = serde_json::from_str(contents).unwrap();
        let ids: Vec<&str> = records.iter().map(|record| record.id.0.as_str()).collect();
        assert_eq!(ids, vec!["chat", "louvre"]);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surfaces for Recorder {
        fn set_map_view(&mut self, lat: f64, lon: f64, zoom: u8) {
            self.calls.push(format!("view {lat} {lon} {zoom}"));
        }
        fn render_pins(&mut self, pins: &[Pin]) {
            self.calls.push(format!("map {}", pins.len()));
        }
        fn set_pending_marker(&mut self, lat: f64, lon: f64) {
            self.calls.push(format!("pending {lat} {lon}"));
        }
        fn clear_pending_marker(&mut self) {
            self.calls.push("clear pending".to_owned());
        }
        fn focus_pin(&mut self, lat: f64, lon: f64, zoom: u8) {
            self.calls.push(format!("focus {lat} {lon} {zoom}"));
        }
        fn open_form(&mut self) {
            self.calls.push("open form".to_owned());
        }
        fn close_form(&mut self) {
            self.calls.push("close form".to_owned());
        }
        fn render_chips(&mut self, chips: &[FilterChip]) {
            self.calls.push(format!("chips {}", chips.len()));
        }
        fn render_groups(&mut self, sections: &[ListSection]) {
            self.calls.push(format!("list {}", sections.len()));
        }
        fn render_stats(
            &mut self,
            _category_counts: &BTreeMap<String, usize>,
            dominant_category: Option<&str>,
            total: usize,
        ) {
            self.calls.push(format!("stats {} {}", total, dominant_category.unwrap_or("-")));
        }
        fn render_category_chart(&mut self, counts: &BTreeMap<String, usize>) {
            self.calls.push(format!("categories {}", counts.len()));
        }
        fn render_timeline_chart(&mut self, counts: &BTreeMap<String, usize>) {
            self.calls.push(format!("timeline {}", counts.len()));
        }
        fn render_weekday_chart(&mut self, counts: &[usize; 7]) {
            self.calls.push(format!("weekdays {}", counts.iter().sum::<usize>()));
        }
        fn close_dashboard(&mut self) {
            self.calls.push("close dashboard".to_owned());
        }
        fn offer_download(&mut self, file_name: &str, _contents: &str) {
            self.calls.push(format!("download {file_name}"));
        }
    }

    #[tokio::test]
    async fn commands_reach_the_surfaces_in_order() {
        let mut coordinator = ViewCoordinator::new(PinCatalog::new(paris()), Config::default());
        let mut surfaces = Recorder::default();

        let commands = coordinator.handle(InputEvent::LoadRequested).await.unwrap();
        RenderCommand::apply_all(&commands, &mut surfaces);
        let commands = coordinator.handle(InputEvent::DashboardOpened).await.unwrap();
        RenderCommand::apply_all(&commands, &mut surfaces);

        assert_eq!(
            surfaces.calls,
            vec![
                "view 48.8566 2.3522 13",
                "chips 3",
                "map 2",
                "list 2",
                "stats 2 bar",
                "categories 2",
                "timeline 2",
                "weekdays 2",
            ]
        );
    }
}
