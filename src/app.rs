//! Application state and the operations that drive it.
//!
//! [`App`] owns every piece of mutable state: the catalog, the user's
//! selection, favorites, the maintenance state and the pending search log.
//! Handlers call into it; nothing else mutates state.

use chrono::{Local, NaiveDate};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogSource, LoadOutcome, invalidate_cache, load_catalog};
use crate::debounce::{Clock, DEFAULT_DELAY, Debouncer, SystemClock, should_log_search};
use crate::domain::{
    CategoryFilter, Comment, CommentError, NewComment, NoteRecord, RecordId, Semester,
    SharePayload, SponsorBoard, UploadError, UploadForm,
};
use crate::favorites::{FavoriteSet, Toggle};
use crate::infra::{DownloadLink, LocalStorage, StorageError, deep_link_id, download_url, keys};
use crate::maintenance::{Availability, ControlWatcher, Transition};
use crate::render::{FilterState, Grid, GridRenderer, RenderContext, filter_records, layout};
use crate::store::{ControlSnapshot, InteractionKind, RemoteStore, StoreError};

/// Errors surfaced by [`App`] operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("ClassNotes is under maintenance")]
    Maintenance,

    #[error("no note with id '{0}'")]
    UnknownRecord(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Comment(#[from] CommentError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("failed to render: {0}")]
    Render(#[from] minijinja::Error),
}

/// What the main content area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Maintenance,
    ConnectionError(&'a str),
    Grid(Grid<'a>),
}

/// Reads the persisted semester. Missing or invalid values fall back to
/// [`Semester::DEFAULT`].
pub fn load_semester<L: LocalStorage + ?Sized>(storage: &L) -> Semester {
    match storage.get(keys::CURRENT_SEMESTER) {
        None => Semester::DEFAULT,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(value = %raw, error = %e, "invalid stored semester, using default");
            Semester::DEFAULT
        }),
    }
}

/// The whole client state.
pub struct App<S, L, C = SystemClock>
where
    S: RemoteStore,
    L: LocalStorage,
    C: Clock,
{
    store: S,
    storage: L,
    catalog: Vec<NoteRecord>,
    source: Option<CatalogSource>,
    load_error: Option<String>,
    sponsors: SponsorBoard,
    favorites: FavoriteSet,
    filter: FilterState,
    availability: Availability,
    watcher: ControlWatcher,
    search_log: Debouncer<String, C>,
    pending_deep_link: Option<RecordId>,
    detail: Option<RecordId>,
    history: Vec<RecordId>,
    today: NaiveDate,
}

impl<S, L> App<S, L, SystemClock>
where
    S: RemoteStore,
    L: LocalStorage,
{
    /// Creates the state with the wall clock and the default debounce delay.
    pub fn new(store: S, storage: L) -> Self {
        Self::with_clock(store, storage, SystemClock, DEFAULT_DELAY)
    }
}

impl<S, L, C> App<S, L, C>
where
    S: RemoteStore,
    L: LocalStorage,
    C: Clock,
{
    /// Creates the state, restoring the semester and favorites from local
    /// storage.
    pub fn with_clock(store: S, storage: L, clock: C, debounce: Duration) -> Self {
        let semester = load_semester(&storage);
        let favorites = FavoriteSet::load(&storage);
        Self {
            store,
            storage,
            catalog: Vec::new(),
            source: None,
            load_error: None,
            sponsors: SponsorBoard::default(),
            favorites,
            filter: FilterState::new(semester),
            availability: Availability::Operational,
            watcher: ControlWatcher::new(),
            search_log: Debouncer::new(clock, debounce),
            pending_deep_link: None,
            detail: None,
            history: Vec::new(),
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date used for the "new" badge and upload dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    // ===========================================
    // Bootstrap and loading
    // ===========================================

    /// Initial load: control document, sponsors and catalog, then the deep
    /// link if one was given.
    ///
    /// Sponsor failures are logged and otherwise ignored. Both loads settle
    /// before the deep link is resolved.
    pub fn bootstrap(&mut self, deep_link: Option<&str>) {
        if let Err(e) = self.poll_control() {
            warn!(error = %e, "could not read control document");
        }

        self.reload_sponsors();
        self.reload_catalog();

        if let Some(input) = deep_link {
            self.resolve_deep_link(input);
        }
    }

    pub fn reload_sponsors(&mut self) {
        match self.store.fetch_sponsors() {
            Ok(board) => self.sponsors = board,
            Err(e) => warn!(error = %e, "sponsor load failed, showing placeholders"),
        }
    }

    /// Runs the catalog load unless maintenance blocks it.
    pub fn reload_catalog(&mut self) -> Option<CatalogSource> {
        if self.availability.is_maintenance() {
            debug!("catalog load blocked by maintenance");
            return None;
        }

        match load_catalog(&self.store, &mut self.storage) {
            LoadOutcome::Loaded(loaded) => {
                self.catalog = loaded.records;
                self.source = Some(loaded.source);
                self.load_error = None;
            }
            LoadOutcome::Maintenance => {
                if self.availability.on_load_denied() == Transition::Entered {
                    self.enter_maintenance();
                }
            }
            LoadOutcome::ConnectivityError(message) => {
                self.catalog.clear();
                self.source = None;
                self.load_error = Some(message);
            }
        }
        self.source
    }

    // ===========================================
    // Maintenance
    // ===========================================

    /// Reads the control document and applies any change.
    pub fn poll_control(&mut self) -> Result<Transition, StoreError> {
        match self.watcher.poll(&self.store)? {
            Some(snapshot) => Ok(self.apply_control(snapshot)),
            None => Ok(Transition::Unchanged),
        }
    }

    /// Feeds a control snapshot to the maintenance machine and runs the
    /// entry or exit effects.
    pub fn apply_control(&mut self, snapshot: ControlSnapshot) -> Transition {
        let transition = self.availability.on_flag(snapshot.maintenance);
        match transition {
            Transition::Entered => self.enter_maintenance(),
            Transition::Left => {
                if self.catalog.is_empty() {
                    self.reload_catalog();
                    if let Some(id) = self.pending_deep_link.take() {
                        self.resolve_deep_link(id.as_str());
                    }
                }
            }
            Transition::Unchanged => {}
        }
        transition
    }

    fn enter_maintenance(&mut self) {
        self.catalog.clear();
        self.source = None;
        self.load_error = None;
        if let Some(open) = self.detail.take() {
            self.pending_deep_link.get_or_insert(open);
        }
        self.history.clear();
        self.search_log.cancel();
    }

    /// Navigation and content are hidden while in maintenance.
    pub fn chrome_visible(&self) -> bool {
        !self.availability.is_maintenance()
    }

    // ===========================================
    // Selection and the pipeline
    // ===========================================

    /// Switches semester and persists the choice.
    pub fn set_semester(&mut self, semester: Semester) -> Result<(), StorageError> {
        self.filter.semester = semester;
        self.storage
            .set(keys::CURRENT_SEMESTER, semester.to_string())
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Updates the search text and re-arms the search log.
    ///
    /// Every change cancels the pending log. Text longer than two characters
    /// schedules a new one, unless the catalog is empty.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.search_log.cancel();
        if !self.catalog.is_empty() && should_log_search(&self.filter.search) {
            self.search_log.schedule(self.filter.search.clone());
        }
    }

    /// Emits the search log if the text has settled. Returns the logged term.
    pub fn tick(&mut self) -> Option<String> {
        let term = self.search_log.poll()?;
        info!(term = %term, "search settled");
        if let Err(e) = self.store.log_search(&term) {
            warn!(error = %e, "search log failed");
        }
        Some(term)
    }

    /// Emits the pending search log now instead of waiting for the delay.
    pub fn flush_search_log(&mut self) -> Option<String> {
        let term = self.search_log.cancel()?;
        if let Err(e) = self.store.log_search(&term) {
            warn!(error = %e, "search log failed");
        }
        Some(term)
    }

    /// Time until the pending search log fires.
    pub fn search_log_due_in(&self) -> Option<Duration> {
        self.search_log.remaining()
    }

    /// Records visible under the current selection, in display order.
    pub fn visible(&self) -> Vec<&NoteRecord> {
        filter_records(&self.catalog, &self.filter, &self.favorites)
    }

    /// The current content area.
    pub fn view(&self) -> View<'_> {
        if self.availability.is_maintenance() {
            return View::Maintenance;
        }
        if let Some(message) = &self.load_error {
            return View::ConnectionError(message);
        }
        let visible = self.visible();
        View::Grid(layout(&visible, &self.sponsors, &self.filter.category))
    }

    /// Renders the content area to HTML.
    pub fn render_html(&self, renderer: &GridRenderer) -> Result<String, AppError> {
        let html = match self.view() {
            View::Maintenance => renderer.render_maintenance()?,
            View::ConnectionError(_) => renderer.render_connection_error()?,
            View::Grid(grid) => renderer.render(
                &grid,
                &RenderContext {
                    today: self.today,
                    search: &self.filter.search,
                    favorites: &self.favorites,
                },
            )?,
        };
        Ok(html)
    }

    // ===========================================
    // Favorites
    // ===========================================

    /// Toggles a favorite and persists the whole set.
    ///
    /// The in-memory set only changes once the write succeeds.
    pub fn toggle_favorite(&mut self, id: &RecordId) -> Result<Toggle, StorageError> {
        let mut next = self.favorites.clone();
        let toggle = next.toggle(id);
        next.save(&mut self.storage)?;
        self.favorites = next;
        Ok(toggle)
    }

    // ===========================================
    // Records
    // ===========================================

    pub fn record(&self, id: &RecordId) -> Option<&NoteRecord> {
        self.catalog.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: &RecordId) -> Result<usize, AppError> {
        if self.availability.is_maintenance() {
            return Err(AppError::Maintenance);
        }
        self.catalog
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::UnknownRecord(id.to_string()))
    }

    /// Opens a record's detail view from a user action.
    pub fn open_record(&mut self, id: &RecordId) -> Result<&NoteRecord, AppError> {
        let idx = self.position(id)?;
        if let Some(previous) = self.detail.replace(id.clone()) {
            self.history.push(previous);
        }
        self.log_interaction(InteractionKind::View, idx);
        Ok(&self.catalog[idx])
    }

    /// Closes the detail view, returning to the previously opened record if
    /// any.
    pub fn close_detail(&mut self) {
        self.detail = self.history.pop();
    }

    /// Resolves a deep link (`?pdf=ID`, a full URL, or a bare id).
    ///
    /// Switches to the record's semester, persists it and opens the detail
    /// view without adding a history entry. Unknown ids are ignored. While in
    /// maintenance the id is kept and resolved once the site comes back.
    pub fn resolve_deep_link(&mut self, input: &str) -> Option<&NoteRecord> {
        let raw = deep_link_id(input).unwrap_or_else(|| input.trim().to_string());
        let id: RecordId = match raw.parse() {
            Ok(id) => id,
            Err(e) => {
                debug!(input = %input, error = %e, "ignoring deep link");
                return None;
            }
        };

        if self.availability.is_maintenance() {
            self.pending_deep_link = Some(id);
            return None;
        }

        let Some(idx) = self.catalog.iter().position(|r| r.id() == &id) else {
            debug!(id = %id, "deep link names no loaded record");
            return None;
        };

        let semester = self.catalog[idx].semester();
        if let Err(e) = self.set_semester(semester) {
            warn!(error = %e, "could not persist semester");
        }
        self.detail = Some(id);
        self.log_interaction(InteractionKind::View, idx);
        info!(id = %self.catalog[idx].id(), semester = %semester, "resolved deep link");
        Some(&self.catalog[idx])
    }

    /// Logs a download and returns the link to fetch.
    pub fn download(&mut self, id: &RecordId) -> Result<Option<DownloadLink>, AppError> {
        let idx = self.position(id)?;
        self.log_interaction(InteractionKind::Download, idx);
        Ok(self.catalog[idx].file_url().map(download_url))
    }

    /// Logs a click on a sponsor slot. Nothing is logged during maintenance.
    pub fn click_sponsor(&mut self, slot: &str) {
        if self.availability.is_maintenance() {
            return;
        }
        let label = self
            .sponsors
            .resolve_grid(slot)
            .map(|ad| ad.label().to_string())
            .unwrap_or_else(|| "Ad".to_string());
        if let Err(e) = self.store.log_interaction(InteractionKind::AdClick, &label, None) {
            warn!(error = %e, "ad click log failed");
        }
    }

    fn log_interaction(&mut self, kind: InteractionKind, idx: usize) {
        let record = &self.catalog[idx];
        if let Err(e) = self
            .store
            .log_interaction(kind, record.title(), Some(record.id()))
        {
            warn!(error = %e, kind = %kind, "interaction log failed");
        }
    }

    pub fn share(&self, id: &RecordId, site_url: &str) -> Result<SharePayload, AppError> {
        let idx = self.position(id)?;
        Ok(SharePayload::for_record(&self.catalog[idx], site_url))
    }

    // ===========================================
    // Comments and uploads
    // ===========================================

    pub fn comments(&self, id: &RecordId) -> Result<Vec<Comment>, AppError> {
        Ok(self.store.fetch_comments(id)?)
    }

    /// Validates and posts a comment. Invalid input never reaches the store.
    pub fn post_comment(
        &mut self,
        id: &RecordId,
        author: Option<&str>,
        text: &str,
    ) -> Result<Comment, AppError> {
        let comment = NewComment::new(id.clone(), author, text)?;
        Ok(self.store.post_comment(comment)?)
    }

    /// Validates an upload, registers the record and refreshes the catalog.
    pub fn upload(&mut self, form: UploadForm) -> Result<NoteRecord, AppError> {
        let record = form.into_record(RecordId::generate(), self.today)?;
        self.store.add_record(&record)?;
        invalidate_cache(&mut self.storage)?;
        info!(id = %record.id(), title = %record.title(), "uploaded note");
        self.reload_catalog();
        Ok(record)
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn catalog(&self) -> &[NoteRecord] {
        &self.catalog
    }

    pub fn catalog_source(&self) -> Option<CatalogSource> {
        self.source
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn sponsors(&self) -> &SponsorBoard {
        &self.sponsors
    }

    /// The record shown in the detail view.
    pub fn detail(&self) -> Option<&NoteRecord> {
        self.detail.as_ref().and_then(|id| self.record(id))
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn storage(&self) -> &L {
        &self.storage
    }
}
