//! Data grid widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::column::Column;
use crate::config::GridConfig;
use crate::error::JoistResult;
use crate::record::GridRecord;
use crate::selection::{Selection, SelectionChange, SelectionMode};
use crate::sort::{self, SortDirective, SortIndicator, SortState};
use crate::value::RowKey;
use crate::view::{RenderRow, compose_view};

/// Observer invoked with the complete selection after every change.
pub type SelectionHandler<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Unique identifier for a DataGrid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// What the grid body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// Data is loading; the body is a placeholder.
    Loading,
    /// No records; the body is a placeholder.
    Empty,
    /// Rows are rendered and interactive.
    Ready,
}

impl GridStatus {
    /// Placeholder text shown instead of the body.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            GridStatus::Loading => Some("Loading..."),
            GridStatus::Empty => Some("No data available"),
            GridStatus::Ready => None,
        }
    }
}

/// Internal state for the DataGrid widget.
pub(super) struct GridInner<T> {
    pub config: GridConfig,
    pub columns: Vec<Column<T>>,
    pub records: Vec<T>,
    pub sort: SortState,
    pub selection: Selection<T>,
    pub on_selection_change: Option<SelectionHandler<T>>,
}

impl<T: GridRecord> GridInner<T> {
    fn new(columns: Vec<Column<T>>, records: Vec<T>, config: GridConfig) -> Self {
        let selection = Selection::new(config.selection_mode, config.row_key_field.clone());
        Self {
            config,
            columns,
            records,
            sort: SortState::new(),
            selection,
            on_selection_change: None,
        }
    }

    fn status(&self) -> GridStatus {
        if self.config.loading {
            GridStatus::Loading
        } else if self.records.is_empty() {
            GridStatus::Empty
        } else {
            GridStatus::Ready
        }
    }

    pub(super) fn accepts_interaction(&self) -> bool {
        self.status() == GridStatus::Ready
    }

    fn accepts_selection(&self) -> bool {
        self.accepts_interaction() && self.config.selectable
    }

    /// Records in current sort order.
    fn sorted(&self) -> Vec<&T> {
        sort::apply(&self.records, self.sort.directive())
    }

    /// Drop a directive no sortable column still carries.
    fn reconcile_sort(&mut self) {
        let stale = self
            .sort
            .directive()
            .is_some_and(|d| !self.columns.iter().any(|c| c.sort_key() == Some(d.key.as_str())));
        if stale {
            debug!("Clearing sort directive with no matching column");
            self.sort.clear();
        }
    }
}

/// A sortable, selectable data grid.
///
/// `DataGrid<T>` is a handle over shared state: clones refer to the same
/// grid, so an observer may hold one and read (or even change) the grid from
/// inside its callback. Each grid backs exactly one live view.
///
/// State is committed before the selection observer runs, and the internal
/// lock is released first, so the observer always sees the new state.
///
/// # Example
///
/// ```ignore
/// let grid = DataGrid::with_rows(columns, users)
///     .with_config(GridConfig::new().selectable(true).selection_mode(SelectionMode::Multiple))
///     .on_selection_change(|rows| log::info!("{} selected", rows.len()));
///
/// grid.activate(GridTarget::Header(3)); // sort by age
/// grid.on_key(GridTarget::Row(0), &KeyCombo::key(Key::Space)); // select first row
/// ```
pub struct DataGrid<T> {
    /// Unique identifier.
    id: GridId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<GridInner<T>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T: GridRecord> DataGrid<T> {
    /// Create an empty grid with column definitions.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self::with_rows(columns, Vec::new())
    }

    /// Create a grid with initial records.
    pub fn with_rows(columns: Vec<Column<T>>, records: Vec<T>) -> Self {
        Self {
            id: GridId::new(),
            inner: Arc::new(RwLock::new(GridInner::new(
                columns,
                records,
                GridConfig::default(),
            ))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a grid after validating its config.
    pub fn try_new(
        columns: Vec<Column<T>>,
        records: Vec<T>,
        config: GridConfig,
    ) -> JoistResult<Self> {
        config.validate()?;
        Ok(Self::with_rows(columns, records).with_config(config))
    }

    /// Set the configuration.
    pub fn with_config(self, config: GridConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Register the selection observer.
    pub fn on_selection_change(self, handler: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.set_on_selection_change(handler);
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, GridInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, GridInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Get the configuration.
    pub fn config(&self) -> GridConfig {
        self.read().config.clone()
    }

    /// Replace the configuration.
    ///
    /// Changing the selection mode or row-key field starts a fresh, empty
    /// selection. That reset is not reported to the observer.
    pub fn set_config(&self, config: GridConfig) {
        let mut guard = self.write();
        if guard.config.selection_mode != config.selection_mode
            || guard.config.row_key_field != config.row_key_field
        {
            debug!(
                "Grid {}: selection reset ({:?}, key '{}')",
                self.id, config.selection_mode, config.row_key_field
            );
            guard.selection = Selection::new(config.selection_mode, config.row_key_field.clone());
        }
        guard.config = config;
        self.mark_dirty();
    }

    /// Set the loading flag.
    pub fn set_loading(&self, loading: bool) {
        let mut guard = self.write();
        if guard.config.loading != loading {
            guard.config.loading = loading;
            self.mark_dirty();
        }
    }

    /// Enable or disable row selection.
    pub fn set_selectable(&self, selectable: bool) {
        let mut guard = self.write();
        if guard.config.selectable != selectable {
            guard.config.selectable = selectable;
            self.mark_dirty();
        }
    }

    /// Register the selection observer, replacing any previous one.
    pub fn set_on_selection_change(&self, handler: impl Fn(&[T]) + Send + Sync + 'static) {
        self.write().on_selection_change = Some(Arc::new(handler));
    }

    /// Check if rows carry a selection control.
    pub fn is_selectable(&self) -> bool {
        self.read().config.selectable
    }

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.read().config.selection_mode
    }

    // -------------------------------------------------------------------------
    // Columns and records
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column<T>> {
        self.read().columns.clone()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.read().columns.len()
    }

    /// Replace the column definitions.
    ///
    /// A sort directive whose key no sortable column carries any more is
    /// dropped.
    pub fn set_columns(&self, columns: Vec<Column<T>>) {
        let mut guard = self.write();
        guard.columns = columns;
        guard.reconcile_sort();
        self.mark_dirty();
    }

    /// Get the records in input order.
    pub fn records(&self) -> Vec<T> {
        self.read().records.clone()
    }

    /// Get the records in current sort order.
    pub fn sorted_records(&self) -> Vec<T> {
        self.read().sorted().into_iter().cloned().collect()
    }

    /// Replace the records.
    ///
    /// Selected identities missing from the new records are dropped, and the
    /// observer hears about it.
    pub fn set_records(&self, records: Vec<T>) {
        self.transition(|inner| {
            inner.records = records;
            inner.selection.retain_present(&inner.records)
        });
        self.mark_dirty();
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Check if there are no records.
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// What the body should show.
    pub fn status(&self) -> GridStatus {
        self.read().status()
    }

    /// Whether the grid currently accepts interaction.
    pub fn is_interactive(&self) -> bool {
        self.read().accepts_interaction()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the active sort directive.
    pub fn sort_directive(&self) -> Option<SortDirective> {
        self.read().sort.directive().cloned()
    }

    /// Sort indicator for a column.
    pub fn sort_indicator(&self, column: usize) -> SortIndicator {
        let guard = self.read();
        guard
            .columns
            .get(column)
            .map(|c| guard.sort.indicator(c))
            .unwrap_or_default()
    }

    /// Header text with its sort marker.
    pub fn header_label(&self, column: usize) -> Option<String> {
        let guard = self.read();
        let col = guard.columns.get(column)?;
        Some(format!("{}{}", col.header, guard.sort.indicator(col).marker()))
    }

    /// Request a sort on a column.
    ///
    /// Returns `true` if the directive changed. Ignored while loading or
    /// empty, and for non-sortable, computed or unknown columns.
    pub fn request_sort(&self, column: usize) -> bool {
        let changed = {
            let mut guard = self.write();
            if !guard.accepts_interaction() {
                return false;
            }
            let inner = &mut *guard;
            match inner.columns.get(column) {
                Some(col) => inner.sort.request_sort(col),
                None => false,
            }
        };
        if changed {
            debug!("Grid {}: sort {:?}", self.id, self.sort_directive());
            self.mark_dirty();
        }
        changed
    }

    /// Drop the sort directive, restoring input order.
    pub fn clear_sort(&self) -> bool {
        let cleared = self.write().sort.clear();
        if cleared {
            self.mark_dirty();
        }
        cleared
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the selected records, in selection order.
    pub fn selected(&self) -> Vec<T> {
        self.read().selection.selected()
    }

    /// Get the selected identities, in selection order.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.read().selection.selected_keys().cloned().collect()
    }

    /// Check if a record is selected.
    pub fn is_selected(&self, record: &T) -> bool {
        self.read().selection.is_selected(record)
    }

    /// Check if the row at a sorted position is selected.
    pub fn is_selected_at(&self, position: usize) -> bool {
        let guard = self.read();
        guard
            .sorted()
            .get(position)
            .is_some_and(|record| guard.selection.is_selected(record))
    }

    /// Checked state of the select-all control.
    pub fn all_selected(&self) -> bool {
        let guard = self.read();
        guard.selection.all_selected(&guard.records)
    }

    /// Toggle a record's selection.
    pub fn toggle(&self, record: &T) -> bool {
        self.transition(|inner| {
            if !inner.accepts_selection() {
                return SelectionChange::default();
            }
            inner.selection.toggle(record)
        })
    }

    /// Toggle the record at a position of the sorted view.
    pub fn toggle_at(&self, position: usize) -> bool {
        self.transition(|inner| {
            if !inner.accepts_selection() {
                return SelectionChange::default();
            }
            let Some(record) = inner.sorted().get(position).map(|r| (*r).clone()) else {
                return SelectionChange::default();
            };
            inner.selection.toggle(&record)
        })
    }

    /// Select every record of the current view (multiple mode only).
    pub fn select_all(&self) -> bool {
        self.transition(|inner| {
            if !inner.accepts_selection() {
                return SelectionChange::default();
            }
            let GridInner {
                records,
                sort: sort_state,
                selection,
                ..
            } = inner;
            selection.select_all(sort::apply(records.as_slice(), sort_state.directive()))
        })
    }

    /// Clear the selection.
    pub fn deselect_all(&self) -> bool {
        self.transition(|inner| {
            if !inner.accepts_selection() {
                return SelectionChange::default();
            }
            inner.selection.deselect_all()
        })
    }

    /// Flip the select-all control: select everything unless everything is
    /// already selected, in which case clear.
    pub fn toggle_select_all(&self) -> bool {
        if self.selection_mode() != SelectionMode::Multiple {
            return false;
        }
        if self.all_selected() {
            self.deselect_all()
        } else {
            self.select_all()
        }
    }

    /// Apply a selection transition, then notify.
    ///
    /// The write lock is released before the observer runs.
    fn transition(&self, f: impl FnOnce(&mut GridInner<T>) -> SelectionChange) -> bool {
        let (selected, handler) = {
            let mut guard = self.write();
            let change = f(&mut *guard);
            if change.is_empty() {
                return false;
            }
            debug!(
                "Grid {}: selection +{} -{}",
                self.id,
                change.added.len(),
                change.removed.len()
            );
            (guard.selection.selected(), guard.on_selection_change.clone())
        };
        self.mark_dirty();
        if let Some(handler) = handler {
            handler(&selected);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Run a closure over the composed view.
    pub fn with_view<R>(&self, f: impl FnOnce(&[RenderRow<'_, T>]) -> R) -> R {
        let guard = self.read();
        let rows = compose_view(
            &guard.records,
            &guard.columns,
            guard.sort.directive(),
            &guard.selection,
        );
        f(&rows)
    }

    /// Display text of a cell at a sorted position.
    pub fn cell_text(&self, position: usize, column: usize) -> Option<String> {
        let guard = self.read();
        let col = guard.columns.get(column)?;
        let sorted = guard.sorted();
        let record = sorted.get(position)?;
        Some(col.cell_text(record))
    }

    /// Check if the grid state has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for DataGrid<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> fmt::Debug for DataGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid").field("id", &self.id).finish_non_exhaustive()
    }
}
