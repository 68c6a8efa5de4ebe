/// GridView Engine
///
/// The engine owns all derived state for one grid: the master set of
/// normalized records, the working set (master → filter → sort, kept as an
/// index mapping into the master set), the active sort and filter specs and
/// the page window. Commands mutate state synchronously and leave every
/// invariant re-established before they return; `view()` hands the renderer
/// an owned snapshot that no later command can invalidate.

use crate::error::GridError;
use crate::filter::{FilterSpec, RecordMatcher};
use crate::page::PageWindow;
use crate::record::{normalize, CellValue, RawRecord, Record};
use crate::sort::{comparator, SortSpec};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Construction-time configuration with named, defaulted fields.
///
/// # Examples
///
/// ```
/// use gridview::{GridConfig, GridEngine};
///
/// let config = GridConfig::new(vec!["name".to_string(), "age".to_string()]);
/// let engine = GridEngine::new(config).unwrap();
/// assert_eq!(engine.view().window.page_size, 5);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Ordered column-key sequence (required).
    pub columns: Vec<String>,
    /// Allowed page sizes, in display order.
    pub page_sizes: Vec<usize>,
    /// Starting page size; defaults to the first entry of `page_sizes`.
    pub initial_page_size: Option<usize>,
    /// When false, `set_sort` is inert.
    pub sortable: bool,
    /// When false, `set_filter` is inert.
    pub searchable: bool,
    /// When false, the page size is pinned to the working-set length and the
    /// page commands are inert.
    pub pagination: bool,
}

impl GridConfig {
    pub fn new(columns: Vec<String>) -> Self {
        GridConfig {
            columns,
            page_sizes: vec![5, 10, 20],
            initial_page_size: None,
            sortable: true,
            searchable: true,
            pagination: true,
        }
    }
}

/// Everything a renderer needs for one frame. Owned throughout: iterating a
/// snapshot is never invalidated by a later command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// The working-set slice `[start_index, end_index)`.
    pub rows: Vec<Record>,
    pub window: PageWindow,
    pub sort: SortSpec,
    pub filter: FilterSpec,
    /// `"No items"` or `"<start+1> - <end> of <len> items"`.
    pub results_label: String,
}

/// The data-view state machine.
pub struct GridEngine {
    columns: Vec<String>,
    page_sizes: Vec<usize>,
    sortable: bool,
    searchable: bool,
    pagination: bool,

    master: Vec<Record>,
    /// Working set as indices into `master`, filtered then sorted.
    working: Vec<usize>,
    sort: SortSpec,
    filter: FilterSpec,
    window: PageWindow,
    /// Running record-id counter; survives `clear` so ids are never reused.
    next_record_id: u64,
}

impl GridEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        if config.page_sizes.is_empty() {
            return Err(GridError::InvalidPageSize { size: 0 });
        }
        if let Some(&size) = config.page_sizes.iter().find(|&&s| s == 0) {
            return Err(GridError::InvalidPageSize { size });
        }
        let initial = config.initial_page_size.unwrap_or(config.page_sizes[0]);
        if !config.page_sizes.contains(&initial) {
            return Err(GridError::InvalidPageSize { size: initial });
        }

        Ok(GridEngine {
            columns: config.columns,
            page_sizes: config.page_sizes,
            sortable: config.sortable,
            searchable: config.searchable,
            pagination: config.pagination,
            master: Vec::new(),
            working: Vec::new(),
            sort: SortSpec::none(),
            filter: FilterSpec::empty(),
            window: PageWindow::compute(1, initial, 0),
            next_record_id: 1,
        })
    }

    // ==================== Commands ====================

    /// Replace the column sequence and the entire record set. Resets the
    /// filter, the sort and the current page.
    pub fn load(&mut self, raw_records: Vec<RawRecord>, columns: Vec<String>) {
        self.columns = columns;
        self.master = raw_records
            .into_iter()
            .map(|raw| normalize(raw, &self.columns, &mut self.next_record_id))
            .collect();
        self.filter = FilterSpec::empty();
        self.sort = SortSpec::none();
        self.rebuild_working();
        self.window.current_page = 1;
        self.recompute_window();
        debug!(
            "loaded {} records across {} columns",
            self.master.len(),
            self.columns.len()
        );
    }

    /// Load records from a JSON array of objects. Returns the number of
    /// records loaded.
    pub fn load_json(&mut self, json: &str, columns: Vec<String>) -> Result<usize, GridError> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        let count = raw.len();
        self.load(raw, columns);
        Ok(count)
    }

    /// Normalize and append records; ids continue incrementing. The current
    /// filter and sort are re-applied, and the page is kept (clamping down
    /// if it fell out of range).
    pub fn add_records(&mut self, raw_records: Vec<RawRecord>) {
        let added = raw_records.len();
        for raw in raw_records {
            let record = normalize(raw, &self.columns, &mut self.next_record_id);
            self.master.push(record);
        }
        self.rebuild_working();
        self.recompute_window();
        debug!("added {} records, master set now {}", added, self.master.len());
    }

    /// Drop every record. The id counter is deliberately left running.
    pub fn clear(&mut self) {
        self.master.clear();
        self.working.clear();
        self.window.current_page = 1;
        self.recompute_window();
        debug!("cleared all records");
    }

    /// Replace the column sequence. Existing records are not re-normalized:
    /// fields outside the new set stay stored, fields never normalized stay
    /// missing until the next `load`/`add_records`.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.window.current_page = 1;
        self.recompute_window();
    }

    /// Set the free-text filter and rebuild the working set (filter, then
    /// the active sort). Resets the current page. Inert when the grid is
    /// not searchable.
    pub fn set_filter(&mut self, query: &str) {
        if !self.searchable {
            return;
        }
        self.filter = FilterSpec {
            query: query.to_string(),
        };
        self.rebuild_working();
        self.window.current_page = 1;
        self.recompute_window();
        debug!(
            "filter {:?} keeps {} of {} records",
            query,
            self.working.len(),
            self.master.len()
        );
    }

    /// Sort by `field` with the toggle rule: sorting the field that is
    /// already sorted ascending flips to descending; any other combination
    /// sorts the field ascending.
    pub fn set_sort(&mut self, field: &str) -> Result<(), GridError> {
        let descending = self.sort.field.as_deref() == Some(field) && !self.sort.descending;
        self.set_sort_direction(field, descending)
    }

    /// Sort by `field` in an explicit direction. Re-sorts the existing
    /// working set in place (the filter is not re-applied) and resets the
    /// current page. Inert when the grid is not sortable; an unknown column
    /// is reported without touching the sort spec.
    pub fn set_sort_direction(&mut self, field: &str, descending: bool) -> Result<(), GridError> {
        if !self.sortable {
            return Ok(());
        }
        if !self.columns.iter().any(|c| c == field) {
            warn!("ignoring sort on unknown column '{}'", field);
            return Err(GridError::UnknownColumn {
                column: field.to_string(),
            });
        }

        self.sort = SortSpec {
            field: Some(field.to_string()),
            descending,
        };
        self.apply_sort();
        self.window.current_page = 1;
        self.recompute_window();
        Ok(())
    }

    /// Go to a page, clamping into `[1, total_pages]`. Only the window is
    /// recomputed. Page 0 is outside the domain and rejected.
    pub fn set_page(&mut self, page: usize) -> Result<(), GridError> {
        if page == 0 {
            return Err(GridError::InvalidPage { page });
        }
        if !self.pagination {
            return Ok(());
        }
        self.window.current_page = page;
        self.recompute_window();
        Ok(())
    }

    /// Change the page size, recomputing the page count and clamping the
    /// current page. A size outside the configured list is accepted with a
    /// warning; zero is rejected.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        if size == 0 {
            return Err(GridError::InvalidPageSize { size });
        }
        if !self.pagination {
            return Ok(());
        }
        if !self.page_sizes.contains(&size) {
            warn!(
                "page size {} is not in the configured sizes {:?}",
                size, self.page_sizes
            );
        }
        self.window.page_size = size;
        self.recompute_window();
        Ok(())
    }

    // ==================== Queries ====================

    /// Look up a record's fields by its normalized id.
    pub fn record_by_id(&self, id: &str) -> Result<&HashMap<String, CellValue>, GridError> {
        self.master
            .iter()
            .find(|record| record.id == id)
            .map(|record| &record.fields)
            .ok_or_else(|| GridError::RecordNotFound { id: id.to_string() })
    }

    /// Snapshot the current view: the visible rows, the window, the active
    /// specs and the results label. Read-only, fully owned.
    pub fn view(&self) -> ViewSnapshot {
        let rows = self.working[self.window.start_index..self.window.end_index]
            .iter()
            .map(|&index| self.master[index].clone())
            .collect();

        ViewSnapshot {
            rows,
            window: self.window,
            sort: self.sort.clone(),
            filter: self.filter.clone(),
            results_label: self.window.results_label(self.working.len()),
        }
    }

    /// Working-set length (after filtering).
    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Total records loaded, ignoring the filter.
    pub fn master_len(&self) -> usize {
        self.master.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    // ==================== Derivation ====================

    /// Rebuild the working set from the master set: filter, then sort.
    fn rebuild_working(&mut self) {
        let query = if self.searchable { self.filter.query.as_str() } else { "" };
        let matcher = RecordMatcher::new(query);
        self.working = (0..self.master.len())
            .filter(|&index| matcher.matches(&self.master[index]))
            .collect();
        self.apply_sort();
    }

    /// Re-sort the current working set in place. Stable, so equal keys keep
    /// their filtered order.
    fn apply_sort(&mut self) {
        if !self.sortable {
            return;
        }
        let field = match &self.sort.field {
            Some(field) => field.clone(),
            None => return,
        };
        let cmp = comparator(&field, self.sort.descending);
        let master = &self.master;
        self.working.sort_by(|&a, &b| cmp(&master[a], &master[b]));
    }

    /// Re-establish the window invariants after any change to the working
    /// set, the page or the page size.
    fn recompute_window(&mut self) {
        let len = self.working.len();
        if self.pagination {
            self.window = PageWindow::compute(self.window.current_page, self.window.page_size, len);
        } else {
            // Page size pinned to the working-set length; one page shows all
            self.window = PageWindow::compute(1, len.max(1), len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CellValue;

    fn raw(pairs: &[(&str, CellValue)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn people() -> Vec<RawRecord> {
        vec![
            raw(&[("name", CellValue::from("Bob")), ("age", CellValue::from(30.0))]),
            raw(&[("name", CellValue::from("Al")), ("age", CellValue::from(25.0))]),
            raw(&[("name", CellValue::from("Cate")), ("age", CellValue::from(25.0))]),
        ]
    }

    fn cols(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn engine() -> GridEngine {
        let mut engine = GridEngine::new(GridConfig::new(cols(&["name", "age"]))).unwrap();
        engine.load(people(), cols(&["name", "age"]));
        engine
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let mut config = GridConfig::new(cols(&["a"]));
        config.page_sizes = vec![5, 0];
        assert!(matches!(
            GridEngine::new(config),
            Err(GridError::InvalidPageSize { size: 0 })
        ));
    }

    #[test]
    fn test_config_rejects_initial_size_outside_list() {
        let mut config = GridConfig::new(cols(&["a"]));
        config.initial_page_size = Some(7);
        assert!(matches!(
            GridEngine::new(config),
            Err(GridError::InvalidPageSize { size: 7 })
        ));
    }

    #[test]
    fn test_load_resets_filter_sort_and_page() {
        let mut engine = engine();
        engine.set_filter("al");
        engine.set_sort("name").unwrap();
        engine.set_page_size(1).unwrap();
        engine.set_page(2).unwrap_or(());

        engine.load(people(), cols(&["name", "age"]));
        let view = engine.view();
        assert!(!view.filter.is_active());
        assert!(!view.sort.is_active());
        assert_eq!(view.window.current_page, 1);
        // Rows come back in insertion order
        assert_eq!(view.rows[0].get("name"), Some(&CellValue::from("Bob")));
    }

    #[test]
    fn test_ids_continue_across_load_and_clear() {
        let mut engine = engine();
        assert_eq!(engine.view().rows[0].id, "1");

        engine.clear();
        engine.add_records(people());
        // Counter kept running: first record after clear is id 4
        assert_eq!(engine.view().rows[0].id, "4");

        engine.load(people(), cols(&["name", "age"]));
        assert_eq!(engine.view().rows[0].id, "7");
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut engine = engine();

        engine.set_sort("name").unwrap();
        assert!(!engine.sort_spec().descending);
        assert_eq!(engine.view().rows[0].get("name"), Some(&CellValue::from("Al")));

        engine.set_sort("name").unwrap();
        assert!(engine.sort_spec().descending);
        assert_eq!(engine.view().rows[0].get("name"), Some(&CellValue::from("Cate")));

        engine.set_sort("name").unwrap();
        assert!(!engine.sort_spec().descending);
        assert_eq!(engine.view().rows[0].get("name"), Some(&CellValue::from("Al")));
    }

    #[test]
    fn test_sort_switching_fields_starts_ascending() {
        let mut engine = engine();
        engine.set_sort("name").unwrap();
        engine.set_sort("name").unwrap(); // descending on name
        engine.set_sort("age").unwrap();
        assert_eq!(engine.sort_spec().field.as_deref(), Some("age"));
        assert!(!engine.sort_spec().descending);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut engine = engine();
        engine.set_sort("age").unwrap();
        let view = engine.view();
        // Al (id 2) and Cate (id 3) share age 25; insertion order preserved
        assert_eq!(view.rows[0].id, "2");
        assert_eq!(view.rows[1].id, "3");
        assert_eq!(view.rows[2].id, "1");
    }

    #[test]
    fn test_sort_unknown_column_is_rejected_without_state_change() {
        let mut engine = engine();
        engine.set_sort("name").unwrap();
        let err = engine.set_sort("nope").unwrap_err();
        assert!(matches!(err, GridError::UnknownColumn { .. }));
        assert_eq!(engine.sort_spec().field.as_deref(), Some("name"));
    }

    #[test]
    fn test_filter_then_add_records_reapplies_filter() {
        let mut engine = engine();
        engine.set_filter("Bob");
        assert_eq!(engine.len(), 1);

        engine.add_records(vec![raw(&[
            ("name", CellValue::from("Zed")),
            ("age", CellValue::from(40.0)),
        ])]);
        // Non-matching record stays out of the working set
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.master_len(), 4);

        engine.set_filter("");
        assert_eq!(engine.len(), 4);
    }

    #[test]
    fn test_add_records_keeps_current_page() {
        let mut engine = engine();
        engine.set_page_size(1).unwrap();
        engine.set_page(3).unwrap();
        engine.add_records(vec![raw(&[
            ("name", CellValue::from("Dee")),
            ("age", CellValue::from(22.0)),
        ])]);
        assert_eq!(engine.view().window.current_page, 3);
    }

    #[test]
    fn test_page_clamps_down_when_out_of_range() {
        let mut engine = engine();
        engine.set_page_size(1).unwrap();
        engine.set_page(3).unwrap();
        engine.set_filter("Bob"); // working set shrinks to 1
        let window = engine.view().window;
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.current_page, 1);
    }

    #[test]
    fn test_set_page_zero_is_invalid() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_page(0),
            Err(GridError::InvalidPage { page: 0 })
        ));
    }

    #[test]
    fn test_set_page_size_zero_is_invalid() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_page_size(0),
            Err(GridError::InvalidPageSize { size: 0 })
        ));
    }

    #[test]
    fn test_large_page_size_collapses_to_one_page() {
        let mut engine = engine();
        engine.set_page_size(1).unwrap();
        engine.set_page(3).unwrap();
        engine.set_page_size(100).unwrap();
        let window = engine.view().window;
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.current_page, 1);
        assert_eq!(engine.view().rows.len(), 3);
    }

    #[test]
    fn test_set_columns_does_not_renormalize() {
        let mut engine = engine();
        engine.set_columns(cols(&["name", "city"]));
        // "age" stays stored, "city" stays missing
        let fields = engine.record_by_id("1").unwrap();
        assert_eq!(fields.get("age"), Some(&CellValue::from(30.0)));
        assert_eq!(fields.get("city"), None);
        assert_eq!(engine.view().window.current_page, 1);
    }

    #[test]
    fn test_record_by_id_not_found() {
        let engine = engine();
        assert!(matches!(
            engine.record_by_id("999"),
            Err(GridError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_unsearchable_grid_ignores_filter() {
        let mut config = GridConfig::new(cols(&["name", "age"]));
        config.searchable = false;
        let mut engine = GridEngine::new(config).unwrap();
        engine.load(people(), cols(&["name", "age"]));
        engine.set_filter("Bob");
        assert_eq!(engine.len(), 3);
        assert!(!engine.filter_spec().is_active());
    }

    #[test]
    fn test_unsortable_grid_ignores_sort() {
        let mut config = GridConfig::new(cols(&["name", "age"]));
        config.sortable = false;
        let mut engine = GridEngine::new(config).unwrap();
        engine.load(people(), cols(&["name", "age"]));
        engine.set_sort("name").unwrap();
        let view = engine.view();
        assert!(!view.sort.is_active());
        assert_eq!(view.rows[0].get("name"), Some(&CellValue::from("Bob")));
    }

    #[test]
    fn test_pagination_disabled_shows_everything() {
        let mut config = GridConfig::new(cols(&["name", "age"]));
        config.pagination = false;
        let mut engine = GridEngine::new(config).unwrap();
        engine.load(people(), cols(&["name", "age"]));

        engine.set_page(2).unwrap();
        engine.set_page_size(1).unwrap();

        let view = engine.view();
        assert_eq!(view.window.total_pages, 1);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.window.page_size, 3);
    }

    #[test]
    fn test_two_engines_do_not_share_ids() {
        let mut a = engine();
        let b = engine();
        a.add_records(people());
        // Each engine starts its own counter at 1
        assert_eq!(b.view().rows[0].id, "1");
        assert_eq!(a.master_len(), 6);
    }

    #[test]
    fn test_load_json() {
        let mut engine = GridEngine::new(GridConfig::new(cols(&["name", "age"]))).unwrap();
        let count = engine
            .load_json(
                r#"[{"name":"Al","age":25},{"name":"Bob","age":null}]"#,
                cols(&["name", "age"]),
            )
            .unwrap();
        assert_eq!(count, 2);
        // null scrubbed to empty string
        assert_eq!(
            engine.record_by_id("2").unwrap().get("age"),
            Some(&CellValue::from(""))
        );
    }

    #[test]
    fn test_load_json_rejects_garbage() {
        let mut engine = GridEngine::new(GridConfig::new(cols(&["a"]))).unwrap();
        assert!(matches!(
            engine.load_json("not json", cols(&["a"])),
            Err(GridError::Json(_))
        ));
    }
}
