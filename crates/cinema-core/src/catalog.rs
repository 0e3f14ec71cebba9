//! CatalogViewModel — filter, paginate and resolve entries for the UI.
//!
//! The full entry list is set once per load and never mutated. All view
//! state (query, genre, page, filtered indices) lives in an owned
//! [`ViewState`] so the front end can hold one model per session.

use crate::entry::{parse_leading_int, Entry};

/// An entry paired with its position in the unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedEntry<'a> {
    pub index: usize,
    pub entry: &'a Entry,
}

impl IndexedEntry<'_> {
    /// Identifier to use in links for this entry.
    pub fn identifier(&self) -> String {
        self.entry.identifier(self.index)
    }
}

/// One page of filtered entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<IndexedEntry<'a>>,
    /// 1-based; may exceed `total_pages` after advancing past the end.
    pub page_number: usize,
    /// 0 when no entries match.
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Page 0` for an empty slice, otherwise `Page n / total`.
    pub fn label(&self) -> String {
        if self.items.is_empty() {
            "Page 0".to_string()
        } else {
            format!("Page {} / {}", self.page_number, self.total_pages)
        }
    }
}

/// Mutable per-session view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Trimmed, lowercased search text. Empty matches everything.
    pub query: String,
    /// Exact genre filter. Empty means all genres.
    pub genre: String,
    /// 1-based page cursor.
    pub page: usize,
    /// Original indices of matching entries, in source order.
    filtered: Vec<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            genre: String::new(),
            page: 1,
            filtered: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogViewModel {
    entries: Vec<Entry>,
    state: ViewState,
}

/// The filter predicate: title substring (case-insensitive) AND exact genre.
/// `query` must already be normalised (trimmed, lowercased).
pub fn entry_matches(entry: &Entry, query: &str, genre: &str) -> bool {
    let matches_query = query.is_empty()
        || entry
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .is_some_and(|t| t.to_lowercase().contains(query));
    let matches_genre = genre.is_empty() || entry.genre.as_deref() == Some(genre);
    matches_query && matches_genre
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

impl CatalogViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let mut model = Self::default();
        model.replace_entries(entries);
        model
    }

    /// Install a freshly loaded entry list. Current filters are re-applied
    /// and the page cursor returns to 1.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.rebuild_filter();
        self.state.page = 1;
        tracing::debug!(
            "catalog: {} entries, {} match current filters",
            self.entries.len(),
            self.state.filtered.len()
        );
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    pub fn set_filters(&mut self, query: &str, genre: &str) {
        self.state.query = normalize_query(query);
        self.state.genre = genre.to_string();
        self.rebuild_filter();
        self.state.page = 1;
    }

    pub fn set_query(&mut self, query: &str) {
        let genre = std::mem::take(&mut self.state.genre);
        self.set_filters(query, &genre);
    }

    pub fn set_genre(&mut self, genre: &str) {
        let query = std::mem::take(&mut self.state.query);
        self.set_filters(&query, genre);
    }

    pub fn clear_filters(&mut self) {
        self.set_filters("", "");
    }

    fn rebuild_filter(&mut self) {
        let ViewState { query, genre, .. } = &self.state;
        let filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry_matches(entry, query, genre))
            .map(|(i, _)| i)
            .collect();
        self.state.filtered = filtered;
    }

    /// Matching entries in source order.
    pub fn filtered_entries(&self) -> impl Iterator<Item = IndexedEntry<'_>> {
        self.state.filtered.iter().map(|&index| IndexedEntry {
            index,
            entry: &self.entries[index],
        })
    }

    pub fn filtered_len(&self) -> usize {
        self.state.filtered.len()
    }

    /// Sorted, de-duplicated, non-empty genres across the full list.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = self
            .entries
            .iter()
            .filter_map(|e| e.genre.as_deref())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }

    // ── Pagination ────────────────────────────────────────────────────────────

    /// Slice of the filtered entries for the current page. `page_size` must
    /// be positive; 0 is treated as 1.
    pub fn get_page(&self, page_size: usize) -> Page<'_> {
        let page_size = page_size.max(1);
        let total = self.state.filtered.len();
        let total_pages = total.div_ceil(page_size);
        let start = self.state.page.saturating_sub(1).saturating_mul(page_size);

        let items: Vec<IndexedEntry<'_>> = self
            .state
            .filtered
            .iter()
            .skip(start)
            .take(page_size)
            .map(|&index| IndexedEntry {
                index,
                entry: &self.entries[index],
            })
            .collect();

        let has_items = !items.is_empty();
        Page {
            has_previous: has_items && self.state.page > 1,
            has_next: has_items && self.state.page < total_pages,
            items,
            page_number: self.state.page,
            total_pages,
        }
    }

    pub fn go_to_previous_page(&mut self) {
        if self.state.page > 1 {
            self.state.page -= 1;
        }
    }

    /// Advances without an upper clamp; a page past the end is empty.
    pub fn go_to_next_page(&mut self) {
        self.state.page = self.state.page.saturating_add(1);
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Find an entry by identifier in the unfiltered list: first by `id`,
    /// then by positional index.
    pub fn resolve_entry(&self, identifier: &str) -> Option<IndexedEntry<'_>> {
        let by_id = self.entries.iter().enumerate().find(|(_, e)| {
            e.id
                .as_ref()
                .is_some_and(|id| id.to_string() == identifier)
        });
        if let Some((index, entry)) = by_id {
            return Some(IndexedEntry { index, entry });
        }

        let index = usize::try_from(parse_leading_int(identifier)?).ok()?;
        self.entries
            .get(index)
            .map(|entry| IndexedEntry { index, entry })
    }

    /// Up to `limit` entries other than the one at `exclude_index`, in
    /// source order.
    pub fn recommendations(&self, exclude_index: usize, limit: usize) -> Vec<IndexedEntry<'_>> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != exclude_index)
            .take(limit)
            .map(|(index, entry)| IndexedEntry { index, entry })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;

    fn titled(title: &str, genre: &str) -> Entry {
        Entry {
            title: Some(title.to_string()),
            genre: (!genre.is_empty()).then(|| genre.to_string()),
            ..Entry::default()
        }
    }

    fn numbered(n: usize) -> Vec<Entry> {
        (0..n).map(|i| titled(&format!("Movie {i}"), "")).collect()
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let mut vm = CatalogViewModel::with_entries(vec![
            titled("Dark Knight", "Action"),
            Entry::default(),
            titled("Darkest Hour", "Drama"),
            titled("Up", "Family"),
        ]);
        vm.set_filters("DARK", "");
        let titles: Vec<_> = vm.filtered_entries().map(|e| e.entry.display_title()).collect();
        assert_eq!(titles, vec!["Dark Knight", "Darkest Hour"]);
    }

    #[test]
    fn test_untitled_entries_pass_empty_query_only() {
        let mut vm = CatalogViewModel::with_entries(vec![Entry::default(), titled("", "")]);
        assert_eq!(vm.filtered_len(), 2);
        vm.set_filters("a", "");
        assert_eq!(vm.filtered_len(), 0);
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut vm = CatalogViewModel::with_entries(vec![titled("Dark Knight", "")]);
        vm.set_filters("  knight ", "");
        assert_eq!(vm.state().query, "knight");
        assert_eq!(vm.filtered_len(), 1);
    }

    #[test]
    fn test_genre_is_exact() {
        let mut vm = CatalogViewModel::with_entries(vec![
            titled("A", "Action"),
            titled("B", "action"),
            titled("C", ""),
            titled("D", "Action"),
        ]);
        vm.set_filters("", "Action");
        let idx: Vec<_> = vm.filtered_entries().map(|e| e.index).collect();
        assert_eq!(idx, vec![0, 3]);
    }

    #[test]
    fn test_set_query_keeps_genre() {
        let mut vm = CatalogViewModel::with_entries(vec![
            titled("Alpha", "Action"),
            titled("Alps", "Drama"),
        ]);
        vm.set_genre("Action");
        vm.set_query("al");
        assert_eq!(vm.state().genre, "Action");
        assert_eq!(vm.filtered_len(), 1);
        vm.set_genre("");
        assert_eq!(vm.state().query, "al");
        assert_eq!(vm.filtered_len(), 2);
    }

    #[test]
    fn test_filters_reset_page() {
        let mut vm = CatalogViewModel::with_entries(numbered(30));
        vm.go_to_next_page();
        vm.go_to_next_page();
        assert_eq!(vm.state().page, 3);
        vm.set_filters("movie", "");
        assert_eq!(vm.state().page, 1);
        vm.go_to_next_page();
        vm.clear_filters();
        assert_eq!(vm.state().page, 1);
        assert_eq!(vm.filtered_len(), 30);
    }

    #[test]
    fn test_pagination_scenario() {
        let mut vm = CatalogViewModel::with_entries(numbered(25));
        let page = vm.get_page(12);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous);
        assert!(page.has_next);
        assert_eq!(page.label(), "Page 1 / 3");

        vm.go_to_next_page();
        vm.go_to_next_page();
        let page = vm.get_page(12);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].index, 24);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_empty_result_page() {
        let mut vm = CatalogViewModel::with_entries(numbered(5));
        vm.set_filters("nothing matches", "");
        let page = vm.get_page(12);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous);
        assert!(!page.has_next);
        assert_eq!(page.label(), "Page 0");
    }

    #[test]
    fn test_navigation_bounds() {
        let mut vm = CatalogViewModel::with_entries(numbered(5));
        vm.go_to_previous_page();
        assert_eq!(vm.state().page, 1);

        // No upper clamp
        vm.go_to_next_page();
        vm.go_to_next_page();
        assert_eq!(vm.state().page, 3);
        let page = vm.get_page(12);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous);
        assert!(!page.has_next);

        vm.go_to_previous_page();
        assert_eq!(vm.state().page, 2);
    }

    #[test]
    fn test_page_size_zero_is_one() {
        let vm = CatalogViewModel::with_entries(numbered(3));
        let page = vm.get_page(0);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_resolve_by_id_ignores_filters() {
        let mut entries = numbered(10);
        entries[3].id = Some(EntryId::Number(7.into()));
        let mut vm = CatalogViewModel::with_entries(entries);
        vm.set_filters("movie 9", "");
        vm.go_to_next_page();

        let found = vm.resolve_entry("7").unwrap();
        assert_eq!(found.index, 3);
        assert_eq!(found.entry.display_title(), "Movie 3");
        assert_eq!(vm.resolve_entry("7"), Some(found));
    }

    #[test]
    fn test_id_match_wins_over_position() {
        let mut entries = numbered(5);
        entries[4].id = Some(EntryId::Text("1".to_string()));
        let vm = CatalogViewModel::with_entries(entries);
        assert_eq!(vm.resolve_entry("1").unwrap().index, 4);
    }

    #[test]
    fn test_whole_float_id_matches_integer_text() {
        let entries =
            crate::entry::parse_catalog_str(r#"[{"title":"A"},{"id":7.0,"title":"Seven"}]"#)
                .unwrap();
        let vm = CatalogViewModel::with_entries(entries);
        let found = vm.resolve_entry("7").unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.entry.display_title(), "Seven");
        assert_eq!(found.identifier(), "7");
    }

    #[test]
    fn test_resolve_by_position() {
        let vm = CatalogViewModel::with_entries(numbered(5));
        assert_eq!(vm.resolve_entry("2").unwrap().index, 2);
        assert_eq!(vm.resolve_entry("2abc").unwrap().index, 2);
        assert!(vm.resolve_entry("5").is_none());
        assert!(vm.resolve_entry("-1").is_none());
        assert!(vm.resolve_entry("abc").is_none());
    }

    #[test]
    fn test_recommendations_skip_current() {
        let vm = CatalogViewModel::with_entries(numbered(5));
        let recs = vm.recommendations(2, 20);
        let idx: Vec<_> = recs.iter().map(|e| e.index).collect();
        assert_eq!(idx, vec![0, 1, 3, 4]);

        let vm = CatalogViewModel::with_entries(numbered(30));
        assert_eq!(vm.recommendations(0, 20).len(), 20);
        assert_eq!(vm.recommendations(0, 20)[0].index, 1);
    }

    #[test]
    fn test_genres_sorted_unique() {
        let vm = CatalogViewModel::with_entries(vec![
            titled("a", "Drama"),
            titled("b", "Action"),
            titled("c", ""),
            titled("d", "Drama"),
        ]);
        assert_eq!(vm.genres(), vec!["Action".to_string(), "Drama".to_string()]);
    }

    #[test]
    fn test_replace_entries_keeps_filters() {
        let mut vm = CatalogViewModel::new();
        vm.set_filters("dark", "");
        assert_eq!(vm.get_page(12).total_pages, 0);
        vm.replace_entries(vec![titled("Dark City", ""), titled("Up", "")]);
        assert_eq!(vm.filtered_len(), 1);
        assert_eq!(vm.state().page, 1);
    }
}
