use crate::models::pagination::{PageSize, Pagination};
use crate::models::record::Record;
use crate::models::sort::{sort_records, SortConfig, SortKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    #[default]
    Unloaded,
    Loading,
    /// Set after the read resolves, whether it succeeded or not.
    Loaded,
}

/// Discrete state transitions of the dataset view.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    LoadSucceeded(Vec<Record>),
    LoadFailed(String),
    ToggleSort,
    SetPageSize(PageSize),
    SetPage(usize),
    PreviousPage,
    NextPage,
}

/// Complete state of the dataset view. Rendering is a pure function of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    dataset: Vec<Record>,
    sort: SortConfig,
    pagination: Pagination,
    load: LoadPhase,
}

impl ViewState {
    pub fn new(sort_key: SortKey, page_size: PageSize) -> Self {
        Self {
            dataset: Vec::new(),
            sort: SortConfig::new(sort_key),
            pagination: Pagination::new(page_size),
            load: LoadPhase::Unloaded,
        }
    }

    /// Applies one action in place.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => {
                if self.load == LoadPhase::Unloaded {
                    self.load = LoadPhase::Loading;
                }
            }
            Action::LoadSucceeded(records) => {
                self.dataset = records;
                self.load = LoadPhase::Loaded;
                if self.pagination.current_page > self.last_page() {
                    self.pagination.current_page = 1;
                }
            }
            Action::LoadFailed(_) => {
                self.load = LoadPhase::Loaded;
            }
            Action::ToggleSort => self.sort.toggle(),
            Action::SetPageSize(size) => self.pagination.set_page_size(size),
            Action::SetPage(page) => {
                self.pagination.go_to(page, self.dataset.len());
            }
            Action::PreviousPage => {
                if self.has_previous() {
                    self.pagination.current_page -= 1;
                }
            }
            Action::NextPage => {
                if self.has_next() {
                    self.pagination.current_page += 1;
                }
            }
        }
    }

    /// Reducer form of [`ViewState::apply`].
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.load
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.dataset.len())
    }

    fn last_page(&self) -> usize {
        self.pagination.last_page(self.dataset.len())
    }

    pub fn has_previous(&self) -> bool {
        self.pagination.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.pagination.has_next(self.dataset.len())
    }

    pub fn sorted_records(&self) -> Vec<&Record> {
        sort_records(&self.dataset, &self.sort)
    }

    /// The sorted slice for the current page.
    pub fn current_page_records(&self) -> Vec<&Record> {
        let sorted = self.sorted_records();
        self.pagination.slice(&sorted).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sort::SortDirection;

    fn numbered(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|n| Record::titled(format!("Book {:03}", n)))
            .collect()
    }

    fn loaded(count: usize) -> ViewState {
        ViewState::default().reduce(Action::LoadSucceeded(numbered(count)))
    }

    fn page_titles(state: &ViewState) -> Vec<String> {
        state
            .current_page_records()
            .into_iter()
            .filter_map(|r| r.title.clone())
            .collect()
    }

    #[test]
    fn load_moves_through_phases() {
        let mut state = ViewState::default();
        assert_eq!(state.load_phase(), LoadPhase::Unloaded);

        state.apply(Action::LoadStarted);
        assert_eq!(state.load_phase(), LoadPhase::Loading);

        state.apply(Action::LoadSucceeded(numbered(3)));
        assert_eq!(state.load_phase(), LoadPhase::Loaded);
        assert_eq!(state.dataset().len(), 3);
    }

    #[test]
    fn failed_load_leaves_an_empty_view() {
        let state = ViewState::default()
            .reduce(Action::LoadStarted)
            .reduce(Action::LoadFailed("connection refused".into()));

        assert_eq!(state.load_phase(), LoadPhase::Loaded);
        assert!(state.dataset().is_empty());
        assert_eq!(state.total_pages(), 0);
        assert_eq!(state.current_page(), 1);
        assert!(state.current_page_records().is_empty());
        assert!(!state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn toggle_sort_flips_direction_only() {
        let state = ViewState::new(SortKey::Title, PageSize::Ten)
            .reduce(Action::LoadSucceeded(vec![
                Record::titled("B"),
                Record::titled("A"),
                Record::titled("C"),
            ]));
        assert_eq!(page_titles(&state), ["A", "B", "C"]);

        let state = state.reduce(Action::ToggleSort);
        assert_eq!(state.sort().key, SortKey::Title);
        assert_eq!(state.sort().direction, SortDirection::Descending);
        assert_eq!(page_titles(&state), ["C", "B", "A"]);
    }

    #[test]
    fn third_page_of_twenty_five_shows_last_five() {
        let state = loaded(25)
            .reduce(Action::SetPage(3));

        assert_eq!(state.total_pages(), 3);
        assert_eq!(
            page_titles(&state),
            ["Book 021", "Book 022", "Book 023", "Book 024", "Book 025"]
        );
    }

    #[test]
    fn set_page_size_resets_current_page() {
        let state = loaded(250)
            .reduce(Action::SetPage(7))
            .reduce(Action::SetPageSize(PageSize::Fifty));

        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), PageSize::Fifty);
        assert_eq!(state.total_pages(), 5);
    }

    #[test]
    fn previous_and_next_stop_at_the_edges() {
        let state = loaded(25).reduce(Action::PreviousPage);
        assert_eq!(state.current_page(), 1);

        let state = state
            .reduce(Action::NextPage)
            .reduce(Action::NextPage)
            .reduce(Action::NextPage);
        assert_eq!(state.current_page(), 3);
        assert!(!state.has_next());

        let state = state.reduce(Action::PreviousPage);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn set_page_out_of_range_is_a_no_op() {
        let state = loaded(25).reduce(Action::SetPage(2));

        assert_eq!(state.clone().reduce(Action::SetPage(0)).current_page(), 2);
        assert_eq!(state.clone().reduce(Action::SetPage(4)).current_page(), 2);
    }

    #[test]
    fn reload_with_fewer_records_keeps_page_in_range() {
        let state = loaded(25)
            .reduce(Action::SetPage(3))
            .reduce(Action::LoadSucceeded(numbered(4)));

        assert_eq!(state.current_page(), 1);
        assert_eq!(state.current_page_records().len(), 4);
    }

    #[test]
    fn started_load_does_not_rewind_a_finished_one() {
        let state = loaded(2).reduce(Action::LoadStarted);
        assert_eq!(state.load_phase(), LoadPhase::Loaded);
    }
}
