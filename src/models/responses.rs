use crate::models::pagination::PageSize;
use crate::models::record::Record;
use crate::models::sort::SortConfig;
use crate::models::state::{LoadPhase, ViewState};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub load: LoadPhase,
    pub records: usize,
}

/// JSON snapshot of the dataset view.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub load: LoadPhase,
    pub sort: SortConfig,
    pub current_page: usize,
    pub page_size: PageSize,
    pub total_pages: usize,
    pub count: usize,
    pub records: Vec<Record>,
}

impl From<&ViewState> for ViewResponse {
    fn from(state: &ViewState) -> Self {
        Self {
            load: state.load_phase(),
            sort: state.sort(),
            current_page: state.current_page(),
            page_size: state.page_size(),
            total_pages: state.total_pages(),
            count: state.dataset().len(),
            records: state.current_page_records().into_iter().cloned().collect(),
        }
    }
}
