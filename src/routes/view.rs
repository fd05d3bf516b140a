use crate::models::pagination::PageSize;
use crate::models::responses::ViewResponse;
use crate::models::state::Action;
use crate::services::store::Store;
use crate::utils::render::render_html;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct PageSizeForm {
    pub size: u32,
}

fn back_to_view() -> Redirect {
    Redirect::to("/")
}

pub async fn show_view(State(store): State<Store>) -> Result<Html<String>, StatusCode> {
    store.read(render_html).map(Html).map_err(|e| {
        error!("Failed to render view: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn view_snapshot(State(store): State<Store>) -> Json<ViewResponse> {
    Json(store.read(|state| ViewResponse::from(state)))
}

pub async fn toggle_sort(State(store): State<Store>) -> Redirect {
    store.dispatch(Action::ToggleSort);
    info!(
        "Sort direction now {:?}",
        store.read(|state| state.sort().direction)
    );
    back_to_view()
}

pub async fn set_page_size(
    State(store): State<Store>,
    Form(form): Form<PageSizeForm>,
) -> Result<Redirect, StatusCode> {
    match PageSize::try_from(form.size) {
        Ok(size) => {
            store.dispatch(Action::SetPageSize(size));
            Ok(back_to_view())
        }
        Err(e) => {
            warn!("Rejected page size: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn set_page(Path(page): Path<usize>, State(store): State<Store>) -> Redirect {
    store.dispatch(Action::SetPage(page));
    back_to_view()
}

pub async fn previous_page(State(store): State<Store>) -> Redirect {
    store.dispatch(Action::PreviousPage);
    back_to_view()
}

pub async fn next_page(State(store): State<Store>) -> Redirect {
    store.dispatch(Action::NextPage);
    back_to_view()
}
