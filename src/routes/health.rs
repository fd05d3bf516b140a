use crate::models::responses::HealthResponse;
use crate::services::store::Store;
use axum::{extract::State, response::Json};

pub async fn health_check(State(store): State<Store>) -> Json<HealthResponse> {
    let (load, records) = store.read(|state| (state.load_phase(), state.dataset().len()));

    Json(HealthResponse {
        service: "book-browser".to_string(),
        status: "running".to_string(),
        load,
        records,
    })
}
