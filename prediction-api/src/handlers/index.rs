use crate::pages;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;

pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(pages::render_index(state.slot.status()))
}
