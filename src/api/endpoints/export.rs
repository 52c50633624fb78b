//! Print export: `POST /api/export`.

use axum::response::Html;
use axum::Json;

use crate::api::types::ExportRequest;
use crate::export::render_print_html;

pub async fn export(Json(request): Json<ExportRequest>) -> Html<String> {
    let date = request
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(locale = request.locale.code(), "Rendering print export");
    Html(render_print_html(&request.record, request.locale, date))
}
