use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::services::booking::{self, SeatRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", get(list_reservations))
        .route("/reservations", post(create_reservation))
}

/* ---------- RESERVATIONS ---------- */

// POST /api/reservations
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(nested)]
    pub tickets: Vec<SeatRequest>,
}

async fn create_reservation(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Response> {
    // Проверка формы запроса: id и координаты положительные
    if let Err(errors) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_request",
                "message": "Некорректный запрос",
                "details": errors,
            })),
        )
            .into_response());
    }

    // Пограничная валидация мест: те же правила, что и финальный гейт
    // внутри транзакции - клиент получает адресную ошибку сразу
    booking::validate_requests(&state.db.pool, &req.tickets)
        .await
        .map_err(IntoResponse::into_response)?;

    // Атомарная бронь: либо все места, либо ни одного
    let reservation = booking::book_seats(
        &state.db.pool,
        user.user_id,
        Utc::now().naive_utc(),
        &req.tickets,
    )
    .await
    .map_err(IntoResponse::into_response)?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

// GET /api/reservations
async fn list_reservations(
    State(state): State<Arc<AppState>>,
    user: crate::middleware::AuthUser,
) -> Result<impl IntoResponse, Response> {
    let reservations = booking::list_reservations(&state.db.pool, user.user_id)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok((StatusCode::OK, Json(reservations)))
}
