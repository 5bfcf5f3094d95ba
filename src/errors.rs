use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Ошибки уровня одного места. Доходят до клиента без переупаковки, чтобы
// всегда было видно, какое именно (row, seat) отклонено.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("seat ({row}, {seat}) is outside the hall: rows 1..={max_row}, seats 1..={max_seat}")]
    OutOfBounds {
        row: i32,
        seat: i32,
        max_row: i32,
        max_seat: i32,
    },

    #[error("seat ({row}, {seat}) is already taken for performance {performance_id}")]
    SeatTaken {
        performance_id: i64,
        row: i32,
        seat: i32,
    },

    #[error("performance {performance_id} does not exist")]
    UnknownPerformance { performance_id: i64 },
}

// Результат проверки одного места: либо отказ по правилам, либо сбой чтения
#[derive(Debug, Error)]
pub enum SeatCheckError {
    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

// Ошибки всей брони
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("booking must contain at least one seat request")]
    EmptyBooking,

    #[error("seat request #{index}: {source}")]
    Seat {
        index: usize,
        #[source]
        source: SeatError,
    },

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl BookingError {
    // Привязывает ошибку проверки места к позиции запроса в брони
    pub fn from_check(index: usize, e: SeatCheckError) -> Self {
        match e {
            SeatCheckError::Seat(source) => BookingError::Seat { index, source },
            SeatCheckError::Storage(e) => BookingError::Storage(e),
        }
    }
}

// Перевод ошибки вставки билета. Гонка с параллельной бронью на то же место
// прилетает как unique violation по uq_tickets_performance_row_seat - для
// клиента это то же самое "место занято", а не сбой хранилища.
pub fn map_ticket_insert_error(
    e: sqlx::Error,
    index: usize,
    performance_id: i64,
    row: i32,
    seat: i32,
) -> BookingError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return BookingError::Seat {
                index,
                source: SeatError::SeatTaken {
                    performance_id,
                    row,
                    seat,
                },
            };
        }
    }
    BookingError::Storage(e)
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            BookingError::EmptyBooking => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "empty_booking",
                    "message": "Бронь должна содержать хотя бы одно место",
                }),
            ),
            BookingError::Seat { index, source } => match source {
                SeatError::OutOfBounds {
                    row,
                    seat,
                    max_row,
                    max_seat,
                } => (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "out_of_bounds",
                        "message": format!(
                            "Место (ряд {}, место {}) вне зала: ряды 1..{}, места 1..{}",
                            row, seat, max_row, max_seat
                        ),
                        "index": index,
                        "row": row,
                        "seat": seat,
                        "valid_rows": { "min": 1, "max": max_row },
                        "valid_seats": { "min": 1, "max": max_seat },
                    }),
                ),
                SeatError::SeatTaken {
                    performance_id,
                    row,
                    seat,
                } => (
                    StatusCode::CONFLICT,
                    json!({
                        "error": "seat_taken",
                        "message": format!("Место (ряд {}, место {}) уже занято", row, seat),
                        "index": index,
                        "performance_id": performance_id,
                        "row": row,
                        "seat": seat,
                    }),
                ),
                SeatError::UnknownPerformance { performance_id } => (
                    StatusCode::NOT_FOUND,
                    json!({
                        "error": "unknown_performance",
                        "message": "Спектакль не найден",
                        "index": index,
                        "performance_id": performance_id,
                    }),
                ),
            },
            BookingError::Storage(e) => {
                tracing::error!("booking storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "storage",
                        "retryable": true,
                        "message": "Не удалось выполнить операцию, попробуйте ещё раз",
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
