use sqlx::PgExecutor;

use crate::errors::{SeatCheckError, SeatError};
use crate::models::PerformanceWithHall;

// Единственная реализация проверки места. Вызывается дважды: на границе
// запроса (против пула, быстрая адресная ошибка до транзакции) и как
// финальный гейт перед вставкой билета внутри транзакции. Обе точки обязаны
// проходить через эту функцию - правила не должны расходиться.
pub async fn validate_seat<'e>(
    executor: impl PgExecutor<'e>,
    performance: &PerformanceWithHall,
    row: i32,
    seat: i32,
) -> Result<(), SeatCheckError> {
    // 1. Геометрия зала
    if !performance.hall().contains(row, seat) {
        return Err(SeatError::OutOfBounds {
            row,
            seat,
            max_row: performance.rows,
            max_seat: performance.seats_in_row,
        }
        .into());
    }

    // 2. Занятость: билет на тройку (performance, row, seat) уже существует?
    // Чтение без побочных эффектов; гонку двух одновременно прошедших
    // проверок закрывает уникальный констрейнт при вставке.
    let taken: bool = sqlx::query_scalar(
        r#"SELECT EXISTS(SELECT 1 FROM tickets WHERE performance_id = $1 AND "row" = $2 AND seat = $3)"#,
    )
    .bind(performance.id)
    .bind(row)
    .bind(seat)
    .fetch_one(executor)
    .await?;

    if taken {
        return Err(SeatError::SeatTaken {
            performance_id: performance.id,
            row,
            seat,
        }
        .into());
    }

    Ok(())
}
