use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::info;
use validator::Validate;

use crate::errors::{map_ticket_insert_error, BookingError, SeatError};
use crate::models::{PerformanceWithHall, ReservationWithTickets, Ticket};
use crate::services::seats;

// Одна позиция брони: конкретное место на конкретный спектакль
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeatRequest {
    #[validate(range(min = 1))]
    pub performance_id: i64,
    #[validate(range(min = 1))]
    pub row: i32,
    #[validate(range(min = 1))]
    pub seat: i32,
}

/* ---------- boundary validation ---------- */

// Пограничная проверка: тот же validate_seat, что и финальный гейт в
// транзакции, но против пула - чтобы отдать адресную ошибку ещё до того,
// как открыта транзакция.
pub async fn validate_requests(
    pool: &PgPool,
    requests: &[SeatRequest],
) -> Result<(), BookingError> {
    for (index, req) in requests.iter().enumerate() {
        let perf = resolve_performance(pool, index, req.performance_id).await?;

        seats::validate_seat(pool, &perf, req.row, req.seat)
            .await
            .map_err(|e| BookingError::from_check(index, e))?;
    }
    Ok(())
}

async fn resolve_performance<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    index: usize,
    performance_id: i64,
) -> Result<PerformanceWithHall, BookingError> {
    match PerformanceWithHall::find(executor, performance_id).await? {
        Some(perf) => Ok(perf),
        None => Err(BookingError::Seat {
            index,
            source: SeatError::UnknownPerformance { performance_id },
        }),
    }
}

/* ---------- ticket factory ---------- */

// Фабрика билетов: билет появляется только после успешной валидации и только
// внутри транзакции брони. Никаких частичных записей.
async fn create_ticket(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: i64,
    index: usize,
    performance: &PerformanceWithHall,
    row: i32,
    seat: i32,
) -> Result<Ticket, BookingError> {
    // Финальный гейт: ровно та же проверка, что и на границе запроса
    seats::validate_seat(&mut **tx, performance, row, seat)
        .await
        .map_err(|e| BookingError::from_check(index, e))?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO tickets (performance_id, reservation_id, "row", seat)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(performance.id)
    .bind(reservation_id)
    .bind(row)
    .bind(seat)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| map_ticket_insert_error(e, index, performance.id, row, seat))?;

    Ok(Ticket {
        id,
        performance_id: performance.id,
        reservation_id,
        row,
        seat,
    })
}

/* ---------- reservation transaction ---------- */

// Бронь целиком: либо записываются бронь и все её билеты, либо ничего.
// Частичная бронь (часть мест есть, часть отклонена) невозможна.
pub async fn book_seats(
    pool: &PgPool,
    user_id: i64,
    created_at: NaiveDateTime,
    requests: &[SeatRequest],
) -> Result<ReservationWithTickets, BookingError> {
    // Пустая бронь отбрасывается до какого-либо обращения к хранилищу
    if requests.is_empty() {
        return Err(BookingError::EmptyBooking);
    }

    let mut tx = pool.begin().await?;

    let reservation_id: i64 = sqlx::query_scalar(
        "INSERT INTO reservations (user_id, created_at) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    let mut tickets = Vec::with_capacity(requests.len());
    for (index, req) in requests.iter().enumerate() {
        // Спектакль резолвится внутри транзакции: геометрия зала стабильна
        // на всё время брони
        let perf = match resolve_performance(&mut *tx, index, req.performance_id).await {
            Ok(perf) => perf,
            Err(e) => {
                tx.rollback().await.ok();
                return Err(e);
            }
        };

        match create_ticket(&mut tx, reservation_id, index, &perf, req.row, req.seat).await {
            Ok(ticket) => tickets.push(ticket),
            Err(e) => {
                // Первый отказ отменяет всю бронь, включая уже принятые места
                tx.rollback().await.ok();
                return Err(e);
            }
        }
    }

    tx.commit().await?;

    info!(
        "reservation {} committed: {} ticket(s) for user {}",
        reservation_id,
        tickets.len(),
        user_id
    );

    Ok(ReservationWithTickets {
        id: reservation_id,
        user_id,
        created_at,
        tickets,
    })
}

/* ---------- listing ---------- */

// Брони пользователя вместе с билетами одним JOIN-запросом
pub async fn list_reservations(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<ReservationWithTickets>, BookingError> {
    let rows = sqlx::query(
        r#"
        SELECT r.id AS rid, r.created_at,
               t.id AS tid, t.performance_id, t."row", t.seat
        FROM reservations r
        LEFT JOIN tickets t ON t.reservation_id = r.id
        WHERE r.user_id = $1
        ORDER BY r.created_at DESC, t.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut map: BTreeMap<i64, ReservationWithTickets> = BTreeMap::new();
    for r in rows {
        let rid: i64 = r.get("rid");
        let created_at: NaiveDateTime = r.get("created_at");
        let entry = map.entry(rid).or_insert_with(|| ReservationWithTickets {
            id: rid,
            user_id,
            created_at,
            tickets: Vec::new(),
        });
        let tid: Option<i64> = r.try_get("tid").ok();
        if let Some(tid) = tid {
            entry.tickets.push(Ticket {
                id: tid,
                performance_id: r.get("performance_id"),
                reservation_id: rid,
                row: r.get("row"),
                seat: r.get("seat"),
            });
        }
    }

    Ok(map.into_values().collect())
}
