//! Выборка броней пользователя и политика удаления связанных сущностей.

mod support;

use sqlx::PgPool;
use theatre_system::services::booking;

use support::{now, seat, seed_hall, seed_performance, seed_user, ticket_count};

#[sqlx::test(migrator = "theatre_system::MIGRATOR")]
async fn listing_returns_only_own_reservations_with_tickets(pool: PgPool) {
    let hall = seed_hall(&pool, 5, 8).await;
    let p = seed_performance(&pool, hall).await;
    let u = seed_user(&pool, "u@example.com").await;
    let v = seed_user(&pool, "v@example.com").await;

    let own = booking::book_seats(&pool, u, now(), &[seat(p, 1, 1), seat(p, 1, 2)])
        .await
        .expect("booking for u");
    booking::book_seats(&pool, v, now(), &[seat(p, 2, 1)])
        .await
        .expect("booking for v");

    let listed = booking::list_reservations(&pool, u).await.expect("listing");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, own.id);
    assert_eq!(listed[0].user_id, u);
    assert_eq!(listed[0].tickets.len(), 2);

    let mut seats: Vec<(i32, i32)> = listed[0].tickets.iter().map(|t| (t.row, t.seat)).collect();
    seats.sort();
    assert_eq!(seats, vec![(1, 1), (1, 2)]);

    let listed_v = booking::list_reservations(&pool, v).await.expect("listing v");
    assert_eq!(listed_v.len(), 1);
    assert_eq!(listed_v[0].tickets.len(), 1);
}

#[sqlx::test(migrator = "theatre_system::MIGRATOR")]
async fn deleting_a_reservation_cascades_to_its_tickets(pool: PgPool) {
    let hall = seed_hall(&pool, 5, 8).await;
    let p = seed_performance(&pool, hall).await;
    let u = seed_user(&pool, "u@example.com").await;

    let reservation = booking::book_seats(&pool, u, now(), &[seat(p, 1, 1), seat(p, 1, 2)])
        .await
        .expect("booking");
    assert_eq!(ticket_count(&pool).await, 2);

    sqlx::query("DELETE FROM reservations WHERE id = $1")
        .bind(reservation.id)
        .execute(&pool)
        .await
        .expect("delete reservation");

    // Бронь владеет билетами: удаление владельца удаляет билеты
    assert_eq!(ticket_count(&pool).await, 0);

    // Спектакль при этом не тронут
    let performances: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM performances")
        .fetch_one(&pool)
        .await
        .expect("count performances");
    assert_eq!(performances, 1);
}

#[sqlx::test(migrator = "theatre_system::MIGRATOR")]
async fn performance_with_sold_tickets_cannot_be_deleted(pool: PgPool) {
    let hall = seed_hall(&pool, 5, 8).await;
    let p = seed_performance(&pool, hall).await;
    let u = seed_user(&pool, "u@example.com").await;

    let reservation = booking::book_seats(&pool, u, now(), &[seat(p, 1, 1)])
        .await
        .expect("booking");

    // Пока есть проданные билеты - спектакль удалить нельзя (RESTRICT)
    sqlx::query("DELETE FROM performances WHERE id = $1")
        .bind(p)
        .execute(&pool)
        .await
        .expect_err("tickets still reference the performance");

    // После удаления брони (и каскадного удаления билетов) - можно
    sqlx::query("DELETE FROM reservations WHERE id = $1")
        .bind(reservation.id)
        .execute(&pool)
        .await
        .expect("delete reservation");
    sqlx::query("DELETE FROM performances WHERE id = $1")
        .bind(p)
        .execute(&pool)
        .await
        .expect("no tickets left, delete is allowed");
}

#[sqlx::test(migrator = "theatre_system::MIGRATOR")]
async fn hall_with_non_positive_dimensions_is_rejected(pool: PgPool) {
    // Геометрия зала проверяется при создании, а не при бронировании
    sqlx::query(r#"INSERT INTO theatre_halls (name, "rows", seats_in_row) VALUES ('Bad', 0, 8)"#)
        .execute(&pool)
        .await
        .expect_err("rows must be >= 1");

    sqlx::query(r#"INSERT INTO theatre_halls (name, "rows", seats_in_row) VALUES ('Bad', 5, 0)"#)
        .execute(&pool)
        .await
        .expect_err("seats_in_row must be >= 1");
}
