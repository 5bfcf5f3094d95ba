#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;

use theatre_system::services::booking::SeatRequest;

pub fn seat(performance_id: i64, row: i32, seat: i32) -> SeatRequest {
    SeatRequest {
        performance_id,
        row,
        seat,
    }
}

pub fn show_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap()
}

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, first_name, last_name) VALUES ($1, 'Test', 'User') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

pub async fn seed_hall(pool: &PgPool, rows: i32, seats_in_row: i32) -> i64 {
    sqlx::query_scalar(
        r#"INSERT INTO theatre_halls (name, "rows", seats_in_row) VALUES ('Main Stage', $1, $2) RETURNING id"#,
    )
    .bind(rows)
    .bind(seats_in_row)
    .fetch_one(pool)
    .await
    .expect("seed hall")
}

pub async fn seed_performance(pool: &PgPool, hall_id: i64) -> i64 {
    let play_id: i64 = sqlx::query_scalar(
        "INSERT INTO plays (title, description) VALUES ('Hamlet', 'A tragedy') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("seed play");

    sqlx::query_scalar(
        "INSERT INTO performances (play_id, theatre_hall_id, show_time) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(play_id)
    .bind(hall_id)
    .bind(show_time())
    .fetch_one(pool)
    .await
    .expect("seed performance")
}

pub async fn ticket_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
        .fetch_one(pool)
        .await
        .expect("count tickets")
}

pub async fn reservation_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
        .fetch_one(pool)
        .await
        .expect("count reservations")
}
