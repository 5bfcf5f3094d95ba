use chrono::NaiveDateTime;
use sqlx::FromRow;

use super::TheatreHall;

// Спектакль вместе с геометрией зала - всё, что нужно ядру бронирования
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceWithHall {
    pub id: i64,
    pub play_id: i64,
    pub show_time: NaiveDateTime,
    pub hall_id: i64,
    pub hall_name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl PerformanceWithHall {
    // Найти спектакль по id вместе с залом
    pub async fn find<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        performance_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT p.id, p.play_id, p.show_time,
                   h.id AS hall_id, h.name AS hall_name, h."rows", h.seats_in_row
            FROM performances p
            JOIN theatre_halls h ON h.id = p.theatre_hall_id
            WHERE p.id = $1
            "#,
        )
        .bind(performance_id)
        .fetch_optional(executor)
        .await
    }

    pub fn hall(&self) -> TheatreHall {
        TheatreHall {
            id: self.hall_id,
            name: self.hall_name.clone(),
            rows: self.rows,
            seats_in_row: self.seats_in_row,
        }
    }
}
