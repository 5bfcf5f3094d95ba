use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TheatreHall {
    pub id: i64,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl TheatreHall {
    // Геометрия зала: место существует, если обе координаты в 1..=N
    pub fn contains(&self, row: i32, seat: i32) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.seats_in_row).contains(&seat)
    }

    pub fn capacity(&self) -> i64 {
        self.rows as i64 * self.seats_in_row as i64
    }
}
