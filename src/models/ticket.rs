use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub performance_id: i64,
    pub reservation_id: i64,
    pub row: i32,
    pub seat: i32,
}
