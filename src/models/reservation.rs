use chrono::NaiveDateTime;
use serde::Serialize;

use super::Ticket;

// Бронь вместе с билетами - то, что отдаёт API
#[derive(Debug, Clone, Serialize)]
pub struct ReservationWithTickets {
    pub id: i64,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub tickets: Vec<Ticket>,
}
