pub mod user;
pub mod hall;
pub mod performance;
pub mod reservation;
pub mod ticket;

pub use user::User;
pub use hall::TheatreHall;
pub use performance::PerformanceWithHall;
pub use reservation::ReservationWithTickets;
pub use ticket::Ticket;
