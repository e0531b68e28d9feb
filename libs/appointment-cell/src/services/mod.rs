pub mod booking;
pub mod calendar;
pub mod conflict;

pub use booking::AppointmentFactory;
pub use calendar::Calendar;
pub use conflict::{intervals_overlap, ConflictDetectionService};
