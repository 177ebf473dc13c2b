pub mod error;
pub mod mentorship_status;
pub mod registration_status;

pub use error::{ParseStatusError, TransitionError};
pub use mentorship_status::MentorshipStatus;
pub use registration_status::RegistrationStatus;
