pub mod auth;
pub mod mentorship;
pub mod registration;
pub mod workshop;
