pub mod auth;
pub mod mentorship;
pub mod shared;
pub mod workshop;
