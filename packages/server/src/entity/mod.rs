pub mod mentorship;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod workshop;
pub mod workshop_registration;
