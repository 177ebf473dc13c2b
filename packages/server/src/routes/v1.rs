use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/mentorships", mentorship_routes())
        .nest("/workshops", workshop_routes())
        .nest("/registrations", registration_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    use handlers::auth::*;

    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(me))
}

fn mentorship_routes() -> OpenApiRouter<AppState> {
    use handlers::mentorship::*;

    OpenApiRouter::new()
        .routes(routes!(list_mentorships, request_mentorship))
        .routes(routes!(get_mentorship))
        .routes(routes!(update_mentorship_status))
}

fn workshop_routes() -> OpenApiRouter<AppState> {
    use handlers::workshop::*;

    OpenApiRouter::new()
        .routes(routes!(list_workshops, create_workshop))
        .routes(routes!(get_workshop))
        .routes(routes!(list_workshop_registrations, register_for_workshop))
}

fn registration_routes() -> OpenApiRouter<AppState> {
    use handlers::registration::*;

    OpenApiRouter::new()
        .routes(routes!(list_my_registrations))
        .routes(routes!(get_registration))
        .routes(routes!(cancel_registration))
}
