use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    handler::{
        about::about_handler, activity::activity_handler, auth::auth_handler,
        contact::contact_handler, faq::faq_handler, image::image_handler, poi::poi_handler,
        popup::popup_handler, restaurant::restaurant_handler, review::review_handler,
        section::section_handler,
    },
};

pub fn create_router(app_state: AppState) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler(app_state.clone()))
        .nest("/sections", section_handler(app_state.clone()))
        .nest("/about", about_handler(app_state.clone()))
        .nest("/activities", activity_handler(app_state.clone()))
        .nest("/restaurants", restaurant_handler(app_state.clone()))
        .nest("/poi", poi_handler(app_state.clone()))
        .nest("/faqs", faq_handler(app_state.clone()))
        .nest("/reviews", review_handler(app_state.clone()))
        .nest("/images", image_handler(app_state.clone()))
        .nest("/popups", popup_handler(app_state.clone()))
        .nest("/contact", contact_handler())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    Router::new().nest("/api", api_route)
}
