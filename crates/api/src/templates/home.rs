use maud::{html, Markup, PreEscaped};

/// Documented JSON routes, in the order they are listed on the index page
pub const API_ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
];

pub fn home_page() -> Markup {
    html! {
        "Available Routes:"
        @for route in API_ROUTES {
            (PreEscaped("<br/>"))
            (route)
        }
    }
}
