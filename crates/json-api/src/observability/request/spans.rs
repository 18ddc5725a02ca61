//! HTTP route labels.

use uuid::Uuid;

/// Collapse identifier segments so a route label does not grow with data.
pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() || is_numeric_id(segment) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

/// The API resource a normalised route belongs to.
pub(super) fn resource_for_route(route: &str) -> &'static str {
    let mut segments = route.trim_start_matches('/').split('/');

    match (segments.next(), segments.next()) {
        (Some("api"), Some("agents")) => "agents",
        (Some("api"), Some("users")) => "users",
        (Some("api"), Some("auth")) => "auth",
        (Some("healthcheck"), _) => "healthcheck",
        _ => "other",
    }
}

fn is_numeric_id(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}
