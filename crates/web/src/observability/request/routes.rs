//! Route labels for request metrics.

const KNOWN_ROUTES: [&str; 3] = ["/", "/healthcheck", "/metrics"];

/// Collapses unknown paths into one label so probes cannot grow metric
/// cardinality.
pub(super) fn route_label(path: &str) -> &'static str {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() { "/" } else { trimmed };

    KNOWN_ROUTES
        .into_iter()
        .find(|route| *route == path)
        .unwrap_or("unmatched")
}
