pub mod routes;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::page::PageContext;
use crate::matcher::routes::RoutePattern;

/// Host suffix shared by every Jira Cloud site.
const CLOUD_HOST_SUFFIX: &str = "atlassian.net";
/// Body element id self-hosted Jira stamps on its screens.
const BODY_MARKER_ID: &str = "jira";
/// Query parameter carrying the focused issue on board and backlog views.
const SELECTED_ISSUE_PARAM: &str = "selectedIssue";
/// Product segment Jira Cloud inserts ahead of issue routes.
const PRODUCT_PATH_SEGMENT: &str = "/jira/software";

/// Known trailing shapes of Jira screens. Everything ahead of the longest
/// such suffix is the mount path the instance is served under.
static KNOWN_TRAILING_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<prefix>.*?)",
        r"(?:/jira/software)?",
        r"(?:",
        r"/secure/RapidBoard\.jspa",
        r"|/browse/[^/]+",
        r"|/projects/[^/]+/issues/[^/]+",
        r"|/projects/[^/]+/boards/[0-9]+(?:/.*)?",
        r")/?$",
    ))
    .expect("trailing shape pattern should compile")
});

/// Issue routes, tried in order; the first match wins.
static ISSUE_ROUTES: LazyLock<Vec<RoutePattern>> = LazyLock::new(|| {
    vec![
        RoutePattern::new("/projects/:project/issues/:id"),
        RoutePattern::new("/browse/:id"),
    ]
});

/// Decide whether the page is a Jira screen at all. Either signal is
/// sufficient: a Jira Cloud host, or the body marker self-hosted
/// instances render on every screen.
pub fn is_tracker_page(page: &PageContext) -> bool {
    let cloud_host = page
        .url
        .host_str()
        .is_some_and(|host| host.ends_with(CLOUD_HOST_SUFFIX));
    let marked_body = page.document.body_id() == Some(BODY_MARKER_ID);
    log::debug!(
        "tracker gate for {}: cloud_host={cloud_host} marked_body={marked_body}",
        page.url
    );
    cloud_host || marked_body
}

/// Extract the hosting prefix: the part of the path ahead of the known
/// screen shape. A path ending in no known shape is all prefix.
pub fn path_prefix(url: &Url) -> String {
    match KNOWN_TRAILING_SHAPE.captures(url.path()) {
        Some(captures) => captures
            .name("prefix")
            .map(|prefix| prefix.as_str().to_string())
            .unwrap_or_default(),
        None => url.path().trim_end_matches('/').to_string(),
    }
}

/// Extract the focused issue identifier, if any.
///
/// The `selectedIssue` query parameter wins over any path route: board
/// and backlog screens keep the issue key there while the path stays on
/// the board. Otherwise the path, with the hosting prefix and the product
/// segment removed, is matched against the issue routes in order. The
/// identifier is treated as opaque.
pub fn selected_issue_id(url: &Url, prefix: &str) -> Option<String> {
    if let Some((_, value)) = url
        .query_pairs()
        .find(|(name, _)| name == SELECTED_ISSUE_PARAM)
    {
        if !value.is_empty() {
            log::debug!("issue id from {SELECTED_ISSUE_PARAM}: {value}");
            return Some(value.into_owned());
        }
    }

    let path = url.path();
    let routed = path.strip_prefix(prefix).unwrap_or(path);
    let routed = routed.strip_prefix(PRODUCT_PATH_SEGMENT).unwrap_or(routed);
    for route in ISSUE_ROUTES.iter() {
        if let Some(params) = route.capture(routed) {
            if let Some(id) = params.get("id") {
                log::debug!("issue id from route: {id}");
                return Some(id.clone());
            }
        }
    }
    None
}
