use std::collections::HashMap;

use regex::Regex;

/// Route template matcher for path shapes like `/browse/:id`.
///
/// Segments starting with `:` capture exactly one path segment; all other
/// segments match literally. Matching is anchored to the whole path and
/// tolerates one trailing slash.
#[derive(Debug)]
pub struct RoutePattern {
    regex: Regex,
}

impl RoutePattern {
    /// Compile a `:name` template. Templates are crate-internal constants,
    /// so a template that does not compile is a programming error.
    pub fn new(template: &str) -> Self {
        let mut pattern = String::from("^");
        for segment in template.split('/').filter(|segment| !segment.is_empty()) {
            pattern.push('/');
            match segment.strip_prefix(':') {
                Some(name) => {
                    pattern.push_str("(?P<");
                    pattern.push_str(name);
                    pattern.push_str(">[^/]+)");
                }
                None => pattern.push_str(&regex::escape(segment)),
            }
        }
        pattern.push_str("/?$");
        let regex = Regex::new(&pattern).expect("route template should compile");
        Self { regex }
    }

    /// Match a path against the template, returning the captured
    /// parameters by name.
    pub fn capture(&self, path: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(path)?;
        let mut params = HashMap::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                params.insert(name.to_string(), value.as_str().to_string());
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_named_segments() {
        let route = RoutePattern::new("/projects/:project/issues/:id");
        let params = route.capture("/projects/OPS/issues/OPS-12").unwrap();
        assert_eq!(params.get("project").map(String::as_str), Some("OPS"));
        assert_eq!(params.get("id").map(String::as_str), Some("OPS-12"));
    }

    #[test]
    fn tolerates_a_trailing_slash() {
        let route = RoutePattern::new("/browse/:id");
        let params = route.capture("/browse/OPS-12/").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("OPS-12"));
    }

    #[test]
    fn rejects_literal_mismatches() {
        let route = RoutePattern::new("/browse/:id");
        assert!(route.capture("/issues/OPS-12").is_none());
    }

    #[test]
    fn rejects_extra_segments() {
        let route = RoutePattern::new("/browse/:id");
        assert!(route.capture("/browse/OPS-12/comments").is_none());
        assert!(route.capture("/app/browse/OPS-12").is_none());
    }

    #[test]
    fn rejects_empty_segments() {
        let route = RoutePattern::new("/browse/:id");
        assert!(route.capture("/browse/").is_none());
    }
}
