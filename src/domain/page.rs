use scraper::{Html, Selector};
use url::Url;

/// Immutable snapshot of the page a scan runs against.
///
/// Scans hold the context across await points, so it carries owned data
/// rather than a handle into the live DOM: the URL plus the few document
/// attributes the matcher inspects.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub url: Url,
    pub document: PageDocument,
}

impl PageContext {
    pub fn new(url: Url, document: PageDocument) -> Self {
        Self { url, document }
    }
}

/// Read-only view of the host page's document, reduced at construction to
/// the attributes scans consume.
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    body_id: Option<String>,
}

impl PageDocument {
    /// Parse page HTML and keep the `<body>` element's id.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let body = Selector::parse("body").unwrap();
        let body_id = document
            .select(&body)
            .next()
            .and_then(|element| element.value().attr("id"))
            .map(str::to_string);
        Self { body_id }
    }

    pub fn with_body_id(id: impl Into<String>) -> Self {
        Self {
            body_id: Some(id.into()),
        }
    }

    pub fn body_id(&self) -> Option<&str> {
        self.body_id.as_deref()
    }
}
