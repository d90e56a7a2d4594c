use serde_json::{Map, Value};

/// Top-level Atlassian Document Format document.
#[derive(Debug, Clone, PartialEq)]
pub struct AdfDoc {
    pub content: Vec<AdfNode>,
}

/// One node of an ADF tree.
///
/// The variants cover the node kinds Jira Cloud emits for issue
/// descriptions. Anything else is captured as `Unknown` with its text
/// leaves flattened, so classification is total over valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum AdfNode {
    Paragraph { content: Vec<AdfNode> },
    Heading { level: u8, content: Vec<AdfNode> },
    BulletList { content: Vec<AdfNode> },
    OrderedList { content: Vec<AdfNode> },
    ListItem { content: Vec<AdfNode> },
    TaskList { content: Vec<AdfNode> },
    TaskItem { done: bool, content: Vec<AdfNode> },
    CodeBlock { language: Option<String>, content: Vec<AdfNode> },
    Blockquote { content: Vec<AdfNode> },
    Panel { content: Vec<AdfNode> },
    Expand { title: Option<String>, content: Vec<AdfNode> },
    Rule,
    Table { content: Vec<AdfNode> },
    TableRow { content: Vec<AdfNode> },
    TableHeader { content: Vec<AdfNode> },
    TableCell { content: Vec<AdfNode> },
    Text { text: String, marks: Vec<AdfMark> },
    HardBreak,
    Mention { text: String },
    Emoji { text: String },
    InlineCard { url: String },
    Unknown { text: String },
}

impl AdfNode {
    /// Child nodes of container variants; empty for leaves.
    pub fn children(&self) -> &[AdfNode] {
        match self {
            AdfNode::Paragraph { content }
            | AdfNode::Heading { content, .. }
            | AdfNode::BulletList { content }
            | AdfNode::OrderedList { content }
            | AdfNode::ListItem { content }
            | AdfNode::TaskList { content }
            | AdfNode::TaskItem { content, .. }
            | AdfNode::CodeBlock { content, .. }
            | AdfNode::Blockquote { content }
            | AdfNode::Panel { content }
            | AdfNode::Expand { content, .. }
            | AdfNode::Table { content }
            | AdfNode::TableRow { content }
            | AdfNode::TableHeader { content }
            | AdfNode::TableCell { content } => content,
            _ => &[],
        }
    }
}

/// Formatting mark on a text run. Unknown marks are kept so the renderer
/// can skip them without losing the text.
#[derive(Debug, Clone, PartialEq)]
pub enum AdfMark {
    Strong,
    Em,
    Code,
    Strike,
    Link { href: String },
    Unknown,
}

/// Interpret a raw JSON value as an ADF document.
///
/// Returns `None` when the value is not an ADF doc at all (not an object,
/// wrong `type`, no `content` array). Unknown node kinds inside a valid
/// doc degrade instead of failing.
pub fn classify_document(value: &Value) -> Option<AdfDoc> {
    let object = value.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some("doc") {
        return None;
    }
    let content = object.get("content")?.as_array()?;
    Some(AdfDoc {
        content: classify_nodes(content),
    })
}

fn classify_nodes(values: &[Value]) -> Vec<AdfNode> {
    values.iter().filter_map(classify_node).collect()
}

fn classify_node(value: &Value) -> Option<AdfNode> {
    let object = value.as_object()?;
    let kind = object.get("type").and_then(Value::as_str).unwrap_or("");
    let node = match kind {
        "paragraph" => AdfNode::Paragraph {
            content: child_nodes(object),
        },
        "heading" => AdfNode::Heading {
            level: attr_u64(object, "level").unwrap_or(1).clamp(1, 6) as u8,
            content: child_nodes(object),
        },
        "bulletList" => AdfNode::BulletList {
            content: child_nodes(object),
        },
        "orderedList" => AdfNode::OrderedList {
            content: child_nodes(object),
        },
        "listItem" => AdfNode::ListItem {
            content: child_nodes(object),
        },
        "taskList" => AdfNode::TaskList {
            content: child_nodes(object),
        },
        "taskItem" => AdfNode::TaskItem {
            done: attr_str(object, "state") == Some("DONE"),
            content: child_nodes(object),
        },
        "codeBlock" => AdfNode::CodeBlock {
            language: attr_str(object, "language").map(str::to_string),
            content: child_nodes(object),
        },
        "blockquote" => AdfNode::Blockquote {
            content: child_nodes(object),
        },
        "panel" => AdfNode::Panel {
            content: child_nodes(object),
        },
        "expand" | "nestedExpand" => AdfNode::Expand {
            title: attr_str(object, "title").map(str::to_string),
            content: child_nodes(object),
        },
        "rule" => AdfNode::Rule,
        "table" => AdfNode::Table {
            content: child_nodes(object),
        },
        "tableRow" => AdfNode::TableRow {
            content: child_nodes(object),
        },
        "tableHeader" => AdfNode::TableHeader {
            content: child_nodes(object),
        },
        "tableCell" => AdfNode::TableCell {
            content: child_nodes(object),
        },
        "text" => AdfNode::Text {
            text: object
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            marks: classify_marks(object),
        },
        "hardBreak" => AdfNode::HardBreak,
        "mention" => AdfNode::Mention {
            text: attr_str(object, "text").unwrap_or("").to_string(),
        },
        "emoji" => AdfNode::Emoji {
            text: attr_str(object, "text")
                .or_else(|| attr_str(object, "shortName"))
                .unwrap_or("")
                .to_string(),
        },
        "inlineCard" => match attr_str(object, "url") {
            Some(url) => AdfNode::InlineCard {
                url: url.to_string(),
            },
            None => return degrade(kind, value),
        },
        other => return degrade(other, value),
    };
    Some(node)
}

/// Keep what an unsupported node says even though its kind is unknown.
fn degrade(kind: &str, value: &Value) -> Option<AdfNode> {
    log::warn!("unsupported document node '{kind}' degraded to text");
    let text = flatten_text(value);
    if text.is_empty() {
        None
    } else {
        Some(AdfNode::Unknown { text })
    }
}

/// Concatenate the text leaves under a raw node, in document order.
fn flatten_text(value: &Value) -> String {
    let mut out = String::new();
    collect_text(value, &mut out);
    out
}

fn collect_text(value: &Value, out: &mut String) {
    let Some(object) = value.as_object() else {
        return;
    };
    if let Some(text) = object.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }
    if let Some(children) = object.get("content").and_then(Value::as_array) {
        for child in children {
            collect_text(child, out);
        }
    }
}

fn classify_marks(object: &Map<String, Value>) -> Vec<AdfMark> {
    let Some(marks) = object.get("marks").and_then(Value::as_array) else {
        return Vec::new();
    };
    marks.iter().map(classify_mark).collect()
}

fn classify_mark(value: &Value) -> AdfMark {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
    match kind {
        "strong" => AdfMark::Strong,
        "em" => AdfMark::Em,
        "code" => AdfMark::Code,
        "strike" => AdfMark::Strike,
        "link" => match value
            .get("attrs")
            .and_then(|attrs| attrs.get("href"))
            .and_then(Value::as_str)
        {
            Some(href) => AdfMark::Link {
                href: href.to_string(),
            },
            None => AdfMark::Unknown,
        },
        other => {
            log::debug!("ignoring unsupported text mark '{other}'");
            AdfMark::Unknown
        }
    }
}

fn child_nodes(object: &Map<String, Value>) -> Vec<AdfNode> {
    object
        .get("content")
        .and_then(Value::as_array)
        .map(|values| classify_nodes(values))
        .unwrap_or_default()
}

fn attr_str<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    object.get("attrs")?.get(name)?.as_str()
}

fn attr_u64(object: &Map<String, Value>, name: &str) -> Option<u64> {
    object.get("attrs")?.get(name)?.as_u64()
}
