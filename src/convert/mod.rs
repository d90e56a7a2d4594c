mod adf;
mod markup;
mod render;

pub use adf::{AdfDoc, AdfMark, AdfNode, classify_document};
pub use markup::{Block, Inline, TaskItem, lower_document};
pub use render::{MarkdownExtensions, to_markdown};

use serde_json::Value;

/// Convert a raw Jira description document into GitHub-flavored Markdown.
///
/// `None` means the issue has no usable description: the field was absent,
/// or its value is not an ADF document. That stays distinct from
/// `Some("")`, a present-but-empty document. Unknown constructs inside a
/// valid document degrade to their text content; conversion never fails.
pub fn document_to_markdown(value: Option<&Value>) -> Option<String> {
    let doc = classify_document(value?)?;
    let blocks = lower_document(&doc);
    Some(to_markdown(&blocks, MarkdownExtensions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_description_converts_to_none() {
        assert_eq!(document_to_markdown(None), None);
    }

    #[test]
    fn non_document_values_convert_to_none() {
        assert_eq!(document_to_markdown(Some(&json!("legacy plain text"))), None);
        assert_eq!(document_to_markdown(Some(&json!(null))), None);
        assert_eq!(document_to_markdown(Some(&json!({ "content": [] }))), None);
    }

    #[test]
    fn empty_document_converts_to_an_empty_string() {
        let doc = json!({ "type": "doc", "version": 1, "content": [] });
        assert_eq!(document_to_markdown(Some(&doc)).as_deref(), Some(""));
    }

    #[test]
    fn document_converts_to_markdown() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 2 },
                    "content": [{ "type": "text", "text": "Context" }]
                },
                {
                    "type": "paragraph",
                    "content": [
                        { "type": "text", "text": "The deploy is " },
                        { "type": "text", "text": "red", "marks": [{ "type": "strong" }] },
                        { "type": "text", "text": " since " },
                        { "type": "text", "text": "v2.1", "marks": [{ "type": "code" }] },
                        { "type": "text", "text": "." }
                    ]
                },
                {
                    "type": "bulletList",
                    "content": [
                        {
                            "type": "listItem",
                            "content": [{
                                "type": "paragraph",
                                "content": [{ "type": "text", "text": "roll back" }]
                            }]
                        },
                        {
                            "type": "listItem",
                            "content": [{
                                "type": "paragraph",
                                "content": [{ "type": "text", "text": "page the on-call" }]
                            }]
                        }
                    ]
                },
                {
                    "type": "codeBlock",
                    "attrs": { "language": "shell" },
                    "content": [{ "type": "text", "text": "cargo deploy --env prod" }]
                },
                { "type": "rule" },
                {
                    "type": "paragraph",
                    "content": [
                        {
                            "type": "text",
                            "text": "runbook",
                            "marks": [{ "type": "link", "attrs": { "href": "https://example.com/rb" } }]
                        },
                        { "type": "text", "text": " filed by " },
                        { "type": "mention", "attrs": { "id": "5b10a", "text": "@Dana" } }
                    ]
                }
            ]
        });
        let markdown = document_to_markdown(Some(&doc)).unwrap();
        assert_eq!(
            markdown,
            "## Context\n\n\
             The deploy is **red** since `v2.1`.\n\n\
             - roll back\n- page the on-call\n\n\
             ```shell\ncargo deploy --env prod\n```\n\n\
             ---\n\n\
             [runbook](https://example.com/rb) filed by @Dana"
        );
    }

    #[test]
    fn unknown_nodes_degrade_to_their_text() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "mediaSingle",
                    "content": [{ "type": "media", "attrs": { "id": "af-1" } }]
                },
                {
                    "type": "paragraph",
                    "content": [
                        { "type": "text", "text": "see " },
                        { "type": "status", "attrs": { "color": "green" },
                          "content": [{ "type": "text", "text": "ON TRACK" }] }
                    ]
                }
            ]
        });
        assert_eq!(
            document_to_markdown(Some(&doc)).as_deref(),
            Some("see ON TRACK")
        );
    }

    #[test]
    fn emoji_and_inline_cards_keep_their_text_forms() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "paragraph",
                "content": [
                    { "type": "text", "text": "ship it " },
                    { "type": "emoji", "attrs": { "shortName": ":rocket:", "text": "🚀" } },
                    { "type": "text", "text": ", details at " },
                    { "type": "inlineCard", "attrs": { "url": "https://example.com/incidents/412" } }
                ]
            }]
        });
        assert_eq!(
            document_to_markdown(Some(&doc)).as_deref(),
            Some("ship it 🚀, details at <https://example.com/incidents/412>")
        );
    }

    #[test]
    fn panels_render_as_quotes() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "panel",
                "attrs": { "panelType": "warning" },
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": "do not merge on Fridays" }]
                }]
            }]
        });
        assert_eq!(
            document_to_markdown(Some(&doc)).as_deref(),
            Some("> do not merge on Fridays")
        );
    }
}
