use crate::convert::adf::{AdfDoc, AdfMark, AdfNode};

/// Block-level construct of the intermediate markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    BulletList(Vec<Vec<Block>>),
    OrderedList(Vec<Vec<Block>>),
    TaskList(Vec<TaskItem>),
    CodeBlock { language: Option<String>, code: String },
    Quote(Vec<Block>),
    Rule,
    /// Rows of single-line cells; the first row renders as the header.
    Table { rows: Vec<Vec<Vec<Inline>>> },
}

/// One entry of a task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem {
    pub done: bool,
    pub content: Vec<Inline>,
}

/// Inline construct of the intermediate markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link { content: Vec<Inline>, href: String },
    Autolink(String),
    HardBreak,
}

/// Lower a classified ADF document into the renderer's markup tree.
pub fn lower_document(doc: &AdfDoc) -> Vec<Block> {
    blocks(&doc.content)
}

fn blocks(nodes: &[AdfNode]) -> Vec<Block> {
    let mut out = Vec::new();
    for node in nodes {
        lower_block(node, &mut out);
    }
    out
}

fn lower_block(node: &AdfNode, out: &mut Vec<Block>) {
    match node {
        AdfNode::Paragraph { content } => {
            out.push(Block::Paragraph(inlines(content)));
        }
        AdfNode::Heading { level, content } => out.push(Block::Heading {
            level: *level,
            content: inlines(content),
        }),
        AdfNode::BulletList { content } => out.push(Block::BulletList(list_items(content))),
        AdfNode::OrderedList { content } => out.push(Block::OrderedList(list_items(content))),
        AdfNode::TaskList { content } => out.push(Block::TaskList(task_items(content))),
        AdfNode::CodeBlock { language, content } => out.push(Block::CodeBlock {
            language: language.clone(),
            code: code_text(content),
        }),
        AdfNode::Blockquote { content } | AdfNode::Panel { content } => {
            out.push(Block::Quote(blocks(content)));
        }
        AdfNode::Expand { title, content } => {
            if let Some(title) = title.as_deref().filter(|title| !title.is_empty()) {
                out.push(Block::Paragraph(vec![Inline::Strong(vec![Inline::Text(
                    title.to_string(),
                )])]));
            }
            out.extend(blocks(content));
        }
        AdfNode::Rule => out.push(Block::Rule),
        AdfNode::Table { content } => {
            let rows = table_rows(content);
            if !rows.is_empty() {
                out.push(Block::Table { rows });
            }
        }
        // Inline or stray node at block position becomes its own paragraph.
        other => {
            let content = inlines(std::slice::from_ref(other));
            if !content.is_empty() {
                out.push(Block::Paragraph(content));
            }
        }
    }
}

fn inlines(nodes: &[AdfNode]) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        lower_inline(node, &mut out);
    }
    out
}

fn lower_inline(node: &AdfNode, out: &mut Vec<Inline>) {
    match node {
        AdfNode::Text { text, marks } => {
            if !text.is_empty() {
                out.push(marked_text(text, marks));
            }
        }
        AdfNode::HardBreak => out.push(Inline::HardBreak),
        AdfNode::Mention { text } | AdfNode::Emoji { text } | AdfNode::Unknown { text } => {
            if !text.is_empty() {
                out.push(Inline::Text(text.clone()));
            }
        }
        AdfNode::InlineCard { url } => out.push(Inline::Autolink(url.clone())),
        AdfNode::Rule => {}
        // Block container at inline position folds its content in.
        other => out.extend(folded_inlines(other.children())),
    }
}

/// Wrap a text run in its marks, the first mark outermost. A code mark
/// wins over the rest: code spans carry no nested styling.
fn marked_text(text: &str, marks: &[AdfMark]) -> Inline {
    if marks.iter().any(|mark| matches!(mark, AdfMark::Code)) {
        return Inline::Code(text.to_string());
    }
    let mut inline = Inline::Text(text.to_string());
    for mark in marks.iter().rev() {
        inline = match mark {
            AdfMark::Strong => Inline::Strong(vec![inline]),
            AdfMark::Em => Inline::Emphasis(vec![inline]),
            AdfMark::Strike => Inline::Strike(vec![inline]),
            AdfMark::Link { href } => Inline::Link {
                content: vec![inline],
                href: href.clone(),
            },
            AdfMark::Code | AdfMark::Unknown => inline,
        };
    }
    inline
}

fn list_items(nodes: &[AdfNode]) -> Vec<Vec<Block>> {
    nodes
        .iter()
        .map(|node| match node {
            AdfNode::ListItem { content } => blocks(content),
            other => blocks(std::slice::from_ref(other)),
        })
        .collect()
}

fn task_items(nodes: &[AdfNode]) -> Vec<TaskItem> {
    nodes
        .iter()
        .map(|node| match node {
            AdfNode::TaskItem { done, content } => TaskItem {
                done: *done,
                content: inlines(content),
            },
            other => TaskItem {
                done: false,
                content: inlines(std::slice::from_ref(other)),
            },
        })
        .collect()
}

fn code_text(nodes: &[AdfNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            AdfNode::Text { text, .. } => out.push_str(text),
            AdfNode::HardBreak => out.push('\n'),
            other => out.push_str(&code_text(other.children())),
        }
    }
    out
}

fn table_rows(nodes: &[AdfNode]) -> Vec<Vec<Vec<Inline>>> {
    nodes
        .iter()
        .filter_map(|node| match node {
            AdfNode::TableRow { content } => Some(table_cells(content)),
            _ => None,
        })
        .collect()
}

fn table_cells(nodes: &[AdfNode]) -> Vec<Vec<Inline>> {
    nodes
        .iter()
        .filter_map(|node| match node {
            AdfNode::TableHeader { content } | AdfNode::TableCell { content } => {
                Some(folded_inlines(content))
            }
            _ => None,
        })
        .collect()
}

/// Flatten sibling nodes to one inline run. Inline runs flow together; a
/// boundary with a block-level sibling gets a single space.
fn folded_inlines(nodes: &[AdfNode]) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut after_block = false;
    for node in nodes {
        let mut part = Vec::new();
        lower_inline(node, &mut part);
        if part.is_empty() {
            continue;
        }
        let block = block_level(node);
        if !out.is_empty() && (block || after_block) {
            out.push(Inline::Text(" ".to_string()));
        }
        out.extend(part);
        after_block = block;
    }
    out
}

fn block_level(node: &AdfNode) -> bool {
    !matches!(
        node,
        AdfNode::Text { .. }
            | AdfNode::HardBreak
            | AdfNode::Mention { .. }
            | AdfNode::Emoji { .. }
            | AdfNode::InlineCard { .. }
            | AdfNode::Unknown { .. }
    )
}
