use crate::convert::markup::{Block, Inline, TaskItem};

/// GitHub-flavored Markdown extensions the serializer may emit.
///
/// Disabling one degrades the construct to its closest plain form rather
/// than dropping content: strikethrough to plain text, task items to
/// plain list items, autolinks to inline links, tables to paragraph rows.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownExtensions {
    pub tables: bool,
    pub strikethrough: bool,
    pub task_lists: bool,
    pub autolinks: bool,
}

impl Default for MarkdownExtensions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            task_lists: true,
            autolinks: true,
        }
    }
}

/// Serialize a markup tree. Blocks are separated by one blank line; the
/// result carries no trailing newline.
pub fn to_markdown(blocks: &[Block], extensions: MarkdownExtensions) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, extensions))
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block, extensions: MarkdownExtensions) -> String {
    match block {
        Block::Paragraph(content) => render_inlines(content, extensions),
        Block::Heading { level, content } => {
            let text = single_line(&render_inlines(content, extensions));
            format!("{} {text}", "#".repeat(usize::from(*level)))
        }
        Block::BulletList(items) => render_list(items, extensions, |_| "- ".to_string()),
        Block::OrderedList(items) => {
            render_list(items, extensions, |index| format!("{}. ", index + 1))
        }
        Block::TaskList(items) => render_task_list(items, extensions),
        Block::CodeBlock { language, code } => {
            let fence = code_fence(code);
            let info = language.as_deref().unwrap_or("");
            let body = code.strip_suffix('\n').unwrap_or(code);
            format!("{fence}{info}\n{body}\n{fence}")
        }
        Block::Quote(content) => quote_prefixed(&to_markdown(content, extensions)),
        Block::Rule => "---".to_string(),
        Block::Table { rows } => render_table(rows, extensions),
    }
}

fn render_list<F>(items: &[Vec<Block>], extensions: MarkdownExtensions, marker_for: F) -> String
where
    F: Fn(usize) -> String,
{
    let mut rendered = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let marker = marker_for(index);
        let indent = " ".repeat(marker.len());
        let body = to_markdown(item, extensions);
        let mut lines = body.lines();
        let mut entry = marker;
        entry.push_str(lines.next().unwrap_or(""));
        for line in lines {
            entry.push('\n');
            if !line.is_empty() {
                entry.push_str(&indent);
                entry.push_str(line);
            }
        }
        rendered.push(entry);
    }
    rendered.join("\n")
}

fn render_task_list(items: &[TaskItem], extensions: MarkdownExtensions) -> String {
    items
        .iter()
        .map(|item| {
            let text = single_line(&render_inlines(&item.content, extensions));
            if extensions.task_lists {
                let state = if item.done { "x" } else { " " };
                format!("- [{state}] {text}")
            } else {
                format!("- {text}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(rows: &[Vec<Vec<Inline>>], extensions: MarkdownExtensions) -> String {
    if !extensions.tables {
        return rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| single_line(&render_inlines(cell, extensions)))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        let cells = (0..columns)
            .map(|column| {
                row.get(column)
                    .map(|cell| cell_text(cell, extensions))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            lines.push(format!("|{}", " --- |".repeat(columns)));
        }
    }
    lines.join("\n")
}

/// Cells are single-line; GFM additionally wants pipes escaped, which it
/// honors even inside code spans.
fn cell_text(cell: &[Inline], extensions: MarkdownExtensions) -> String {
    single_line(&render_inlines(cell, extensions)).replace('|', "\\|")
}

fn render_inlines(inlines: &[Inline], extensions: MarkdownExtensions) -> String {
    let mut out = String::new();
    for inline in inlines {
        render_inline(inline, extensions, &mut out);
    }
    out
}

fn render_inline(inline: &Inline, extensions: MarkdownExtensions, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::Strong(content) => delimited(out, "**", content, extensions),
        Inline::Emphasis(content) => delimited(out, "*", content, extensions),
        Inline::Strike(content) => {
            if extensions.strikethrough {
                delimited(out, "~~", content, extensions);
            } else {
                for child in content {
                    render_inline(child, extensions, out);
                }
            }
        }
        Inline::Code(code) => out.push_str(&code_span(code)),
        Inline::Link { content, href } => {
            out.push('[');
            for child in content {
                render_inline(child, extensions, out);
            }
            out.push_str("](");
            out.push_str(href);
            out.push(')');
        }
        Inline::Autolink(url) => {
            if extensions.autolinks {
                out.push('<');
                out.push_str(url);
                out.push('>');
            } else {
                out.push('[');
                out.push_str(url);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
        }
        Inline::HardBreak => out.push_str("\\\n"),
    }
}

fn delimited(
    out: &mut String,
    delimiter: &str,
    content: &[Inline],
    extensions: MarkdownExtensions,
) {
    out.push_str(delimiter);
    for child in content {
        render_inline(child, extensions, out);
    }
    out.push_str(delimiter);
}

/// Backtick-delimit a code span, growing the delimiter past any backtick
/// run in the content and padding when the content touches the delimiter.
fn code_span(code: &str) -> String {
    let longest = longest_backtick_run(code);
    if longest == 0 && !code.starts_with(' ') && !code.ends_with(' ') {
        return format!("`{code}`");
    }
    let delimiter = "`".repeat(longest + 1);
    format!("{delimiter} {code} {delimiter}")
}

fn code_fence(code: &str) -> String {
    "`".repeat(longest_backtick_run(code).max(2) + 1)
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

fn quote_prefixed(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse rendered line breaks for constructs that must stay on one
/// line (headings, list entries, table cells).
fn single_line(text: &str) -> String {
    text.replace("\\\n", " ").replace('\n', " ")
}
