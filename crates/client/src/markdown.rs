//! Markdown rendering for tutor answers.
//!
//! Answers use a small Markdown subset: headings, paragraphs, bullet and
//! numbered lists, fenced code, rules, and bold/italic/code inline spans.
//! [`render`] flattens that into [`Block`]s which [`to_terminal`] and
//! [`to_plain`] turn into text.

use colored::Colorize;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

pub const BULLET: &str = "•";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn same_style(&self, other: &Span) -> bool {
        self.strong == other.strong && self.emphasis == other.emphasis && self.code == other.code
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    /// `marker` is `•` or `N.`; continuation paragraphs of the same item
    /// carry an empty marker.
    ListItem {
        marker: String,
        depth: usize,
        spans: Vec<Span>,
    },
    CodeBlock { language: Option<String>, code: String },
    Rule,
}

struct PendingItem {
    marker: String,
    depth: usize,
    emitted: bool,
}

#[derive(Default)]
struct Renderer {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    lists: Vec<Option<u64>>,
    items: Vec<PendingItem>,
    code: Option<(Option<String>, String)>,
}

impl Renderer {
    fn push_text(&mut self, text: &str, code: bool) {
        if let Some((_, buffer)) = self.code.as_mut() {
            buffer.push_str(text);
            return;
        }

        let span = Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
        };
        match self.spans.last_mut() {
            Some(last) if last.same_style(&span) => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    fn take_spans(&mut self) -> Vec<Span> {
        let mut spans = std::mem::take(&mut self.spans);
        if let Some(first) = spans.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = spans.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        spans.retain(|span| !span.text.is_empty());
        spans
    }

    fn flush_item(&mut self) {
        let spans = self.take_spans();
        let Some(item) = self.items.last_mut() else {
            if !spans.is_empty() {
                self.blocks.push(Block::Paragraph(spans));
            }
            return;
        };
        if spans.is_empty() && item.emitted {
            return;
        }

        let marker = if item.emitted {
            String::new()
        } else {
            item.marker.clone()
        };
        item.emitted = true;
        self.blocks.push(Block::ListItem {
            marker,
            depth: item.depth,
            spans,
        });
    }

    fn next_marker(&mut self) -> String {
        match self.lists.last_mut() {
            Some(Some(number)) => {
                let marker = format!("{number}.");
                *number += 1;
                marker
            }
            _ => BULLET.to_string(),
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) | Event::Start(Tag::Heading { .. }) => {
                if !self.items.is_empty() {
                    self.flush_item();
                }
                self.spans.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                if self.items.is_empty() {
                    let spans = self.take_spans();
                    if !spans.is_empty() {
                        self.blocks.push(Block::Paragraph(spans));
                    }
                } else {
                    self.flush_item();
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                let spans = self.take_spans();
                self.blocks.push(Block::Heading {
                    level: level as u8,
                    spans,
                });
            }
            Event::Start(Tag::List(start)) => {
                if !self.items.is_empty() {
                    self.flush_item();
                }
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => {
                let marker = self.next_marker();
                let depth = self.lists.len().saturating_sub(1);
                self.items.push(PendingItem {
                    marker,
                    depth,
                    emitted: false,
                });
            }
            Event::End(TagEnd::Item) => {
                self.flush_item();
                self.items.pop();
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                if !self.items.is_empty() {
                    self.flush_item();
                }
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string)
                        .filter(|language| !language.is_empty()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock {
                        language,
                        code: code.trim_end_matches('\n').to_string(),
                    });
                }
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Text(text) => self.push_text(&text, false),
            Event::Code(code) => self.push_text(&code, true),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => self.blocks.push(Block::Rule),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_item();
        self.blocks
    }
}

/// Parses Markdown into renderable blocks.
pub fn render(markdown: &str) -> Vec<Block> {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        renderer.handle(event);
    }
    renderer.finish()
}

/// ANSI-coloured text for a terminal.
pub fn to_terminal(blocks: &[Block]) -> String {
    join_blocks(blocks, |block| match block {
        Block::Heading { level, spans } => {
            let text = spans_plain(spans);
            if *level <= 1 {
                text.bold().underline().cyan().to_string()
            } else {
                text.bold().cyan().to_string()
            }
        }
        Block::Paragraph(spans) => spans_terminal(spans),
        Block::ListItem {
            marker,
            depth,
            spans,
        } => format!(
            "{}{} {}",
            indent(*depth),
            marker_padding(marker).green(),
            spans_terminal(spans)
        ),
        Block::CodeBlock { code, .. } => code
            .lines()
            .map(|line| format!("    {}", line.yellow()))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Rule => "─".repeat(40).dimmed().to_string(),
    })
}

/// Uncoloured text, e.g. for piping or logs.
pub fn to_plain(blocks: &[Block]) -> String {
    join_blocks(blocks, |block| match block {
        Block::Heading { spans, .. } | Block::Paragraph(spans) => spans_plain(spans),
        Block::ListItem {
            marker,
            depth,
            spans,
        } => format!(
            "{}{} {}",
            indent(*depth),
            marker_padding(marker),
            spans_plain(spans)
        ),
        Block::CodeBlock { code, .. } => code
            .lines()
            .map(|line| format!("    {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Rule => "─".repeat(40),
    })
}

fn join_blocks(blocks: &[Block], mut format_block: impl FnMut(&Block) -> String) -> String {
    let mut output = String::new();
    let mut previous: Option<&Block> = None;

    for block in blocks {
        if let Some(previous) = previous {
            let both_items = matches!(previous, Block::ListItem { .. })
                && matches!(block, Block::ListItem { .. });
            output.push_str(if both_items { "\n" } else { "\n\n" });
        }
        output.push_str(&format_block(block));
        previous = Some(block);
    }

    output
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn marker_padding(marker: &str) -> String {
    if marker.is_empty() {
        " ".to_string()
    } else {
        marker.to_string()
    }
}

fn spans_plain(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

fn spans_terminal(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            let mut styled = span.text.normal();
            if span.code {
                styled = styled.yellow();
            }
            if span.strong {
                styled = styled.bold();
            }
            if span.emphasis {
                styled = styled.italic();
            }
            styled.to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "\
## Photosynthesis

Plants make **food** using *sunlight* and `CO2`.

1. Light is absorbed
2. Water is split

- Oxygen is released
  - into the air

---

```python
print(\"hello\")
```
";

    #[test]
    fn renders_headings_lists_code_and_rules() {
        let blocks = render(ANSWER);

        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 2,
                spans: vec![Span::plain("Photosynthesis")]
            }
        );
        assert!(matches!(&blocks[1], Block::Paragraph(spans) if spans.len() == 7));

        let items: Vec<(&str, usize)> = blocks
            .iter()
            .filter_map(|block| match block {
                Block::ListItem { marker, depth, .. } => Some((marker.as_str(), *depth)),
                _ => None,
            })
            .collect();
        assert_eq!(
            items,
            vec![("1.", 0), ("2.", 0), (BULLET, 0), (BULLET, 1)]
        );

        assert!(blocks.contains(&Block::Rule));
        assert_eq!(
            blocks.last(),
            Some(&Block::CodeBlock {
                language: Some("python".into()),
                code: "print(\"hello\")".into()
            })
        );
    }

    #[test]
    fn inline_spans_keep_their_styles() {
        let blocks = render("Use **bold** and *italic* and `code`.");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph, got {blocks:?}");
        };

        let strong = spans.iter().find(|span| span.strong).expect("bold span");
        assert_eq!(strong.text, "bold");
        let emphasis = spans.iter().find(|span| span.emphasis).expect("italic span");
        assert_eq!(emphasis.text, "italic");
        let code = spans.iter().find(|span| span.code).expect("code span");
        assert_eq!(code.text, "code");
    }

    #[test]
    fn ordered_lists_respect_start_number() {
        let blocks = render("3. three\n4. four\n");
        assert!(matches!(&blocks[0], Block::ListItem { marker, .. } if marker == "3."));
        assert!(matches!(&blocks[1], Block::ListItem { marker, .. } if marker == "4."));
    }

    #[test]
    fn plain_output_is_readable() {
        let plain = to_plain(&render(ANSWER));
        assert!(plain.starts_with("Photosynthesis\n\nPlants make food using sunlight and CO2."));
        assert!(plain.contains("1. Light is absorbed\n2. Water is split"));
        assert!(plain.contains("  • into the air"));
        assert!(plain.contains("    print(\"hello\")"));
    }

    #[test]
    fn terminal_output_keeps_the_text() {
        let output = to_terminal(&render("# Title\n\nSome **bold** words"));
        assert!(output.contains("Title"));
        assert!(output.contains("bold"));
        assert!(output.contains("words"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render("").is_empty());
        assert_eq!(to_plain(&[]), "");
    }
}
