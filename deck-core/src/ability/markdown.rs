//! Markdown → flat text blocks.
//!
//! Only headings, paragraphs and list items survive. Inline markup is
//! flattened to its text content; code blocks, quotes, tables and raw HTML
//! are dropped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Bullet prefix for unordered list items.
pub const BULLET_PREFIX: &str = "• ";

/// Block category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// Any heading level.
    Heading,
    /// Running text.
    Paragraph,
    /// One list item, prefix included.
    ListItem,
}

/// A flattened block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Category.
    pub kind: BlockKind,
    /// Plain text content.
    pub text: String,
}

impl Block {
    /// Whether this block is set in the header font.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Heading
    }
}

/// Ordered lists count their items from 1 whatever number the source starts at.
struct ListState {
    ordered: bool,
    items: u64,
}

#[derive(Default)]
struct Collector {
    blocks: Vec<Block>,
    lists: Vec<ListState>,
    current: Option<(BlockKind, String)>,
    skip_depth: usize,
}

impl Collector {
    fn open(&mut self, kind: BlockKind, prefix: String) {
        self.flush();
        self.current = Some((kind, prefix));
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.current {
            Some((_, buf)) => buf.push_str(text),
            // Tight list items emit text without a paragraph wrapper.
            None => self.current = Some((BlockKind::Paragraph, text.to_string())),
        }
    }

    fn flush(&mut self) {
        if let Some((kind, text)) = self.current.take() {
            let text = text.trim().to_string();
            if !text.is_empty() {
                self.blocks.push(Block { kind, text });
            }
        }
    }

    fn item_prefix(&mut self) -> String {
        match self.lists.last_mut() {
            Some(list) if list.ordered => {
                list.items += 1;
                format!("{}. ", list.items)
            }
            _ => BULLET_PREFIX.to_string(),
        }
    }
}

fn is_skipped(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::CodeBlock(_) | Tag::BlockQuote(_) | Tag::Table(_) | Tag::HtmlBlock
    )
}

/// Extract the ordered blocks of a markdown document.
///
/// Never fails; unrecognised constructs are skipped.
#[must_use]
pub fn extract_blocks(markdown: &str) -> Vec<Block> {
    let mut c = Collector::default();

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    for event in Parser::new_ext(markdown, options) {
        if c.skip_depth > 0 {
            match event {
                Event::Start(_) => c.skip_depth += 1,
                Event::End(_) => c.skip_depth -= 1,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(tag) if is_skipped(&tag) => {
                c.flush();
                c.skip_depth = 1;
            }
            Event::Start(Tag::Heading { .. }) => c.open(BlockKind::Heading, String::new()),
            Event::Start(Tag::Paragraph) => {
                // Loose list items wrap their text in paragraphs.
                match &c.current {
                    Some((BlockKind::ListItem, text)) => {
                        if !text.ends_with(char::is_whitespace) {
                            c.push_text(" ");
                        }
                    }
                    _ => c.open(BlockKind::Paragraph, String::new()),
                }
            }
            Event::Start(Tag::List(start)) => {
                c.flush();
                c.lists.push(ListState {
                    ordered: start.is_some(),
                    items: 0,
                });
            }
            Event::Start(Tag::Item) => {
                let prefix = c.item_prefix();
                c.open(BlockKind::ListItem, prefix);
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Item) => c.flush(),
            Event::End(TagEnd::Paragraph) => {
                if !matches!(c.current, Some((BlockKind::ListItem, _))) {
                    c.flush();
                }
            }
            Event::End(TagEnd::List(_)) => {
                c.flush();
                c.lists.pop();
            }
            Event::Text(text) | Event::Code(text) => c.push_text(&text),
            Event::SoftBreak | Event::HardBreak => c.push_text(" "),
            _ => {}
        }
    }
    c.flush();
    c.blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(blocks: &[Block]) -> Vec<(BlockKind, &str)> {
        blocks.iter().map(|b| (b.kind, b.text.as_str())).collect()
    }

    #[test]
    fn test_heading_paragraph_and_lists() {
        let md = "# Power\n\nDraw **two** cards.\n\n- one\n- two\n\n3. third\n4. fourth\n";
        let blocks = extract_blocks(md);
        assert_eq!(
            texts(&blocks),
            vec![
                (BlockKind::Heading, "Power"),
                (BlockKind::Paragraph, "Draw two cards."),
                (BlockKind::ListItem, "• one"),
                (BlockKind::ListItem, "• two"),
                (BlockKind::ListItem, "1. third"),
                (BlockKind::ListItem, "2. fourth"),
            ]
        );
    }

    #[test]
    fn test_ordered_lists_count_from_one() {
        let blocks = extract_blocks("5. x\n6. y\n\nbreak\n\n7. z\n");
        assert_eq!(
            texts(&blocks),
            vec![
                (BlockKind::ListItem, "1. x"),
                (BlockKind::ListItem, "2. y"),
                (BlockKind::Paragraph, "break"),
                (BlockKind::ListItem, "1. z"),
            ]
        );
    }

    #[test]
    fn test_skips_code_quotes_and_rules() {
        let md = "Keep\n\n```\nfn main() {}\n```\n\n> quoted\n\n---\n\nAlso keep";
        let blocks = extract_blocks(md);
        assert_eq!(
            texts(&blocks),
            vec![(BlockKind::Paragraph, "Keep"), (BlockKind::Paragraph, "Also keep")]
        );
    }

    #[test]
    fn test_soft_breaks_join_lines() {
        let blocks = extract_blocks("first\nsecond");
        assert_eq!(texts(&blocks), vec![(BlockKind::Paragraph, "first second")]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(extract_blocks("").is_empty());
        assert!(extract_blocks("   \n\n  ").is_empty());
    }

    #[test]
    fn test_pip_tokens_survive() {
        let blocks = extract_blocks("Draw a card. ::suit::");
        assert_eq!(texts(&blocks), vec![(BlockKind::Paragraph, "Draw a card. ::suit::")]);
    }
}
