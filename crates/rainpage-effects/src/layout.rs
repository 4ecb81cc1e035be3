//! Row layout of the page for a given content width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::Document;

/// Blank rows between consecutive elements.
pub const BLOCK_GAP: u32 = 1;

/// Where one element sits on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub top: u32,
    pub height: u32,
    pub lines: Vec<String>,
}

impl Block {
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Blocks for every element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    width: u16,
    blocks: Vec<Block>,
    total_height: u32,
}

impl PageLayout {
    pub fn compute(document: &Document, width: u16) -> Self {
        let mut top = 0;
        let mut blocks = Vec::with_capacity(document.len());
        for element in document.elements() {
            let lines = wrap(&element.text, width);
            let height = (lines.len() as u32).max(1);
            blocks.push(Block { top, height, lines });
            top += height + BLOCK_GAP;
        }
        Self {
            width,
            total_height: top.saturating_sub(BLOCK_GAP),
            blocks,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn total_height(&self) -> u32 {
        self.total_height
    }
}

/// Greedy word wrap by display width. Words wider than the line are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let needed = if line.is_empty() {
                word_width
            } else {
                line_width + 1 + word_width
            };
            if needed <= width {
                if !line.is_empty() {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(word);
                line_width += word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if line_width + w > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) && lines.len() > 1 {
        lines.pop();
    }
    lines
}
