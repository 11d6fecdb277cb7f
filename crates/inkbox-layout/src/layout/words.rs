//! Splitting text runs into line-breakable words.
//!
//! [CSS Text Level 3 § 4 White Space Processing](https://www.w3.org/TR/css-text-3/#white-space-processing)
//!
//! A text box's raw payload is cut into [`Word`]s: printable runs, space
//! runs, forced line breaks and tabs. The line breaker only ever breaks
//! between words, so everything it needs to know about white space is
//! decided here and in the owning box's [`WhiteSpace`] policy.

use serde::Serialize;

use crate::box_tree::BoxId;
use crate::style::WhiteSpace;

/// Bell character, a legacy marker for a forced line break.
const BELL: char = '\u{7}';

/// What a [`Word`] represents to the line breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WordKind {
    /// A run of non-white-space characters.
    Printable,
    /// A run of spaces; a soft wrap opportunity when its box wraps.
    Space,
    /// A forced line break. Never drawn.
    LineBreak,
    /// A single tab.
    Tab,
}

/// An indivisible layout token.
///
/// Payloads of the control kinds are fixed: `"\n"` for a line break and
/// `"\t"` for a tab. A space run is `" "` when its box collapses white
/// space and the full run of spaces otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    text: String,
    kind: WordKind,
    box_id: BoxId,
}

impl Word {
    /// The word's characters.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the word represents.
    #[must_use]
    pub const fn kind(&self) -> WordKind {
        self.kind
    }

    /// The text box the word came from, used to look up its style.
    #[must_use]
    pub const fn box_id(&self) -> BoxId {
        self.box_id
    }

    /// True for spaces and tabs.
    #[must_use]
    pub const fn is_white_space(&self) -> bool {
        matches!(self.kind, WordKind::Space | WordKind::Tab)
    }

    /// True for forced line breaks.
    #[must_use]
    pub const fn is_line_break(&self) -> bool {
        matches!(self.kind, WordKind::LineBreak)
    }
}

/// Splits one text box's payload into words using the box's white space rules.
///
/// ```
/// use inkbox_layout::{BoxId, WhiteSpace, WordSplitter};
///
/// let words = WordSplitter::new(BoxId(1), "a   b\n", WhiteSpace::Normal).split();
/// let texts: Vec<&str> = words.iter().map(|word| word.text()).collect();
/// assert_eq!(texts, ["a", " ", "b", "\n"]);
/// ```
#[derive(Debug)]
pub struct WordSplitter {
    box_id: BoxId,
    text: String,
    white_space: WhiteSpace,
    words: Vec<Word>,
    current: String,
}

impl WordSplitter {
    /// Prepare to split `text`. Carriage returns are removed up front.
    #[must_use]
    pub fn new(box_id: BoxId, text: &str, white_space: WhiteSpace) -> Self {
        Self {
            box_id,
            text: text.replace('\r', ""),
            white_space,
            words: Vec::new(),
            current: String::new(),
        }
    }

    /// The text that will be split, with carriage returns removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Split the text into words in a single left-to-right scan.
    ///
    /// Every transition between white space and printable characters cuts
    /// the current word. Line breaks (`\n` and the bell character) and tabs
    /// are cut on both sides, so each one is a word of its own whatever the
    /// collapsing policy. Consecutive spaces accumulate into one space word.
    #[must_use]
    pub fn split(mut self) -> Vec<Word> {
        let text = std::mem::take(&mut self.text);
        let Some(first) = text.chars().next() else {
            return self.words;
        };

        let collapses = self.white_space.collapses_white_space();
        let mut on_space = is_space(first);

        for ch in text.chars() {
            if is_line_break(ch) || ch == '\t' {
                self.cut();
                self.current.push(if ch == '\t' { '\t' } else { '\n' });
                self.cut();
                on_space = true;
            } else if is_space(ch) {
                if !on_space {
                    self.cut();
                }
                if !collapses || self.current.is_empty() {
                    self.current.push(' ');
                }
                on_space = true;
            } else {
                if on_space {
                    self.cut();
                }
                self.current.push(ch);
                on_space = false;
            }
        }

        self.cut();
        self.words
    }

    /// Emit the accumulated word, if any, and start a new one.
    fn cut(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current);
        let kind = match text.as_str() {
            "\n" => WordKind::LineBreak,
            "\t" => WordKind::Tab,
            _ if text.starts_with(' ') => WordKind::Space,
            _ => WordKind::Printable,
        };
        self.words.push(Word {
            text,
            kind,
            box_id: self.box_id,
        });
    }
}

/// Split `text` belonging to `box_id` under the given policy.
#[must_use]
pub fn split_words(box_id: BoxId, text: &str, white_space: WhiteSpace) -> Vec<Word> {
    WordSplitter::new(box_id, text, white_space).split()
}

/// The text extraction step that runs before splitting.
///
/// Removes carriage returns and, when the policy eliminates line breaks,
/// turns source newlines into ordinary spaces, so the splitter's forced
/// break rule only fires for breaks the policy preserves. The bell
/// character is left alone: it marks an explicit break (such as `<br>`)
/// under every policy.
#[must_use]
pub fn normalize_source_text(text: &str, white_space: WhiteSpace) -> String {
    let eliminates = white_space.eliminates_line_breaks();
    text.chars()
        .filter(|&ch| ch != '\r')
        .map(|ch| if eliminates && ch == '\n' { ' ' } else { ch })
        .collect()
}

const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | BELL)
}

/// Collapsible white space other than breaks and tabs.
///
/// No-break spaces are printable: they must never become wrap opportunities.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{a0}' | '\u{2007}' | '\u{202f}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, white_space: WhiteSpace) -> Vec<WordKind> {
        split_words(BoxId(0), text, white_space)
            .iter()
            .map(Word::kind)
            .collect()
    }

    #[test]
    fn test_space_next_to_break_is_cut() {
        assert_eq!(
            kinds("a \n b", WhiteSpace::PreLine),
            [
                WordKind::Printable,
                WordKind::Space,
                WordKind::LineBreak,
                WordKind::Space,
                WordKind::Printable,
            ]
        );
    }

    #[test]
    fn test_no_break_space_is_printable() {
        let words = split_words(BoxId(0), "a\u{a0}b", WhiteSpace::Normal);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "a\u{a0}b");
    }

    #[test]
    fn test_normalize_keeps_bell() {
        assert_eq!(
            normalize_source_text("a\r\nb\u{7}c", WhiteSpace::Normal),
            "a b\u{7}c"
        );
        assert_eq!(normalize_source_text("a\r\nb", WhiteSpace::Pre), "a\nb");
    }
}
