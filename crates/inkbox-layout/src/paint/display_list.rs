//! Display List - a recorded sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! A [`DisplayList`] is a [`Surface`] that remembers what it was asked to
//! draw instead of drawing it. Two paints of the same layout produce equal
//! lists, which makes it the natural target for tests and for replaying a
//! paint onto another surface later.

use serde::Serialize;

use crate::layout::box_model::{Point, Rect};
use crate::style::{ColorValue, FontDescriptor};

use super::Surface;

/// A single drawing command.
///
/// Commands are recorded in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    ///
    /// Used for backgrounds, borders and text decorations.
    FillRect {
        /// Area to fill, already clipped.
        rect: Rect,
        /// Fill color.
        color: ColorValue,
    },

    /// Draw a run of text.
    DrawText {
        /// The characters to draw.
        text: String,
        /// Left end of the baseline.
        origin: Point,
        /// Font to draw with.
        font: FontDescriptor,
        /// Text color.
        color: ColorValue,
        /// Area outside of which nothing may be drawn.
        clip: Option<Rect>,
    },
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every `DrawText` command, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::DrawText { text, .. } => Some(text.as_str()),
                DisplayCommand::FillRect { .. } => None,
            })
            .collect()
    }

    /// Execute every command against another surface.
    pub fn replay(&self, surface: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DisplayCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                DisplayCommand::DrawText {
                    text,
                    origin,
                    font,
                    color,
                    clip,
                } => surface.draw_text(text, *origin, font, *color, *clip),
            }
        }
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: ColorValue) {
        self.push(DisplayCommand::FillRect { rect, color });
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontDescriptor,
        color: ColorValue,
        clip: Option<Rect>,
    ) {
        self.push(DisplayCommand::DrawText {
            text: text.to_string(),
            origin,
            font: font.clone(),
            color,
            clip,
        });
    }
}
