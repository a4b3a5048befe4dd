//! Text measurement over a decoded font.
//!
//! One linear pass over the input: each glyph contributes its advance
//! plus the kerning against the previous codepoint, `\n` (and a `\r`
//! not followed by `\n`) closes the current line, and an optional
//! maximum width soft-wraps a line *before* the glyph that would reach
//! it. Line heights grow with tall glyphs but a post-pass pins every
//! line except the last back to the font's line height — inter-line
//! spacing is fixed, only the final line's visible extent may exceed it.

use crate::error::{ErrorKind, FontError, FontResult};
use crate::font::Font;

/// A measured text block, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Font {
    /// Measure `text` without wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingCharacter`] if `text` contains a
    /// codepoint the font does not define.
    pub fn measure(&self, text: &str) -> FontResult<Size> {
        self.measure_wrapped(text, None)
    }

    /// Measure `text`, soft-wrapping at `max_width` pixels when given.
    ///
    /// A glyph whose kerning-adjusted advance would make the current
    /// line reach or exceed the limit starts a new line instead; the
    /// glyph itself is never split or dropped. An empty `text` measures
    /// as a zero size.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingCharacter`] if `text` contains a
    /// codepoint the font does not define.
    pub fn measure_wrapped(&self, text: &str, max_width: Option<i32>) -> FontResult<Size> {
        if text.is_empty() {
            return Ok(Size::default());
        }

        let chars: Vec<char> = text.chars().collect();
        let mut previous = u32::from(' ');
        let mut line_width = 0;
        let mut line_height = self.line_height;
        let mut block_width = 0;
        let mut line_heights = Vec::new();

        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' || c == '\r' {
                // A "\r\n" pair closes once, on the '\n'.
                if c == '\n' || i + 1 == chars.len() || chars[i + 1] != '\n' {
                    line_heights.push(line_height);
                    block_width = block_width.max(line_width);
                    line_width = 0;
                    line_height = self.line_height;
                }
                continue;
            }

            let codepoint = u32::from(c);
            let Some(data) = self.characters.get(&codepoint) else {
                return Err(FontError::new(
                    ErrorKind::MissingCharacter,
                    format!("no character entry for {c:?}"),
                ));
            };
            let width = data.xadvance + self.kerning(previous, codepoint);

            if let Some(limit) = max_width {
                if line_width + width >= limit {
                    line_heights.push(line_height);
                    block_width = block_width.max(line_width);
                    line_width = 0;
                    line_height = self.line_height;
                }
            }

            line_width += width;
            line_height = line_height.max(data.height + data.yoffset);
            previous = codepoint;
        }

        // The trailing line, if it has any height.
        if line_height != 0 {
            line_heights.push(line_height);
        }

        let last = line_heights.len().saturating_sub(1);
        for h in &mut line_heights[..last] {
            *h = self.line_height;
        }

        Ok(Size {
            width: block_width.max(line_width),
            height: line_heights.iter().sum(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Character;

    /// Line height 20; 'A' and 'B' advance 10, height 16, yoffset 2;
    /// 'T' is taller than the line; kerning (A,B) = -1.
    fn test_font() -> Font {
        let mut font = Font {
            line_height: 20,
            ..Font::default()
        };
        for cp in [u32::from('A'), u32::from('B'), u32::from(' ')] {
            font.characters.insert(
                cp,
                Character {
                    codepoint: cp,
                    width: 8,
                    height: 16,
                    yoffset: 2,
                    xadvance: 10,
                    ..Character::default()
                },
            );
        }
        font.characters.insert(
            u32::from('T'),
            Character {
                codepoint: u32::from('T'),
                width: 8,
                height: 26,
                yoffset: 2,
                xadvance: 10,
                ..Character::default()
            },
        );
        font.kernings.insert((u32::from('A'), u32::from('B')), -1);
        font
    }

    #[test]
    fn unbounded_single_line() {
        let size = test_font().measure("AAA").unwrap();
        assert_eq!(size, Size::new(30, 20));
    }

    #[test]
    fn wrapping_at_max_width() {
        // "AAA" at limit 25 wraps into "AA" (20) and "A" (10).
        let size = test_font().measure_wrapped("AAA", Some(25)).unwrap();
        assert_eq!(size, Size::new(20, 40));
    }

    #[test]
    fn kerning_adjusts_advance() {
        let font = test_font();
        assert_eq!(font.measure("AB").unwrap().width, 19);
        // No pair defined for (B, A).
        assert_eq!(font.measure("BA").unwrap().width, 20);
    }

    #[test]
    fn kerning_not_applied_at_text_start() {
        // The previous codepoint starts as space, which has no pairs.
        let font = test_font();
        assert_eq!(font.measure("B").unwrap().width, 10);
    }

    #[test]
    fn newline_splits_lines() {
        let size = test_font().measure("AA\nA").unwrap();
        assert_eq!(size, Size::new(20, 40));
    }

    #[test]
    fn crlf_counts_as_one_break() {
        let font = test_font();
        assert_eq!(
            font.measure("AA\r\nA").unwrap(),
            font.measure("AA\nA").unwrap()
        );
    }

    #[test]
    fn lone_cr_breaks_a_line() {
        let font = test_font();
        assert_eq!(
            font.measure("AA\rA").unwrap(),
            font.measure("AA\nA").unwrap()
        );
    }

    #[test]
    fn trailing_newline_adds_an_empty_line() {
        let font = test_font();
        let size = font.measure("A\n").unwrap();
        assert_eq!(size.height, 40);
        assert_eq!(size.width, 10);
    }

    #[test]
    fn empty_text_is_zero_sized() {
        assert_eq!(test_font().measure("").unwrap(), Size::default());
    }

    #[test]
    fn missing_codepoint_is_an_error() {
        let err = test_font().measure("AZ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingCharacter);
    }

    #[test]
    fn tall_glyph_raises_only_the_last_line() {
        let font = test_font();
        // 'T' is 28 tall with offset; on the first of two lines its
        // height is pinned back to the line height.
        let wrapped = font.measure("T\nA").unwrap();
        assert_eq!(wrapped.height, 20 + 20);
        // On the last line the computed height survives.
        let last = font.measure("A\nT").unwrap();
        assert_eq!(last.height, 20 + 28);
    }

    #[test]
    fn space_advances_without_kerning() {
        let font = test_font();
        assert_eq!(font.measure("A A").unwrap().width, 30);
    }
}
