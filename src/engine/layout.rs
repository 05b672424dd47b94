//! Lays a text message out onto a grid.

use tracing::trace;

use crate::{
    Grid, Pos2,
    glyph::{self, GLYPH_ADVANCE},
};

/// Longest line, in characters, the greedy packer aims for
pub const MAX_LINE_LENGTH: usize = 15;
/// Rows between the tops of two consecutive lines
pub const LINE_HEIGHT: usize = 10;
/// Smallest row the first line may start on
pub const MIN_TOP_MARGIN: usize = 10;

/// Greedily packs the whitespace separated words of `message` into lines
///
/// Every word counts its length plus one separator. A word that would push
/// the running count past [`MAX_LINE_LENGTH`] starts a new line. The line
/// being closed may be empty: an overlong first word is preceded by a blank
/// line, which still counts toward the block height.
pub fn split_into_lines(message: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for word in message.split_whitespace() {
        let word_len = word.chars().count();
        if current_len + word_len > MAX_LINE_LENGTH {
            lines.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(word);
        current_len += word_len + 1;
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Renders `message` centered on a fresh `width` x `height` grid
///
/// The text block is centered vertically but never starts above row
/// [`MIN_TOP_MARGIN`]. Each line is centered on its own. Glyph cells that
/// land outside the grid are dropped.
pub fn compose(width: usize, height: usize, message: &str) -> Grid {
    let mut grid = Grid::new(width, height);
    let lines = split_into_lines(message);

    let block_height = (lines.len() * LINE_HEIGHT) as i64;
    let start_row = (MIN_TOP_MARGIN as i64).max((height as i64 - block_height).div_euclid(2));

    for (line_idx, line) in lines.iter().enumerate() {
        let line_width = (line.chars().count() * GLYPH_ADVANCE) as i64;
        let start_col = (width as i64 - line_width).div_euclid(2).max(0);
        let top = start_row + (line_idx * LINE_HEIGHT) as i64;
        trace!(line = %line, row = top, col = start_col, "placing line");

        for (char_idx, c) in line.chars().enumerate() {
            let origin = Pos2::new(
                (start_col + (char_idx * GLYPH_ADVANCE) as i64) as i32,
                top as i32,
            );
            for offset in glyph::lookup(c).cells() {
                grid.set(origin + offset, true);
            }
        }
    }
    grid
}
