//! Embedded 7x9 bitmap font used to stamp messages onto a grid.

use crate::Pos2;

pub const GLYPH_WIDTH: usize = 7;
pub const GLYPH_HEIGHT: usize = 9;
/// Horizontal distance between consecutive glyph origins (glyph plus one blank column)
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// A 7x9 binary bitmap
///
/// Each row is stored in the low 7 bits of a [`u8`], bit 6 being the
/// left-most column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::new([0; GLYPH_HEIGHT]);

    pub const fn new(rows: [u8; GLYPH_HEIGHT]) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn is_set(&self, px: usize, py: usize) -> bool {
        px < GLYPH_WIDTH && py < GLYPH_HEIGHT && self.rows[py] & (1 << (GLYPH_WIDTH - 1 - px)) != 0
    }

    /// Offsets of every set bit, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Pos2> + '_ {
        (0..GLYPH_HEIGHT).flat_map(move |py| {
            (0..GLYPH_WIDTH)
                .filter(move |&px| self.is_set(px, py))
                .map(move |px| Pos2::new(px as i32, py as i32))
        })
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }
}

/// Returns the glyph for `c`
///
/// ASCII lowercase letters share the uppercase glyphs. Anything else missing
/// from the atlas renders as blank space.
pub fn lookup(c: char) -> &'static Glyph {
    let c = c.to_ascii_uppercase();
    ATLAS
        .binary_search_by_key(&c, |&(key, _)| key)
        .map(|idx| &ATLAS[idx].1)
        .unwrap_or(&Glyph::BLANK)
}

/// Sorted by character for [`lookup`]
static ATLAS: [(char, Glyph); 27] = [
    (' ', Glyph::BLANK),
    ('A', Glyph::new([
        0b0011100,
        0b0100010,
        0b1000001,
        0b1000001,
        0b1111111,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0000000,
    ])),
    ('B', Glyph::new([
        0b1111110,
        0b1000001,
        0b1000001,
        0b1111110,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1111110,
        0b0000000,
    ])),
    ('C', Glyph::new([
        0b0111110,
        0b1000001,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000001,
        0b0111110,
        0b0000000,
    ])),
    ('D', Glyph::new([
        0b1111100,
        0b1000010,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000010,
        0b1111100,
        0b0000000,
    ])),
    ('E', Glyph::new([
        0b1111111,
        0b1000000,
        0b1000000,
        0b1111100,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1111111,
        0b0000000,
    ])),
    ('F', Glyph::new([
        0b1111111,
        0b1000000,
        0b1000000,
        0b1111100,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b0000000,
    ])),
    ('G', Glyph::new([
        0b0111110,
        0b1000001,
        0b1000000,
        0b1000000,
        0b1001111,
        0b1000001,
        0b1000001,
        0b0111110,
        0b0000000,
    ])),
    ('H', Glyph::new([
        0b1000001,
        0b1000001,
        0b1000001,
        0b1111111,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0000000,
    ])),
    ('I', Glyph::new([
        0b1111111,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b1111111,
        0b0000000,
    ])),
    ('J', Glyph::new([
        0b0011111,
        0b0000010,
        0b0000010,
        0b0000010,
        0b0000010,
        0b1000010,
        0b1000010,
        0b0111100,
        0b0000000,
    ])),
    ('K', Glyph::new([
        0b1000010,
        0b1000100,
        0b1001000,
        0b1110000,
        0b1001000,
        0b1000100,
        0b1000010,
        0b1000001,
        0b0000000,
    ])),
    ('L', Glyph::new([
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1111111,
        0b0000000,
    ])),
    ('M', Glyph::new([
        0b1000001,
        0b1100011,
        0b1010101,
        0b1001001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0000000,
    ])),
    ('N', Glyph::new([
        0b1000001,
        0b1100001,
        0b1010001,
        0b1001001,
        0b1000101,
        0b1000011,
        0b1000001,
        0b1000001,
        0b0000000,
    ])),
    ('O', Glyph::new([
        0b0111110,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0111110,
        0b0000000,
    ])),
    ('P', Glyph::new([
        0b1111110,
        0b1000001,
        0b1000001,
        0b1111110,
        0b1000000,
        0b1000000,
        0b1000000,
        0b1000000,
        0b0000000,
    ])),
    ('Q', Glyph::new([
        0b0111110,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000101,
        0b1000010,
        0b0111101,
        0b0000000,
    ])),
    ('R', Glyph::new([
        0b1111110,
        0b1000001,
        0b1000001,
        0b1111110,
        0b1001000,
        0b1000100,
        0b1000010,
        0b1000001,
        0b0000000,
    ])),
    ('S', Glyph::new([
        0b0111110,
        0b1000001,
        0b1000000,
        0b0111100,
        0b0000010,
        0b0000001,
        0b1000001,
        0b0111110,
        0b0000000,
    ])),
    ('T', Glyph::new([
        0b1111111,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0000000,
    ])),
    ('U', Glyph::new([
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0111110,
        0b0000000,
    ])),
    ('V', Glyph::new([
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b0100010,
        0b0010100,
        0b0001000,
        0b0000000,
    ])),
    ('W', Glyph::new([
        0b1000001,
        0b1000001,
        0b1000001,
        0b1000001,
        0b1001001,
        0b1010101,
        0b1100011,
        0b1000001,
        0b0000000,
    ])),
    ('X', Glyph::new([
        0b1000001,
        0b0100010,
        0b0010100,
        0b0001000,
        0b0001000,
        0b0010100,
        0b0100010,
        0b1000001,
        0b0000000,
    ])),
    ('Y', Glyph::new([
        0b1000001,
        0b0100010,
        0b0010100,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0001000,
        0b0000000,
    ])),
    ('Z', Glyph::new([
        0b1111111,
        0b0000010,
        0b0000100,
        0b0001000,
        0b0010000,
        0b0100000,
        0b1000000,
        0b1111111,
        0b0000000,
    ])),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_is_sorted() {
        assert!(ATLAS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn every_uppercase_letter_has_a_glyph() {
        for c in 'A'..='Z' {
            assert!(!lookup(c).is_blank(), "missing glyph for {c:?}");
        }
    }

    #[test]
    fn glyphs_fit_seven_columns_and_leave_bottom_row_blank() {
        for (c, glyph) in &ATLAS {
            assert!(
                glyph.rows.iter().all(|&row| row < 1 << GLYPH_WIDTH),
                "glyph {c:?} is wider than {GLYPH_WIDTH}"
            );
            assert_eq!(glyph.rows[GLYPH_HEIGHT - 1], 0, "glyph {c:?}");
        }
    }

    #[test]
    fn lowercase_shares_uppercase_glyph() {
        assert_eq!(lookup('c'), lookup('C'));
        assert_eq!(lookup('z'), lookup('Z'));
    }

    #[test]
    fn unknown_characters_fall_back_to_blank() {
        for c in ['!', '?', '7', 'é', '\n'] {
            assert!(lookup(c).is_blank(), "{c:?} should be blank");
        }
        assert!(lookup(' ').is_blank());
    }

    #[test]
    fn bits_are_read_left_to_right() {
        let l = lookup('L');

        assert!(l.is_set(0, 0));
        assert!(!l.is_set(6, 0));
        assert!(l.is_set(6, 7));
        assert!(!l.is_set(7, 7));
        assert_eq!(l.cells().count(), 7 + 7);
    }
}
