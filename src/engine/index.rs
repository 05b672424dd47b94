use std::sync::OnceLock;

/// The number of permutations for a 3x3 grid of cells
const PERMUTATIONS: usize = 1 << 9;
/// Bit of the center cell in a packed neighborhood, see [`crate::Grid::neighborhood`]
const CENTER: usize = 0b000_010_000;

type GameOfLifeIndex = [bool; PERMUTATIONS];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_gol_index`] once and storing the result
pub(super) fn get_gol_index() -> &'static GameOfLifeIndex {
    static CELL: OnceLock<GameOfLifeIndex> = OnceLock::new();
    CELL.get_or_init(generate_gol_index)
}

/// Whether a cell lives in the next generation, given its current state and live neighbor count
#[inline]
pub fn next_cell_state(alive: bool, neighbors: u32) -> bool {
    match (alive, neighbors) {
        // survival
        (true, 2 | 3) => true,
        // birth
        (false, 3) => true,
        // under- or overpopulation, or staying dead
        _ => false,
    }
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed by a 9-bit number representing a cell and its neighbors.
/// The center cell is the middle-most bit, `1 << 4`.
///
/// Returns whether the center cell should be alive or dead in its arrangement
fn generate_gol_index() -> GameOfLifeIndex {
    let mut indices = [false; PERMUTATIONS];
    for (i, next) in indices.iter_mut().enumerate() {
        let neighbors = (i & !CENTER).count_ones();
        let alive = i & CENTER != 0;
        *next = next_cell_state(alive, neighbors);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_value(alive: bool, neighbors: usize) -> usize {
        const NEIGHBOR_BITS: [usize; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let mut value = if alive { CENTER } else { 0 };
        for bit in NEIGHBOR_BITS.iter().take(neighbors) {
            value |= bit;
        }
        value
    }

    #[test]
    fn index_matches_rule_for_every_state_and_count() {
        let index = get_gol_index();
        for alive in [false, true] {
            for neighbors in 0..=8 {
                let expected = match (alive, neighbors) {
                    (true, n) if n < 2 => false,
                    (true, 2 | 3) => true,
                    (true, _) => false,
                    (false, 3) => true,
                    (false, _) => false,
                };
                assert_eq!(
                    index[grid_value(alive, neighbors)],
                    expected,
                    "alive={alive} neighbors={neighbors}"
                );
            }
        }
    }

    #[test]
    fn index_only_depends_on_count() {
        let index = get_gol_index();
        for i in 0..PERMUTATIONS {
            let alive = i & CENTER != 0;
            let neighbors = (i & !CENTER).count_ones() as usize;
            assert_eq!(index[i], index[grid_value(alive, neighbors)], "arrangement {i:09b}");
        }
    }
}
