use std::ops::Index;

use crate::Grid;

/// One recorded simulation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub grid: Grid,
    /// Rule applications separating this grid from the message grid
    pub generation: usize,
    /// Logical time marker in playback order, not used for pacing
    pub timestamp_ms: u64,
}

/// Frames in playback order, from the most evolved state to the message
///
/// Built once by [`crate::Engine::generate_states`] and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    frames: Vec<Frame>,
}

impl Sequence {
    /// Reverses grids recorded in simulation order (message first) into playback order
    pub(super) fn from_simulation(mut grids: Vec<Grid>, frame_interval_ms: u64) -> Self {
        let total = grids.len();
        grids.reverse();
        let frames = grids
            .into_iter()
            .enumerate()
            .map(|(i, grid)| Frame {
                grid,
                generation: total - 1 - i,
                timestamp_ms: i as u64 * frame_interval_ms,
            })
            .collect();
        Self { frames }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Frame> {
        self.frames.get(idx)
    }

    /// The first frame shown, the most evolved state
    #[inline]
    pub fn first(&self) -> Option<&Frame> {
        self.frames.first()
    }
    /// The legible message
    #[inline]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl Index<usize> for Sequence {
    type Output = Frame;

    #[inline]
    fn index(&self, idx: usize) -> &Frame {
        &self.frames[idx]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos2;

    #[test]
    fn reverses_and_stamps_frames() {
        let grids: Vec<Grid> = (0..3)
            .map(|i| Grid::from_alive(3, 1, [Pos2::new(i, 0)]))
            .collect();
        let sequence = Sequence::from_simulation(grids.clone(), 50);

        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence[0].grid, grids[2]);
        assert_eq!(sequence[2].grid, grids[0]);
        assert_eq!(
            sequence.iter().map(|f| f.generation).collect::<Vec<_>>(),
            vec![2, 1, 0]
        );
        assert_eq!(
            sequence.iter().map(|f| f.timestamp_ms).collect::<Vec<_>>(),
            vec![0, 50, 100]
        );
    }
}
