mod index;
pub mod layout;
mod sequence;

pub use self::index::next_cell_state;
pub use self::sequence::{Frame, Sequence};
use crate::{
    Grid, Pos2,
    config::{Config, ConfigUpdate},
    error::{Error, Result},
};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// The message shown when none is given
pub const DEFAULT_MESSAGE: &str = "hi im cason";

/// Computes the next generation of `grid`
///
/// Every cell reads its neighborhood from the unmodified input; cells past
/// the edges count as dead.
pub fn next_generation(grid: &Grid) -> Grid {
    let index = index::get_gol_index();
    let (width, height) = (grid.width(), grid.height());

    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            cells.push(u8::from(index[grid.neighborhood(x, y)]));
        }
    }
    Grid::from_cells(width, height, cells)
}

/// Same as [`next_generation`], with rows computed in parallel
pub fn next_generation_parallel(grid: &Grid) -> Grid {
    let index = index::get_gol_index();
    let (width, height) = (grid.width(), grid.height());

    let mut cells = vec![0; width * height];
    if width > 0 {
        cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = u8::from(index[grid.neighborhood(x, y)]);
                }
            });
    }
    Grid::from_cells(width, height, cells)
}

/// What the animation converges to
#[derive(Debug, Clone)]
enum Target {
    Message(String),
    /// A pattern centered on the grid, alive positions sorted row-major
    Pattern(Vec<Pos2>),
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    target: Target,
}

impl Engine {
    /// Creates an engine showing [`DEFAULT_MESSAGE`]
    pub fn new(config: Config) -> Result<Self> {
        Self::with_message(config, DEFAULT_MESSAGE)
    }

    pub fn with_message<S: Into<String>>(config: Config, message: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            target: Target::Message(message.into()),
        })
    }

    /// Creates an engine converging to an arbitrary pattern instead of a message
    ///
    /// The pattern's bounding box is centered on the grid; cells that do not fit are clipped.
    /// A pattern wider or taller than `i32::MAX` cells is rejected.
    pub fn with_pattern(config: Config, mut alive: Vec<Pos2>) -> Result<Self> {
        config.validate()?;
        if let Some((min, max)) = bounds(&alive) {
            extent(min, max)?;
        }
        alive.sort();
        alive.dedup();
        Ok(Self {
            config,
            target: Target::Pattern(alive),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merges `update` into the config
    ///
    /// Sequences generated before are stale afterwards; call
    /// [`Engine::generate_states`] again.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<()> {
        self.config.apply(&update)
    }

    /// Builds the grid the animation ends on
    pub fn compose_final_grid(&self) -> Grid {
        let Config { width, height, .. } = self.config;
        match &self.target {
            Target::Message(message) => layout::compose(width, height, message),
            Target::Pattern(alive) => center_pattern(width, height, alive),
        }
    }

    /// Generates the frames of the animation, most evolved state first
    ///
    /// The rule cannot be run backwards, so the message grid is simulated
    /// forward `generation_count` times and the recording is reversed.
    #[instrument(skip(self), fields(width = self.config.width, height = self.config.height))]
    pub fn generate_states(&self) -> Sequence {
        self.generate_with(next_generation)
    }

    /// Same as [`Engine::generate_states`], using [`next_generation_parallel`]
    #[instrument(skip(self), fields(width = self.config.width, height = self.config.height))]
    pub fn generate_states_parallel(&self) -> Sequence {
        self.generate_with(next_generation_parallel)
    }

    fn generate_with(&self, step: fn(&Grid) -> Grid) -> Sequence {
        let count = self.config.generation_count;
        let mut grids = Vec::with_capacity(count + 1);
        let mut current = self.compose_final_grid();
        for _ in 0..count {
            let next = step(&current);
            grids.push(std::mem::replace(&mut current, next));
        }
        grids.push(current);

        debug!(
            frames = grids.len(),
            message_alive = grids.first().map_or(0, Grid::alive_count),
            seed_alive = grids.last().map_or(0, Grid::alive_count),
            "generated states"
        );
        Sequence::from_simulation(grids, self.config.frame_interval_ms)
    }
}

fn bounds(alive: &[Pos2]) -> Option<(Pos2, Pos2)> {
    let first = *alive.first()?;
    Some(alive.iter().fold((first, first), |(min, max), pos| {
        (
            Pos2::new(min.x.min(pos.x), min.y.min(pos.y)),
            Pos2::new(max.x.max(pos.x), max.y.max(pos.y)),
        )
    }))
}

/// Size of the box spanning `min..=max`
fn extent(min: Pos2, max: Pos2) -> Result<Pos2> {
    let span = |lo: i32, hi: i32| hi.checked_sub(lo).and_then(|d| d.checked_add(1));
    match (span(min.x, max.x), span(min.y, max.y)) {
        (Some(x), Some(y)) => Ok(Pos2::new(x, y)),
        _ => Err(Error::InvalidArgument(format!(
            "pattern spanning {min:?} to {max:?} is too large"
        ))),
    }
}

fn center_pattern(width: usize, height: usize, alive: &[Pos2]) -> Grid {
    let Some((min, max)) = bounds(alive) else {
        return Grid::new(width, height);
    };
    let Ok(extent) = extent(min, max) else {
        return Grid::new(width, height);
    };
    let origin = (
        (width as i64 - extent.x as i64).div_euclid(2),
        (height as i64 - extent.y as i64).div_euclid(2),
    );
    // offsets from `min` fit in i32, the shifted cell may not
    let placed = alive.iter().filter_map(|&pos| {
        let offset = pos - min;
        let x = i32::try_from(origin.0 + offset.x as i64).ok()?;
        let y = i32::try_from(origin.1 + offset.y as i64).ok()?;
        Some(Pos2::new(x, y))
    });
    Grid::from_alive(width, height, placed)
}
