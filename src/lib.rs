//! Conway's Game of Life animation that resolves into a text message.
//!
//! The message is laid out with a small bitmap font, simulated forward for
//! a number of generations, and the recording is played back in reverse so
//! the grid appears to organize itself into the text.

pub mod config;
pub mod enc;
pub mod engine;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod playback;
pub mod pos;

pub use config::{Config, ConfigUpdate};
pub use enc::{PositionEncoder, RunLengthEncoded};
pub use engine::{Engine, Frame, Sequence, next_generation, next_generation_parallel};
pub use error::{Error, Result};
pub use glyph::Glyph;
pub use grid::Grid;
pub use playback::{Playback, PlaybackState, PlaybackStatus, Tick, TickHandle};
pub use pos::Pos2;
