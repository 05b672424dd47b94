//! Run length encoded (RLE) import and export of patterns.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    Grid, Pos2,
    error::{Error, Result},
};

pub trait PositionEncoder {
    fn encode(&self, grid: &Grid) -> String;
    fn decode(&self, value: &str) -> Result<Vec<Pos2>>;
}

/// Accumulates `<count><tag>` runs, wrapping lines at a maximum length
struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i32, tag: char) {
        let append = match run {
            0 => return,
            1 => tag.to_string(),
            n => format!("{n}{tag}"),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

pub struct RunLengthEncoded {
    name: Option<String>,
    header: bool,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    /// Leaves out the `#N` and `x = ..` lines
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    fn encode_header(&self, tl: Pos2, br: Pos2) -> String {
        let mut header = String::new();
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {name}\n"));
        }
        header.push_str(&format!(
            "x = {}, y = {}, rule = 23/3\n",
            br.x - tl.x,
            br.y - tl.y
        ));
        header
    }

    fn encode_cells(alive: &[Pos2], tl: Pos2) -> String {
        let mut last = tl - Pos2::new(1, 0);
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for &pos in alive {
            if last.y == pos.y && last.x + 1 == pos.x {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.y - last.y;
            let dead_run = match lines_run {
                0 => pos.x - last.x - 1,
                _ => pos.x - tl.x,
            };
            // alive cells before the line break, then the gap on the new line
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            header: true,
        }
    }
}

fn run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("static RLE regex is valid"))
}

/// Moves a decode cursor coordinate `run` cells on
fn advance(at: i32, run: i32) -> Result<i32> {
    at.checked_add(run)
        .ok_or_else(|| Error::InvalidArgument(format!("RLE position overflows after {at} + {run}")))
}

impl PositionEncoder for RunLengthEncoded {
    /// Encodes the alive cells of `grid`, cropped to their bounding box
    fn encode(&self, grid: &Grid) -> String {
        let alive: Vec<Pos2> = grid.alive().collect();
        let tl = Pos2::new(
            alive.iter().map(|p| p.x).min().unwrap_or_default(),
            alive.first().map(|p| p.y).unwrap_or_default(),
        );
        let br = match alive.last() {
            Some(last) => Pos2::new(alive.iter().map(|p| p.x).max().unwrap_or_default(), last.y)
                + Pos2::one(),
            None => tl,
        };

        let cells = Self::encode_cells(&alive, tl);
        if self.header {
            format!("{}{}\n", self.encode_header(tl, br), cells)
        } else {
            format!("{cells}\n")
        }
    }

    fn decode(&self, value: &str) -> Result<Vec<Pos2>> {
        let mut alive = Vec::new();
        let mut cursor = Pos2::zero();
        'lines_loop: for line in value.lines() {
            let line = line.trim();
            // comments and the size header carry nothing we need
            if line.starts_with('#') || line.starts_with('x') {
                continue;
            }

            for (_, [run_str, tag]) in run_regex().captures_iter(line).map(|c| c.extract()) {
                let run = match run_str {
                    "" => 1,
                    s => s
                        .parse::<i32>()
                        .map_err(|_| Error::InvalidArgument(format!("bad RLE run length {s:?}")))?,
                };
                match tag {
                    "!" => break 'lines_loop,
                    "o" => {
                        let end = advance(cursor.x, run)?;
                        alive.extend((cursor.x..end).map(|x| Pos2::new(x, cursor.y)));
                        cursor.x = end;
                    }
                    "b" => cursor.x = advance(cursor.x, run)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y, run)?;
                    }
                    _ => unreachable!("regex only captures b, o, $ and !"),
                }
            }
        }

        Ok(alive)
    }
}
