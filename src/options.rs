use std::str::FromStr;

use glyphlife::{Config, ConfigUpdate, Error, Result};

/// Largest grid the console picks from the terminal size
const MAX_CONSOLE_GRID: (usize, usize) = (150, 100);

/// The grid size that fills a `cols` x `rows` terminal, capped at 150x100
///
/// The bottom row is left for the report line.
pub fn console_size(cols: u16, rows: u16) -> ConfigUpdate {
    ConfigUpdate {
        width: Some((cols as usize).min(MAX_CONSOLE_GRID.0)),
        height: Some((rows as usize).saturating_sub(1).min(MAX_CONSOLE_GRID.1)),
        ..ConfigUpdate::default()
    }
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses `args`, returning `Ok(None)` after printing the usage for `--help`
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "play the animation in the terminal");
        opts.optflag("t", "threads", "compute generations with multiple threads");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("g", "gens", "number of generations before the message", "COUNT");
        opts.optopt("s", "interval", "milliseconds between frames", "MILLIS");
        opts.optopt("m", "message", "text the animation resolves into", "TEXT");
        opts.optopt("", "config", "read the config from a JSON file", "FILE");
        opts.optopt("i", "target", "resolve into an RLE pattern instead of text", "FILE");
        opts.optopt("o", "output", "write the first frame as RLE", "FILE");
        opts.optopt("", "stats", "write per-frame stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: glyphlife [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn opt<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.matches
            .opt_get(name)
            .map_err(|_| Error::InvalidArgument(format!("--{name} expects a number")))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    /// Whether the grid size comes from the terminal and should track resizes
    pub fn follows_terminal(&self) -> bool {
        self.console()
            && !["config", "width", "height"]
                .iter()
                .any(|name| self.matches.opt_present(name))
    }

    /// Flags override the config file, which overrides the defaults
    ///
    /// In console mode the default size follows the terminal, capped at 150x100.
    pub fn config(&self) -> Result<Config> {
        let mut config = match self.matches.opt_str("config") {
            Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
            None if self.console() => {
                let (cols, rows) = crossterm::terminal::size()?;
                Config::default().merged(&console_size(cols, rows))
            }
            None => Config::default(),
        };
        config.apply(&ConfigUpdate {
            width: self.opt("width")?,
            height: self.opt("height")?,
            cell_size: None,
            generation_count: self.opt("gens")?,
            frame_interval_ms: self.opt("interval")?,
        })?;
        Ok(config)
    }

    pub fn message(&self) -> Option<String> {
        self.matches.opt_str("message")
    }

    pub fn target_file(&self) -> Option<String> {
        self.matches.opt_str("target")
    }
    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Args {
        Args::new(args).unwrap().expect("not a help request")
    }

    #[test]
    fn flags_override_defaults() {
        let config = args(&["-w", "80", "--gens", "25", "-s", "40"]).config().unwrap();

        assert_eq!(config.width, 80);
        assert_eq!(config.height, Config::default().height);
        assert_eq!(config.generation_count, 25);
        assert_eq!(config.frame_interval_ms, 40);
    }

    #[test]
    fn non_numeric_size_is_an_error() {
        assert!(matches!(
            args(&["--width", "wide"]).config(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            args(&["-h", "0"]).config(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(matches!(Args::new(&["--bogus"]), Err(Error::Options(_))));
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn message_and_files() {
        let args = args(&["-m", "hello there", "-o", "seed.rle", "--stats", "s.csv"]);

        assert_eq!(args.message().as_deref(), Some("hello there"));
        assert_eq!(args.output_file().as_deref(), Some("seed.rle"));
        assert_eq!(args.stats_file().as_deref(), Some("s.csv"));
        assert!(args.target_file().is_none());
        assert!(!args.console());
    }

    #[test]
    fn console_size_caps_and_keeps_report_row() {
        let update = console_size(80, 25);
        assert_eq!((update.width, update.height), (Some(80), Some(24)));
        assert!(update.generation_count.is_none());

        let update = console_size(400, 300);
        assert_eq!((update.width, update.height), (Some(150), Some(100)));

        assert_eq!(console_size(10, 0).height, Some(0));
    }

    #[test]
    fn explicit_size_stops_following_terminal() {
        assert!(args(&["-c"]).follows_terminal());
        assert!(args(&["-c", "-g", "5"]).follows_terminal());
        assert!(!args(&["-c", "-w", "40"]).follows_terminal());
        assert!(!args(&["-c", "--config", "glyphlife.json"]).follows_terminal());
        assert!(!args(&[]).follows_terminal());
    }
}
