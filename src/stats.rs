use std::time::Instant;

use glyphlife::{Frame, Playback, PlaybackStatus};

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, status: PlaybackStatus, frame: &Frame);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

pub struct SimpleRecord {
    status: Option<PlaybackStatus>,
    generation: usize,
    alive: usize,
    frames_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new() -> Self {
        Self {
            status: None,
            generation: 0,
            alive: 0,
            frames_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, status: PlaybackStatus, frame: &Frame) {
        self.status = Some(status);
        self.generation = frame.generation;
        self.alive = frame.grid.alive_count();
        self.frames_in_report += 1;
    }

    fn has_report(&self) -> bool {
        self.frames_in_report > 0
    }
    fn report(&mut self) -> Self::Str {
        let fps = self.frames_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        self.last_report = Instant::now();
        self.frames_in_report = 0;

        let Some(status) = self.status else {
            return String::new();
        };
        format!(
            "frame {}/{} ({:.0}%) gen:{} alive:{} {:.01}fps",
            status.current_frame_index + 1,
            status.total_frames,
            status.progress() * 100.0,
            self.generation,
            self.alive,
            fps
        )
    }
}

pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(usize, usize, u64, usize)>,
}
impl CsvRecord {
    pub fn new() -> Self {
        Self {
            inner: SimpleRecord::new(),
            data: Vec::new(),
        }
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        use std::{
            fs,
            io::{self, Write},
        };

        let file = fs::File::create(path)?;
        let mut file = io::BufWriter::new(file);

        file.write_all(b"frame,generation,timestamp_ms,alive\n")?;
        for (frame, generation, timestamp, alive) in &self.data {
            writeln!(file, "{frame},{generation},{timestamp},{alive}")?;
        }
        file.flush()
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, status: PlaybackStatus, frame: &Frame) {
        self.data.push((
            status.current_frame_index,
            frame.generation,
            frame.timestamp_ms,
            frame.grid.alive_count(),
        ));
        self.inner.record(status, frame);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new())
        } else {
            Self::Simple(SimpleRecord::new())
        }
    }
    /// Writes the CSV, a no-op unless this is a [`CsvRecord`]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Ok(()),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, status: PlaybackStatus, frame: &Frame) {
        match self {
            Self::Csv(r) => r.record(status, frame),
            Self::Simple(r) => r.record(status, frame),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

/// Feeds a [`Recorder`] once per shown frame, however often it is redrawn
pub struct PlaybackRecorder<R> {
    recorder: R,
    last_index: Option<usize>,
}
impl<R: Recorder> PlaybackRecorder<R> {
    pub fn new(recorder: R) -> Self {
        Self {
            recorder,
            last_index: None,
        }
    }

    /// Records the current frame if the frame index moved since the last call
    ///
    /// Returns a report when the recorder has one.
    pub fn observe(&mut self, playback: &Playback) -> Option<R::Str> {
        let status = playback.status();
        if self.last_index == Some(status.current_frame_index) {
            return None;
        }
        let frame = playback.current_frame()?;
        self.recorder.record(status, frame);
        self.last_index = Some(status.current_frame_index);
        self.recorder.has_report().then(|| self.recorder.report())
    }

    /// Forgets the last index, for when playback switched to a new sequence
    pub fn restart(&mut self) {
        self.last_index = None;
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphlife::{Config, Engine, Playback, Tick};
    use std::time::Duration;

    fn record_all<R: Recorder>(recorder: &mut R) {
        let config = Config {
            width: 40,
            height: 24,
            generation_count: 2,
            ..Config::default()
        };
        let sequence = Engine::new(config).unwrap().generate_states();
        let mut playback = Playback::new(sequence, Duration::from_millis(1));
        let mut handle = playback.start();
        while let Some(h) = handle {
            if let Some(frame) = playback.current_frame() {
                recorder.record(playback.status(), frame);
            }
            handle = match playback.tick(h) {
                Tick::Scheduled(next) => Some(next),
                _ => None,
            };
        }
    }

    #[test]
    fn report_describes_latest_frame() {
        let mut recorder = SimpleRecord::new();
        assert!(!recorder.has_report());

        record_all(&mut recorder);
        assert!(recorder.has_report());

        let report = recorder.report();
        assert!(report.starts_with("frame 3/3"), "{report}");
        assert!(report.contains("gen:0"), "{report}");
        assert!(!recorder.has_report());
    }

    #[test]
    fn csv_has_a_row_per_frame() {
        let mut recorder = CsvRecord::new();
        record_all(&mut recorder);

        let path = std::env::temp_dir().join(format!("glyphlife-stats-{}.csv", std::process::id()));
        recorder.save(&path).unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "frame,generation,timestamp_ms,alive");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("0,2,0,"));
        assert!(lines[3].starts_with("2,0,200,"));
    }

    #[test]
    fn redraws_do_not_repeat_csv_rows() {
        let sequence = Engine::new(Config {
            width: 40,
            height: 24,
            generation_count: 3,
            ..Config::default()
        })
        .unwrap()
        .generate_states();
        let mut playback = Playback::new(sequence, Duration::from_millis(1));
        let mut recorder = PlaybackRecorder::new(CsvRecord::new());

        let handle = playback.start().unwrap();
        assert!(recorder.observe(&playback).is_some());
        // panning or resizing redraws the same frame
        assert!(recorder.observe(&playback).is_none());
        assert!(recorder.observe(&playback).is_none());
        assert_eq!(recorder.recorder().data.len(), 1);

        assert!(matches!(playback.tick(handle), Tick::Scheduled(_)));
        recorder.observe(&playback);
        recorder.observe(&playback);
        assert_eq!(recorder.recorder().data.len(), 2);

        playback.reset();
        recorder.observe(&playback);
        playback.start();
        recorder.observe(&playback);
        assert_eq!(recorder.recorder().data.len(), 3);

        recorder.restart();
        recorder.observe(&playback);
        assert_eq!(recorder.recorder().data.len(), 4);
    }
}
