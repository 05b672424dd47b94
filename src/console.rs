use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, terminal,
};
use glyphlife::{Grid, Pos2};
use std::{io, time::Duration};

pub enum ConsoleCommand {
    Exit,
    Start,
    Stop,
    Reset,
    /// The terminal now has this many columns and rows
    Resize(u16, u16),
    Handled,
}

/// Draws frames into the terminal, one character per cell
pub struct ConsoleRender {
    tl: Pos2,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            tl: Pos2::default(),
            report: String::new(),
        })
    }

    pub fn render(&self, grid: &Grid) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the bottom row is reserved for the report
        let view = Pos2::new(cols as i32, rows.saturating_sub(1) as i32);
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in grid.alive() {
            let cell = cell - self.tl;
            if !cell.in_bounds(view.x as usize, view.y as usize) {
                continue;
            }
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            io::Write::write_all(&mut stdout, "█".as_bytes())?;
        }

        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        io::Write::write_all(&mut stdout, self.report.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Waits up to `timeout` for a key press or a resize
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | event::Event::Key(KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent {
                code: KeyCode::Char(' '),
                ..
            }) => ConsoleCommand::Start,
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('s'),
                ..
            }) => ConsoleCommand::Stop,
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('r'),
                ..
            }) => ConsoleCommand::Reset,
            // arrows pan the view
            event::Event::Key(KeyEvent { code, .. }) => {
                match code {
                    KeyCode::Up => self.tl.y -= 1,
                    KeyCode::Down => self.tl.y += 1,
                    KeyCode::Left => self.tl.x -= 1,
                    KeyCode::Right => self.tl.x += 1,
                    _ => {}
                }
                ConsoleCommand::Handled
            }
            event::Event::Resize(cols, rows) => ConsoleCommand::Resize(cols, rows),
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(io::stdout(), cursor::Show).expect("enable cursor");
    }
}
