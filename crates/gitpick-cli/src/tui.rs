use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use gitpick_core::{
    CheckoutSink, InputEvent, Outcome, Paint, PaintStyle, PickError, Resolver, Screen, Session,
    Smartlog, Viewport,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Style};
use signal_hook::consts::SIGINT;

const POLL_RATE: Duration = Duration::from_millis(100);

pub fn run(
    smartlog: &Smartlog,
    resolver: Resolver,
    sink: &mut dyn CheckoutSink,
) -> Result<Outcome> {
    let mut session = Session::new(smartlog, resolver)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let sig_id = signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
        .context("failed to install SIGINT handler")?;

    let outcome = match TerminalScreen::enter(interrupted) {
        Ok(mut screen) => session.run(&mut screen, sink),
        Err(err) => Err(err),
    };
    signal_hook::low_level::unregister(sig_id);
    Ok(outcome?)
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pending: Vec<Paint>,
    interrupted: Arc<AtomicBool>,
    // Dropped last so the terminal is restored after everything else.
    _guard: TerminalGuard,
}

impl TerminalScreen {
    fn enter(interrupted: Arc<AtomicBool>) -> gitpick_core::Result<Self> {
        let guard = TerminalGuard::enter()
            .map_err(|source| PickError::io("entering the alternate screen", source))?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(|source| PickError::io("creating the terminal", source))?;
        Ok(Self {
            terminal,
            pending: Vec::new(),
            interrupted,
            _guard: guard,
        })
    }
}

impl Screen for TerminalScreen {
    fn size(&mut self) -> gitpick_core::Result<Viewport> {
        let (width, height) = crossterm::terminal::size()
            .map_err(|source| PickError::io("reading the terminal size", source))?;
        Ok(Viewport::new(width, height))
    }

    fn clear(&mut self) -> gitpick_core::Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn paint(&mut self, paint: &Paint) -> gitpick_core::Result<()> {
        self.pending.push(paint.clone());
        Ok(())
    }

    fn refresh(&mut self) -> gitpick_core::Result<()> {
        let pending = &self.pending;
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let buf = frame.buffer_mut();
                for paint in pending {
                    if paint.row >= area.height || paint.column >= area.width {
                        continue;
                    }
                    buf.set_stringn(
                        area.x + paint.column,
                        area.y + paint.row,
                        &paint.text,
                        usize::from(area.width - paint.column),
                        paint_style(paint.style),
                    );
                }
            })
            .map_err(|source| PickError::io("drawing the menu", source))?;
        Ok(())
    }

    fn next_event(&mut self) -> gitpick_core::Result<InputEvent> {
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Ok(InputEvent::Interrupt);
            }
            let ready = match event::poll(POLL_RATE) {
                Ok(ready) => ready,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(PickError::io("polling terminal events", source)),
            };
            if !ready {
                continue;
            }
            let event = event::read()
                .map_err(|source| PickError::io("reading terminal event", source))?;
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = map_key(key) {
                        return Ok(input);
                    }
                }
                Event::Resize(_, _) => return Ok(InputEvent::Resize),
                _ => {}
            }
        }
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputEvent::Interrupt),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(InputEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputEvent::Down),
        KeyCode::Home | KeyCode::Char('g') => Some(InputEvent::Top),
        KeyCode::End | KeyCode::Char('G') => Some(InputEvent::Bottom),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Cancel),
        _ => None,
    }
}

fn paint_style(style: PaintStyle) -> Style {
    match style {
        PaintStyle::Plain => Style::default().fg(Color::White),
        PaintStyle::Selected => Style::default().fg(Color::Magenta),
        PaintStyle::CommitId => Style::default().fg(Color::Yellow),
        PaintStyle::Branches => Style::default().fg(Color::Green),
    }
}
