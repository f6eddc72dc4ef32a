use tracing::{debug, info, warn};

use crate::error::Result;
use crate::navigation::{NavEvent, Navigator, Transition};
use crate::render::{Paint, Renderer, Viewport};
use crate::resolve::Resolver;
use crate::smartlog::Smartlog;

pub trait LogSource {
    fn read_lines(&mut self) -> Result<Vec<String>>;
}

pub trait CheckoutSink {
    fn checkout(&mut self, reference: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Top,
    Bottom,
    Confirm,
    Cancel,
    Interrupt,
    Resize,
}

pub trait Screen {
    fn size(&mut self) -> Result<Viewport>;
    fn clear(&mut self) -> Result<()>;
    fn paint(&mut self, paint: &Paint) -> Result<()>;
    fn refresh(&mut self) -> Result<()>;
    /// Blocks until the next input event.
    fn next_event(&mut self) -> Result<InputEvent>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    CheckedOut(String),
    /// The already checked-out row was confirmed.
    Unchanged(String),
    Cancelled,
    Interrupted,
}

pub struct Session<'a> {
    smartlog: &'a Smartlog,
    resolver: Resolver,
    navigator: Navigator,
    renderer: Renderer,
}

impl<'a> Session<'a> {
    pub fn new(smartlog: &'a Smartlog, resolver: Resolver) -> Result<Self> {
        let navigator = Navigator::new(smartlog.rows().to_vec(), smartlog.current())?;
        Ok(Self {
            smartlog,
            resolver,
            navigator,
            renderer: Renderer::new(),
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn run(
        &mut self,
        screen: &mut dyn Screen,
        sink: &mut dyn CheckoutSink,
    ) -> Result<Outcome> {
        info!(
            lines = self.smartlog.lines().len(),
            commit_rows = self.navigator.len(),
            cursor = self.navigator.cursor(),
            "session started"
        );
        self.draw(screen, self.navigator.selected_raw_line())?;

        loop {
            let event = screen.next_event()?;
            let nav_event = match event {
                InputEvent::Up => NavEvent::MoveUp,
                InputEvent::Down => NavEvent::MoveDown,
                InputEvent::Top => NavEvent::MoveTop,
                InputEvent::Bottom => NavEvent::MoveBottom,
                InputEvent::Confirm => NavEvent::Confirm,
                InputEvent::Cancel => NavEvent::Cancel,
                InputEvent::Interrupt => {
                    info!("session interrupted");
                    return Ok(Outcome::Interrupted);
                }
                InputEvent::Resize => {
                    self.draw(screen, self.navigator.selected_raw_line())?;
                    continue;
                }
            };

            match self.navigator.apply(nav_event) {
                Transition::Redraw { raw_line } => {
                    debug!(?nav_event, cursor = self.navigator.cursor(), raw_line, "moved");
                    self.draw(screen, raw_line)?;
                }
                Transition::Confirm { raw_line, changed } => {
                    return self.confirm(sink, raw_line, changed);
                }
                Transition::Cancel => {
                    info!("session cancelled");
                    return Ok(Outcome::Cancelled);
                }
            }
        }
    }

    fn confirm(
        &self,
        sink: &mut dyn CheckoutSink,
        raw_line: usize,
        changed: bool,
    ) -> Result<Outcome> {
        let line = self.smartlog.line(raw_line).unwrap_or_default();
        let reference = self.resolver.resolve(line).inspect_err(|err| {
            warn!(raw_line, error = %err, "confirmed row has no checkout target");
        })?;
        if !changed {
            info!(%reference, "current checkout confirmed, nothing to do");
            return Ok(Outcome::Unchanged(reference));
        }

        info!(%reference, "checking out");
        sink.checkout(&reference).inspect_err(|err| {
            warn!(%reference, error = %err, "checkout failed");
        })?;
        Ok(Outcome::CheckedOut(reference))
    }

    fn draw(&mut self, screen: &mut dyn Screen, raw_line: usize) -> Result<()> {
        let viewport = screen.size()?;
        let frame = self
            .renderer
            .frame(self.smartlog.lines(), raw_line, viewport);
        screen.clear()?;
        for paint in &frame.paints {
            screen.paint(paint)?;
        }
        screen.refresh()
    }
}

