//! Terminal setup and the event pump feeding the application loop.

use std::io::{Stdout, stdout};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    is_raw_mode_enabled,
};
use futures_util::{FutureExt, StreamExt};
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub type Frame<'a> = ratatui::Frame<'a>;

#[derive(Clone, Debug)]
pub enum Event {
    Init,
    Quit,
    Tick,
    Render,
    Paste(String),
    Key(KeyEvent),
    Resize(u16, u16),
}

/// A component consumed the event and produced this.
#[derive(Debug, Clone, PartialEq)]
pub enum EventResponse<T> {
    Stop(T),
}

pub struct Tui {
    terminal: ratatui::Terminal<CrosstermBackend<Stdout>>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout()))?;
        let (event_tx, event_rx) = unbounded_channel();
        Ok(Self {
            terminal,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 30.0,
            tick_rate: 4.0,
        })
    }

    pub fn start(&mut self) {
        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate);
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate);
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let cancellation_token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();

        self.task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            let _ = event_tx.send(Event::Init);
            loop {
                let tick = tick_interval.tick();
                let render = render_interval.tick();
                let crossterm_event = reader.next().fuse();
                tokio::select! {
                    _ = cancellation_token.cancelled() => break,
                    maybe_event = crossterm_event => match maybe_event {
                        Some(Ok(evt)) => {
                            let event = match evt {
                                // Ignore release/repeat reports on platforms that send them.
                                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                    Some(Event::Key(key))
                                }
                                CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                                CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
                                _ => None,
                            };
                            if let Some(event) = event {
                                let _ = event_tx.send(event);
                            }
                        }
                        Some(Err(err)) => {
                            warn!("Terminal event error: {err}");
                        }
                        None => {
                            let _ = event_tx.send(Event::Quit);
                            break;
                        }
                    },
                    _ = tick => {
                        let _ = event_tx.send(Event::Tick);
                    }
                    _ = render => {
                        let _ = event_tx.send(Event::Render);
                    }
                }
            }
        });
    }

    pub fn stop(&self) -> Result<()> {
        self.cancel();
        let mut counter = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            counter += 1;
            if counter > 50 {
                self.task.abort();
            }
            if counter > 100 {
                warn!("Event task did not stop within 100ms");
                break;
            }
        }
        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        crossterm::execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;
        debug!("Entered alternate screen");
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop()?;
        if is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, cursor::Show)?;
            disable_raw_mode()?;
            debug!("Left alternate screen");
        }
        Ok(())
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            warn!("Failed to restore terminal: {err}");
        }
    }
}
