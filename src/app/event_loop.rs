use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::app::{App, Message, Model, update};

/// Quiet period before a terminal resize is applied.
const RESIZE_DEBOUNCE_MS: u64 = 100;
/// Poll interval while something on screen is moving.
const FRAME_MS: u64 = 16;
/// Poll interval while idle.
const IDLE_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Remember the latest size; earlier queued sizes are dropped.
    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// What a frame shows, compared across ticks to skip identical redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameKey {
    offset: usize,
    selection_revision: u64,
    loading: bool,
    turns: usize,
    toast: bool,
}

impl FrameKey {
    fn of(model: &Model) -> Self {
        Self {
            offset: model.viewport.offset(),
            selection_revision: model.state.selection_revision(),
            loading: model.state.is_loading(),
            turns: model.store.len(),
            toast: model.active_toast().is_some(),
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the event loop
    /// hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; pankview requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} sidebar_visible={} text_w={}",
                size.width,
                size.height,
                self.sidebar_visible,
                crate::ui::conversation_text_width(size.width, self.sidebar_visible)
            ),
        );
        let mut model = self.build_model((size.width, size.height));
        info!(
            turns = model.store.len(),
            lines = model.layout.line_count(),
            "viewer started"
        );

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(RESIZE_DEBOUNCE_MS);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;
        execute!(stdout(), EnableMouseCapture)?;

        loop {
            let now_ms = elapsed_ms(start);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if model.is_busy() || resize_debouncer.is_pending() {
                FRAME_MS
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = elapsed_ms(start);
                let msg =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat and wheel bursts into a single tick.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = elapsed_ms(start);
                    let msg =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            let before = FrameKey::of(model);
            *model = update(std::mem::take(model), Message::Tick(elapsed_ms(start)));
            if FrameKey::of(model) != before {
                needs_render = true;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} offset={} lines={}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.offset(),
                        model.layout.line_count()
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
