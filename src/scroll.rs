//! Slow downward drift plus manual scrolling for the invitation card.

use std::time::{Duration, Instant};

use ratatui::layout::Position;
use tui_scrollview::ScrollViewState;

pub const SCROLL_TICK: Duration = Duration::from_millis(25);

/// Vertical extent bookkeeping a scroll driver needs.
pub trait ScrollSurface {
    fn offset(&self) -> u16;
    fn set_offset(&mut self, offset: u16);
    fn content_height(&self) -> u16;
    fn viewport_height(&self) -> u16;
}

/// One-row-per-tick downward drift. Stops by itself at the bottom of the
/// card and stays stopped until started again.
#[derive(Debug, Default)]
pub struct AutoScroll {
    next_due: Option<Instant>,
}

impl AutoScroll {
    /// Arm the drift timer. Calling this while running keeps the existing
    /// cadence instead of stacking a second one.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + SCROLL_TICK);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Advance the surface one row for every elapsed tick interval. The
    /// bottom check leaves one row of slack so rounding in the renderer
    /// cannot keep the timer alive forever.
    pub fn on_tick(&mut self, now: Instant, surface: &mut impl ScrollSurface) {
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            if at_bottom(surface) {
                self.next_due = None;
                break;
            }
            let next = surface.offset().saturating_add(1);
            surface.set_offset(next);
            self.next_due = Some(due + SCROLL_TICK);
        }
    }
}

fn at_bottom(surface: &impl ScrollSurface) -> bool {
    surface.content_height().saturating_sub(surface.offset())
        <= surface.viewport_height().saturating_add(1)
}

/// Scroll state for the rendered card plus the heights measured during the
/// last draw.
#[derive(Debug, Default)]
pub struct PageScroll {
    pub state: ScrollViewState,
    content_height: u16,
    viewport_height: u16,
}

impl PageScroll {
    pub fn note_dimensions(&mut self, content: u16, viewport: u16) {
        self.content_height = content;
        self.viewport_height = viewport;
    }

    pub fn line_up(&mut self) {
        self.state.scroll_up();
    }

    pub fn line_down(&mut self) {
        self.state.scroll_down();
    }

    pub fn page_up(&mut self) {
        self.state.scroll_page_up();
    }

    pub fn page_down(&mut self) {
        self.state.scroll_page_down();
    }

    pub fn to_top(&mut self) {
        self.state.scroll_to_top();
    }

    pub fn to_bottom(&mut self) {
        self.state.scroll_to_bottom();
    }
}

impl ScrollSurface for PageScroll {
    fn offset(&self) -> u16 {
        self.state.offset().y
    }

    fn set_offset(&mut self, offset: u16) {
        self.state.set_offset(Position::new(0, offset));
    }

    fn content_height(&self) -> u16 {
        self.content_height
    }

    fn viewport_height(&self) -> u16 {
        self.viewport_height
    }
}
