//! Rendering collaborators
//!
//! The simulation never draws. Each frame the driver hands a `FrameView`
//! to a `Render` implementation: the canvas 2D renderer in the browser, or
//! the text renderer in headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod hud;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRender;

use crate::settings::Settings;
use crate::sim::{InputState, LaneTable, SessionState};

/// Read-only snapshot of everything a renderer may show
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub session: &'a SessionState,
    pub input: &'a InputState,
    pub lanes: &'a LaneTable,
    pub settings: &'a Settings,
    pub demo_mode: bool,
}

/// Draws one frame
pub trait Render {
    fn render(&mut self, view: &FrameView<'_>);
}

/// Logs the HUD status line whenever it changes
#[derive(Debug, Default)]
pub struct TextRender {
    last_line: String,
    lines_written: usize,
}

impl TextRender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent status line
    pub fn last_line(&self) -> &str {
        &self.last_line
    }

    /// Number of distinct status lines emitted so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

impl Render for TextRender {
    fn render(&mut self, view: &FrameView<'_>) {
        let line = hud::status_line(view);
        if line != self.last_line {
            log::info!("{}", line);
            self.last_line = line;
            self.lines_written += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_render_only_logs_changes() {
        let lanes = LaneTable::default();
        let settings = Settings::default();
        let session = SessionState::new(&lanes, &settings);
        let input = InputState::new();
        let view = FrameView {
            session: &session,
            input: &input,
            lanes: &lanes,
            settings: &settings,
            demo_mode: false,
        };

        let mut render = TextRender::new();
        render.render(&view);
        render.render(&view);
        assert_eq!(render.lines_written(), 1);
        assert_eq!(
            render.last_line(),
            "PRESS \"W\" TO START | C: switch controls (Split)"
        );
    }
}
