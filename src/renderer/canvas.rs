//! Canvas 2D renderer for the browser build

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{FrameView, Render, hud};
use crate::sim::{SessionPhase, SessionState};

const TEXT_COLOR: &str = "#000";
const LANE_COLOR: &str = "#333";
const LANE_WIDTH: f64 = 5.0;
const PROMPT_COLOR: &str = "blue";
const COUNTDOWN_COLOR: &str = "#c00";
const TITLE_FONT: &str = "40px Arial";
const HUD_FONT: &str = "20px Arial";
const PROMPT_FONT: &str = "25px Arial";
const LEGEND_FONT: &str = "16px Arial";
const MARGIN: f64 = 10.0;

pub struct CanvasRender {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRender {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn text_width(&self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn text(&self, text: &str, x: f64, y: f64) {
        self.ctx.fill_text(text, x, y).ok();
    }

    fn centered_text(&self, text: &str, y: f64) {
        let x = (self.width - self.text_width(text)) / 2.0;
        self.text(text, x, y);
    }

    fn right_text(&self, text: &str, y: f64) {
        let x = self.width - self.text_width(text) - MARGIN;
        self.text(text, x, y);
    }

    fn draw_start_screen(&self, view: &FrameView<'_>) {
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font(TITLE_FONT);
        self.centered_text(&hud::start_prompt(&view.settings.bindings), self.height / 2.0);

        self.ctx.set_font(LEGEND_FONT);
        let mut y = self.height / 2.0 + 40.0;
        for line in hud::legend(&view.settings.bindings, view.settings.spawn_enabled) {
            self.centered_text(&line, y);
            y += 22.0;
        }
        self.centered_text(&hud::scheme_hint(view.settings.scheme), y + 12.0);
    }

    fn draw_lost_screen(&self, session: &SessionState) {
        self.ctx.set_fill_style_str(TEXT_COLOR);
        let mut y = self.height / 2.0;
        for (i, line) in hud::lost_summary(session).iter().enumerate() {
            self.ctx.set_font(if i == 0 { TITLE_FONT } else { HUD_FONT });
            self.centered_text(line, y);
            y += if i == 0 { 40.0 } else { 28.0 };
        }
    }

    fn draw_hud(&self, view: &FrameView<'_>) {
        let session = view.session;

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font(HUD_FONT);
        self.text(&hud::format_elapsed(session.elapsed_ms), MARGIN, 30.0);
        self.text(&format!("Key: {}", view.input.label()), MARGIN, 60.0);
        self.text(&hud::ball_count_text(session), MARGIN, 90.0);

        self.right_text(hud::RUNNING_LABEL, 30.0);
        if view.demo_mode {
            self.right_text("Demo", 60.0);
        }

        self.ctx.set_font(LEGEND_FONT);
        let legend = hud::legend(&view.settings.bindings, view.settings.spawn_enabled);
        let mut y = self.height - MARGIN - 20.0 * (legend.len() as f64 - 1.0);
        for line in &legend {
            self.right_text(line, y);
            y += 20.0;
        }

        if session.spawn.countdown_active {
            self.ctx.set_fill_style_str(COUNTDOWN_COLOR);
            self.ctx.set_font(PROMPT_FONT);
            self.centered_text(
                &hud::countdown_text(&view.settings.bindings, session.spawn.countdown_remaining),
                40.0,
            );
        }
    }

    fn draw_lanes(&self, view: &FrameView<'_>) {
        self.ctx.set_stroke_style_str(LANE_COLOR);
        self.ctx.set_line_width(LANE_WIDTH);

        for (_, lane) in view.lanes.iter() {
            let c = &lane.curve;
            self.ctx.begin_path();
            self.ctx.move_to(c.p0.x as f64, c.p0.y as f64);
            self.ctx.bezier_curve_to(
                c.p1.x as f64,
                c.p1.y as f64,
                c.p2.x as f64,
                c.p2.y as f64,
                c.p3.x as f64,
                c.p3.y as f64,
            );
            self.ctx.stroke();
        }
    }

    fn draw_balls(&self, session: &SessionState) {
        for ball in &session.balls {
            self.ctx.begin_path();
            self.ctx
                .arc(ball.pos.x as f64, ball.pos.y as f64, ball.radius as f64, 0.0, TAU)
                .ok();
            self.ctx.set_fill_style_str(&ball.color);
            self.ctx.fill();
        }
    }
}

impl Render for CanvasRender {
    fn render(&mut self, view: &FrameView<'_>) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);

        match view.session.phase() {
            SessionPhase::Idle => self.draw_start_screen(view),
            SessionPhase::Lost => self.draw_lost_screen(view.session),
            SessionPhase::Running => {
                self.draw_hud(view);
                self.draw_lanes(view);
                self.draw_balls(view.session);

                if view.session.any_caught() {
                    self.ctx.set_fill_style_str(PROMPT_COLOR);
                    self.ctx.set_font(PROMPT_FONT);
                    self.centered_text(
                        &hud::drop_prompt(&view.settings.bindings),
                        self.height / 2.0 + 50.0,
                    );
                }
            }
        }
    }
}
