//! Game loop driver
//!
//! Turns host frame timestamps into variable deltas and runs update then
//! render once per frame. There is no fixed timestep: the simulation copes
//! with any delta by clamping lane progress.

use crate::consts::{DEMO_TOGGLE_KEY, SCHEME_TOGGLE_KEY};
use crate::error::ConfigError;
use crate::renderer::{FrameView, Render};
use crate::settings::Settings;
use crate::sim::input::normalize_key;
use crate::sim::{
    InputState, LaneTable, LossCause, SessionEvent, SessionPhase, SessionState, autopilot, tick,
};

/// Milliseconds between consecutive host timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous timestamp; 0 on the first frame or if time went backwards
    pub fn delta(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (timestamp - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(timestamp);
        dt as f32
    }
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    pub settings: Settings,
    pub lanes: LaneTable,
    pub session: SessionState,
    pub input: InputState,
    clock: FrameClock,
    demo_mode: bool,
}

impl Game {
    /// Validate configuration and build an idle session
    pub fn new(mut settings: Settings, lanes: LaneTable) -> Result<Self, ConfigError> {
        settings.bindings.normalize();
        settings.validate()?;
        lanes.validate()?;
        let session = SessionState::new(&lanes, &settings);
        Ok(Self {
            settings,
            lanes,
            session,
            input: InputState::new(),
            clock: FrameClock::new(),
            demo_mode: false,
        })
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        self.demo_mode = on;
        if !on {
            self.input.release_synthetic();
        }
        log::info!("Demo mode: {}", on);
    }

    /// Host key-down. Handles host-level keys, then records the press.
    pub fn key_down(&mut self, key: &str) {
        let key_id = normalize_key(key);

        if key_id == DEMO_TOGGLE_KEY {
            self.set_demo_mode(!self.demo_mode);
            return;
        }

        if self.session.phase() == SessionPhase::Idle
            && key_id == SCHEME_TOGGLE_KEY
            && key_id != self.settings.bindings.start
        {
            self.cycle_scheme();
            return;
        }

        // A lost session is terminal; the host builds a fresh one on demand
        if self.session.phase() == SessionPhase::Lost && key_id == self.settings.bindings.start {
            self.restart();
        }

        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Replace the session with a fresh idle one
    pub fn restart(&mut self) {
        self.session = SessionState::new(&self.lanes, &self.settings);
        self.input.clear();
        log::info!("Session reset");
    }

    /// Switch to the next control scheme, persist it and start over
    pub fn cycle_scheme(&mut self) {
        let scheme = self.settings.scheme.next();
        self.settings.apply_scheme(scheme);
        self.settings.save();
        self.restart();
        log::info!("Controls: {}", scheme.as_str());
    }

    /// Run one simulation step of `dt` milliseconds
    pub fn update(&mut self, dt: f32) {
        if self.demo_mode {
            autopilot::drive(&self.session, &self.settings, &mut self.input);
        }
        tick(
            &mut self.session,
            &mut self.input,
            &self.lanes,
            &self.settings,
            dt,
        );
        self.log_events();
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            session: &self.session,
            input: &self.input,
            lanes: &self.lanes,
            settings: &self.settings,
            demo_mode: self.demo_mode,
        }
    }

    /// One host frame: delta from the timestamp, update, then render
    pub fn frame<R: Render>(&mut self, timestamp: f64, renderer: &mut R) {
        let dt = self.clock.delta(timestamp);
        self.update(dt);
        renderer.render(&self.view());
    }

    fn log_events(&self) {
        for event in &self.session.events {
            match *event {
                SessionEvent::Started => log::info!("Session started"),
                SessionEvent::Routed { ball, lane } => {
                    log::debug!("Ball {} routed to {}", ball, lane.as_str())
                }
                SessionEvent::Caught { ball, lane } => {
                    log::debug!("Ball {} caught at end of {}", ball, lane.as_str())
                }
                SessionEvent::Dropped { ball } => log::debug!("Ball {} dropped", ball),
                SessionEvent::SpawnWindowOpened => log::info!(
                    "Add-ball window open ({} ms to respond)",
                    self.settings.countdown_ms
                ),
                SessionEvent::BallAdded { ball } => {
                    log::info!("Ball {} added ({} total)", ball, self.session.ball_count())
                }
                SessionEvent::Lost { cause } => {
                    let reason = match cause {
                        LossCause::MissedCatch { lane } => {
                            format!("missed catch on {}", lane.as_str())
                        }
                        LossCause::CountdownExpired => "add-ball countdown expired".to_string(),
                    };
                    log::info!(
                        "Game lost: {} after {:.1}s with {} balls",
                        reason,
                        self.session.elapsed_ms / 1000.0,
                        self.session.ball_count()
                    );
                }
            }
        }
    }
}
