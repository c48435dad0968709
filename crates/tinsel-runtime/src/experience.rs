//! Experience controller: the top-level activation sequence.
//!
//! `Idle → CountingDown(n) → Active → Idle`. The controller is the only writer
//! of the experience-active flag and the activation trigger counter; entities
//! read both through [`ExperienceSignal`].

use crate::clock::FrameTick;
use crate::event::SceneEvent;
use crate::event_bus::EventBus;
use crate::system::RuntimeSystem;
use crate::timer::{Scheduler, TaskHandle};
use serde::{Deserialize, Serialize};
use tinsel_core::Result;

/// Seconds between countdown steps
const COUNTDOWN_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperiencePhase {
    Idle,
    /// Seconds left before activation
    CountingDown { remaining: u32 },
    Active,
}

/// Read-only view of the controller that entities consume each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceSignal {
    pub active: bool,
    /// Incremented on every activation and ribbon replay
    pub trigger: u32,
}

impl ExperienceSignal {
    /// Target value for every growth scalar
    pub fn growth_target(&self) -> f32 {
        if self.active {
            1.0
        } else {
            0.0
        }
    }
}

pub struct ExperienceController {
    phase: ExperiencePhase,
    trigger: u32,
    panel_visible: bool,
    countdown_seconds: u32,
    scheduler: Scheduler,
    countdown_task: Option<TaskHandle>,
}

impl Default for ExperienceController {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ExperienceController {
    pub fn new(countdown_seconds: u32) -> Self {
        Self {
            phase: ExperiencePhase::Idle,
            trigger: 0,
            panel_visible: true,
            countdown_seconds,
            scheduler: Scheduler::new(),
            countdown_task: None,
        }
    }

    pub fn phase(&self) -> ExperiencePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ExperiencePhase::Active
    }

    pub fn trigger(&self) -> u32 {
        self.trigger
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Delay applied to the next start request
    pub fn set_countdown_seconds(&mut self, seconds: u32) {
        self.countdown_seconds = seconds;
    }

    pub fn signal(&self) -> ExperienceSignal {
        ExperienceSignal {
            active: self.is_active(),
            trigger: self.trigger,
        }
    }

    /// Start button.
    ///
    /// From `Idle` this hides the panel and either activates immediately or
    /// begins the countdown. While `Active` it closes instead. A second start
    /// during a countdown is ignored.
    pub fn request_start(&mut self) {
        match self.phase {
            ExperiencePhase::Active => self.close(),
            ExperiencePhase::CountingDown { .. } => {
                log::debug!("[experience] start ignored, countdown already running");
            }
            ExperiencePhase::Idle => {
                self.panel_visible = false;
                if self.countdown_seconds == 0 {
                    self.activate();
                } else {
                    self.phase = ExperiencePhase::CountingDown {
                        remaining: self.countdown_seconds,
                    };
                    self.countdown_task = Some(self.scheduler.schedule_repeating(COUNTDOWN_STEP));
                    log::info!(
                        "[experience] counting down from {}",
                        self.countdown_seconds
                    );
                }
            }
        }
    }

    /// Return to `Idle` immediately, cancelling any pending countdown
    pub fn close(&mut self) {
        self.cancel_countdown();
        if self.phase != ExperiencePhase::Idle {
            log::info!("[experience] closed");
        }
        self.phase = ExperiencePhase::Idle;
        self.panel_visible = true;
    }

    /// Restart the ribbon wrap. Only meaningful while active.
    pub fn replay_ribbon(&mut self) {
        if self.is_active() {
            self.trigger += 1;
            log::debug!("[experience] ribbon replay (trigger {})", self.trigger);
        }
    }

    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    /// Route a scene event. Returns true if the controller consumed it.
    pub fn handle_event(&mut self, event: SceneEvent) -> bool {
        match event {
            SceneEvent::StartRequested => self.request_start(),
            SceneEvent::CloseRequested => self.close(),
            SceneEvent::ReplayRibbon => self.replay_ribbon(),
            SceneEvent::TogglePanel => self.toggle_panel(),
            _ => return false,
        }
        true
    }

    /// Advance pending countdown steps by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        for handle in self.scheduler.advance(dt) {
            if Some(handle) != self.countdown_task {
                continue;
            }
            if let ExperiencePhase::CountingDown { remaining } = self.phase {
                let remaining = remaining.saturating_sub(1);
                log::debug!("[experience] countdown {remaining}");
                if remaining == 0 {
                    self.cancel_countdown();
                    self.activate();
                    break;
                }
                self.phase = ExperiencePhase::CountingDown { remaining };
            }
        }
    }

    fn activate(&mut self) {
        self.phase = ExperiencePhase::Active;
        self.trigger += 1;
        log::info!("[experience] active (trigger {})", self.trigger);
    }

    fn cancel_countdown(&mut self) {
        if let Some(handle) = self.countdown_task.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl RuntimeSystem for ExperienceController {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, tick: &FrameTick, _events: &mut EventBus) -> Result<()> {
        self.advance(tick.delta as f64);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.cancel_countdown();
        self.scheduler.cancel_all();
        Ok(())
    }

    fn name(&self) -> &str {
        "experience"
    }
}
