//! Tracking engine: the single-threaded, tick-driven loop.
//!
//! [`TrackingEngine`] owns the [`Scene`] and the [`TrackingState`], and
//! runs each tick in a fixed order:
//!
//! 1. responsibility re-evaluation ([`reevaluate`]),
//! 2. handshake reset,
//! 3. object advance,
//! 4. handshake propagation from the responsible camera.
//!
//! Presentation (rendering visible areas, objects) is left to the caller,
//! which can read everything through [`TrackingEngine::scene()`] between
//! ticks.

use std::time::Instant;

use handoff_core::{CameraId, ContractViolation, TickId};
use handoff_scene::{Handshake, Scene, SceneError};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, HandoffConfig};
use crate::metrics::TickMetrics;
use crate::observe::clip_appearance;
use crate::predict::predict_next_position;
use crate::tracking::{acquire, reevaluate, TrackingEvent, TrackingState};

// ── TickReport ─────────────────────────────────────────────────────

/// What happened during one [`TrackingEngine::step()`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The tick that just completed.
    pub tick: TickId,
    /// Tracking state after the tick.
    pub state: TrackingState,
    /// Whether the tracked object is the configured target. `false` while
    /// no camera is responsible.
    pub on_target: bool,
    /// Responsibility changes, in the order they happened.
    pub events: Vec<TrackingEvent>,
    /// Timing and protocol counters.
    pub metrics: TickMetrics,
}

// ── StepError ──────────────────────────────────────────────────────

/// Error returned from [`TrackingEngine::step()`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    /// The scene is inconsistent (stale visible area, unknown camera).
    #[error("scene: {0}")]
    Scene(#[from] SceneError),
    /// An API precondition was broken during the tick.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

// ── TrackingEngine ─────────────────────────────────────────────────

/// Drives the handoff protocol over a [`Scene`].
pub struct TrackingEngine {
    scene: Scene,
    config: HandoffConfig,
    state: TrackingState,
    current_tick: TickId,
    lost_streak: u64,
    handoffs: u64,
    lost_ticks: u64,
    acquisitions: u64,
    last_metrics: TickMetrics,
}

impl TrackingEngine {
    /// Validate `config` against `scene` and run the initial acquisition
    /// scan.
    pub fn new(scene: Scene, config: HandoffConfig) -> Result<Self, ConfigError> {
        config.validate(&scene)?;
        let state = acquire(&scene, config.target);
        let acquisitions = match state {
            TrackingState::Tracking { camera, object } => {
                info!(%camera, %object, "target acquired at start");
                1
            }
            TrackingState::NoResponsibleCamera => {
                info!(target = %config.target, "target not in view at start");
                0
            }
        };
        Ok(Self {
            scene,
            config,
            state,
            current_tick: TickId(0),
            lost_streak: 0,
            handoffs: 0,
            lost_ticks: 0,
            acquisitions,
            last_metrics: TickMetrics::default(),
        })
    }

    /// Execute one tick.
    ///
    /// # Errors
    ///
    /// [`StepError::Scene`] if a camera's visible area no longer matches
    /// the map or its position. Nothing is mutated in that case.
    pub fn step(&mut self) -> Result<TickReport, StepError> {
        let tick_start = Instant::now();
        self.scene.check_areas_current()?;

        // 1. Responsibility.
        let outcome = reevaluate(self.state, &self.scene, &self.config);
        self.state = outcome.state;
        let mut events = Vec::new();
        match outcome.event {
            Some(event) => {
                self.record(&event);
                events.push(event);
            }
            None => self.lost_streak = 0,
        }

        // 2-3. Handshakes from last tick are spent; the world moves on.
        self.scene.clear_handshakes();
        self.scene.advance_objects();

        // 4. Propagation.
        let handshakes_sent = self.propagate()?;

        let tick = TickId(self.current_tick.0 + 1);
        self.current_tick = tick;

        let metrics = TickMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            handshakes_sent,
            candidates_scored: outcome.candidates_scored,
            handoffs: self.handoffs,
            lost_ticks: self.lost_ticks,
            acquisitions: self.acquisitions,
        };
        self.last_metrics = metrics.clone();

        Ok(TickReport {
            tick,
            state: self.state,
            on_target: self.is_on_target(),
            events,
            metrics,
        })
    }

    /// Execute `ticks` ticks, collecting every report.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<TickReport>, StepError> {
        (0..ticks).map(|_| self.step()).collect()
    }

    fn record(&mut self, event: &TrackingEvent) {
        match *event {
            TrackingEvent::Acquired { camera, object } => {
                self.acquisitions += 1;
                self.lost_streak = 0;
                info!(tick = %self.current_tick, %camera, %object, "target acquired");
            }
            TrackingEvent::HandedOff {
                from,
                to,
                object,
                score,
            } => {
                self.handoffs += 1;
                self.lost_streak = 0;
                info!(
                    tick = %self.current_tick,
                    %from,
                    %to,
                    %object,
                    score = score.total,
                    "responsibility handed off"
                );
            }
            TrackingEvent::Lost { camera, object } => {
                self.lost_ticks += 1;
                if self.lost_streak == 0 {
                    warn!(tick = %self.current_tick, %camera, %object, "tracking lost");
                } else {
                    debug!(
                        tick = %self.current_tick,
                        %camera,
                        %object,
                        lost_for = self.lost_streak,
                        "still lost"
                    );
                }
                self.lost_streak += 1;
            }
        }
    }

    /// Write a handshake into every other camera whose visible area holds
    /// the tracked object's cell. Returns how many were written.
    fn propagate(&mut self) -> Result<u32, StepError> {
        let TrackingState::Tracking { camera, object } = self.state else {
            return Ok(0);
        };
        let (Some(sender), Some(tracked)) = (self.scene.camera(camera), self.scene.object(object))
        else {
            return Ok(0);
        };
        let predicted_position = predict_next_position(tracked)?;
        let appearance = clip_appearance(self.scene.map(), sender, tracked);
        let cell = tracked.position().cell();
        let receivers: Vec<CameraId> = self
            .scene
            .cameras()
            .filter(|c| c.id() != camera && c.visible_area().contains(cell))
            .map(|c| c.id())
            .collect();
        for &to in &receivers {
            trace!(from = %camera, %to, %cell, "handshake");
            self.scene.deliver_handshake(
                to,
                Handshake {
                    sender: camera,
                    predicted_position,
                    appearance: appearance.clone(),
                },
            )?;
        }
        Ok(receivers.len() as u32)
    }

    fn is_on_target(&self) -> bool {
        self.state.object() == Some(self.config.target)
    }

    /// Current tracking state.
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// The scene, for presentation between ticks.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for layout changes (map replacement, cameras
    /// added or removed).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The engine configuration.
    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    /// Last completed tick; `TickId(0)` before the first step.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }
}
