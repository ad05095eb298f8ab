//! Placement animations
//!
//! Every placed pixel gets its own [`PlacementAnimation`], a small state
//! machine (`Pending -> Running -> Finished`) whose visuals are a pure
//! function of its progress. The [`AnimationRunner`] advances them when the
//! host calls [`AnimationRunner::tick`], and asks for the next frame through
//! an injected [`FrameScheduler`], so tests can drive frames by hand.
//!
//! Animations only ever touch transient overlays. They never read or write
//! the pixel store, and a failing surface simply ends the animation.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::easing::{EasingType, Lerp};
use crate::core::{
    color::Color,
    config::{AnimationConfig, AnimationStyle},
    geo::{LatLng, Point},
};
use crate::layers::adapter::{OverlayId, OverlayShape, OverlaySurface};
use crate::state::pixels::{Pixel, PixelId};

/// Host capability to request one more frame (e.g. `requestAnimationFrame`
/// or `egui::Context::request_repaint`).
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F> FrameScheduler for F
where
    F: FnMut(),
{
    fn request_frame(&mut self) {
        self()
    }
}

/// Scheduler that only counts requests; the caller drives ticks itself.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    requested: Rc<Cell<usize>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested since creation or the last [`take_requests`](Self::take_requests)
    pub fn requests(&self) -> usize {
        self.requested.get()
    }

    pub fn take_requests(&self) -> usize {
        self.requested.replace(0)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requested.set(self.requested.get() + 1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Pending,
    Running,
    Finished,
}

/// Visual parameters of one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub radius: f64,
    pub scale: f64,
    pub opacity: f32,
}

impl OverlayFrame {
    /// Frame for a raw progress value in `[0, 1]`
    pub fn at(config: &AnimationConfig, progress: f64) -> Self {
        let t = config.easing.apply(progress);
        // Opacity follows raw progress so overshooting easings never push it past 1
        let fade = EasingType::Linear.apply(progress);
        Self {
            radius: config.start_radius.lerp(&config.end_radius, t).max(0.0),
            scale: config.start_scale.lerp(&config.end_scale, t).max(0.0),
            opacity: config
                .start_opacity
                .lerp(&config.end_opacity, fade)
                .clamp(0.0, 1.0),
        }
    }
}

/// One pixel's placement effect
#[derive(Debug, Clone)]
pub struct PlacementAnimation {
    id: AnimationId,
    pixel_id: PixelId,
    coordinate: LatLng,
    anchor: Point,
    color: Color,
    progress: f64,
    state: AnimationState,
    overlay: Option<OverlayId>,
}

impl PlacementAnimation {
    fn new(id: AnimationId, pixel: &Pixel, anchor: Point) -> Self {
        Self {
            id,
            pixel_id: pixel.id().clone(),
            coordinate: pixel.coordinate(),
            anchor,
            color: pixel.color().clone(),
            progress: 0.0,
            state: AnimationState::Pending,
            overlay: None,
        }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn pixel_id(&self) -> &PixelId {
        &self.pixel_id
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    fn start(&mut self) {
        if self.state == AnimationState::Pending {
            self.state = AnimationState::Running;
        }
    }

    fn shape(&self, style: AnimationStyle, frame: OverlayFrame) -> OverlayShape {
        OverlayShape {
            style,
            coordinate: self.coordinate,
            anchor: self.anchor,
            color: self.color.clone(),
            radius: frame.radius,
            scale: frame.scale,
            opacity: frame.opacity,
        }
    }

    /// Advances one tick. Any surface error ends the animation.
    fn step(
        &mut self,
        config: &AnimationConfig,
        surface: &mut dyn OverlaySurface,
        dt: Duration,
    ) {
        if self.state != AnimationState::Running {
            return;
        }

        let duration = Duration::from_millis(config.duration_ms);
        let delta = if duration.is_zero() {
            1.0
        } else {
            dt.as_secs_f64() / duration.as_secs_f64()
        };
        self.progress = (self.progress + delta).min(1.0);

        if self.progress >= 1.0 {
            self.finish(surface);
            return;
        }

        let shape = self.shape(config.style, OverlayFrame::at(config, self.progress));
        let drawn = match self.overlay {
            Some(overlay) => surface.update_overlay(overlay, shape),
            None => surface.add_overlay(shape).map(|overlay| {
                self.overlay = Some(overlay);
            }),
        };

        if let Err(e) = drawn {
            log::debug!("animation for pixel {} dropped: {}", self.pixel_id, e);
            self.finish(surface);
        }
    }

    fn finish(&mut self, surface: &mut dyn OverlaySurface) {
        if let Some(overlay) = self.overlay.take() {
            surface.remove_overlay(overlay);
        }
        self.state = AnimationState::Finished;
    }
}

/// Drives every placement animation of a session
pub struct AnimationRunner {
    config: AnimationConfig,
    animations: Vec<PlacementAnimation>,
    next_id: u64,
    scheduler: Box<dyn FrameScheduler>,
}

impl AnimationRunner {
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_scheduler(config, ManualScheduler::new())
    }

    pub fn with_scheduler(config: AnimationConfig, scheduler: impl FrameScheduler + 'static) -> Self {
        Self {
            config,
            animations: Vec::new(),
            next_id: 1,
            scheduler: Box::new(scheduler),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn set_scheduler(&mut self, scheduler: impl FrameScheduler + 'static) {
        self.scheduler = Box::new(scheduler);
    }

    /// Starts the placement effect for `pixel`, anchored at `anchor` on screen.
    ///
    /// Returns immediately; visuals appear on the next [`tick`](Self::tick).
    /// With animations disabled nothing is tracked and the returned id is
    /// already unknown to [`state`](Self::state).
    pub fn play(&mut self, pixel: &Pixel, anchor: Point) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        if !self.config.enabled {
            return id;
        }

        let mut animation = PlacementAnimation::new(id, pixel, anchor);
        animation.start();
        self.animations.push(animation);
        self.scheduler.request_frame();
        id
    }

    /// Advances all running animations by `dt` and returns how many are
    /// still running. Requests another frame while any remain.
    pub fn tick(&mut self, surface: &mut dyn OverlaySurface, dt: Duration) -> usize {
        for animation in &mut self.animations {
            animation.step(&self.config, surface, dt);
        }

        let running = self.active_count();
        if running > 0 {
            self.scheduler.request_frame();
        }
        running
    }

    /// Stops one animation and releases its overlay
    pub fn cancel(&mut self, surface: &mut dyn OverlaySurface, id: AnimationId) -> bool {
        match self.animations.iter_mut().find(|a| a.id == id) {
            Some(animation) if animation.state != AnimationState::Finished => {
                animation.finish(surface);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self, surface: &mut dyn OverlaySurface) {
        for animation in &mut self.animations {
            if animation.state != AnimationState::Finished {
                animation.finish(surface);
            }
        }
    }

    pub fn state(&self, id: AnimationId) -> Option<AnimationState> {
        self.get(id).map(|a| a.state)
    }

    pub fn get(&self, id: AnimationId) -> Option<&PlacementAnimation> {
        self.animations.iter().find(|a| a.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.animations
            .iter()
            .filter(|a| a.state == AnimationState::Running)
            .count()
    }

    /// Animations currently held, running or finished but not yet pruned
    pub fn tracked_count(&self) -> usize {
        self.animations.len()
    }

    pub fn is_animating(&self) -> bool {
        self.active_count() > 0
    }

    /// Forgets finished animations; returns how many were dropped
    pub fn prune_finished(&mut self) -> usize {
        let before = self.animations.len();
        self.animations
            .retain(|a| a.state != AnimationState::Finished);
        before - self.animations.len()
    }
}

impl std::fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("config", &self.config)
            .field("animations", &self.animations)
            .finish()
    }
}
