//! One-shot insertion of example pixels at startup
//!
//! After a start delay every example goes through the normal
//! [`PlacementController::place`] path, each after its own random delay of
//! at most one second. A failing example is logged and skipped; the rest
//! still land.

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use crate::core::{
    color::Color,
    config::SeedConfig,
    constants::{SEED_DELAY_MS, SEED_MAX_JITTER_MS},
    geo::LatLng,
};
use crate::layers::adapter::MapLayerAdapter;
use crate::placement::controller::PlacementController;
use crate::state::pixels::Pixel;
use crate::MosaicError;

/// An example pixel; `color: None` uses the active palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPixel {
    pub coordinate: LatLng,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub label: Option<String>,
}

impl SeedPixel {
    pub fn new(coordinate: LatLng, color: Option<Color>) -> Self {
        Self {
            coordinate,
            color,
            label: None,
        }
    }

    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// A handful of world cities in palette colors
pub fn default_examples() -> Vec<SeedPixel> {
    [
        ("Beijing", 39.9042, 116.4074, "#ff6b6b"),
        ("Shanghai", 31.2304, 121.4737, "#4ecdc4"),
        ("Tokyo", 35.6762, 139.6503, "#45b7d1"),
        ("Singapore", 1.3521, 103.8198, "#feca57"),
        ("New Delhi", 28.6139, 77.2090, "#ff9ff3"),
        ("Paris", 48.8566, 2.3522, "#54a0ff"),
        ("New York", 40.7128, -74.0060, "#10ac84"),
        ("Sydney", -33.8688, 151.2093, "#ee5a24"),
    ]
    .into_iter()
    .map(|(label, lat, lng, color)| {
        SeedPixel::new(LatLng::new(lat, lng), Some(Color::from_literal(color))).labeled(label)
    })
    .collect()
}

/// Outcome of a seeding run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeedReport {
    pub placed: Vec<Pixel>,
    /// Index into the example list and the error it produced
    pub failed: Vec<(usize, MosaicError)>,
}

impl SeedReport {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    fn record<L: MapLayerAdapter>(
        &mut self,
        controller: &mut PlacementController<L>,
        index: usize,
        example: &SeedPixel,
    ) {
        match controller.place(example.coordinate, example.color.clone()) {
            Ok(pixel) => self.placed.push(pixel),
            Err(e) => {
                log::warn!(
                    "seed pixel #{} ({}) skipped: {}",
                    index,
                    example.label.as_deref().unwrap_or("unnamed"),
                    e
                );
                self.failed.push((index, e));
            }
        }
    }
}

/// Host timer used by the async loader
#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

/// Returns immediately; for hosts that want the seed pixels at once
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait(?Send)]
impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(feature = "tokio-runtime")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[cfg(feature = "tokio-runtime")]
#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Plans and performs the startup seeding
#[derive(Debug)]
pub struct SeedLoader {
    start_delay: Duration,
    max_jitter: Duration,
    rng: StdRng,
}

impl SeedLoader {
    /// `max_jitter` is capped at one second per item
    pub fn new(start_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            start_delay,
            max_jitter: max_jitter.min(Duration::from_millis(SEED_MAX_JITTER_MS)),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_ms),
            Duration::from_millis(config.max_jitter_ms),
        )
    }

    /// Makes the per-item delays reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }

    /// Per-item delays after the start delay, as `(index, delay)` sorted by
    /// delay (ties keep list order)
    pub fn plan(&mut self, count: usize) -> Vec<(usize, Duration)> {
        let max_ms = self.max_jitter.as_millis() as u64;
        let mut plan: Vec<(usize, Duration)> = (0..count)
            .map(|i| (i, Duration::from_millis(self.rng.gen_range(0..=max_ms))))
            .collect();
        plan.sort_by_key(|&(index, delay)| (delay, index));
        plan
    }

    /// Waits for the start delay, then places every example after its own
    /// jitter. Never fails; failures are collected in the report.
    pub async fn load_examples<L, D>(
        &mut self,
        controller: &mut PlacementController<L>,
        examples: &[SeedPixel],
        delay: &D,
    ) -> SeedReport
    where
        L: MapLayerAdapter,
        D: Delay + ?Sized,
    {
        delay.sleep(self.start_delay).await;
        log::info!("seeding {} example pixels", examples.len());

        let mut report = SeedReport::default();
        let mut waited = Duration::ZERO;
        for (index, due) in self.plan(examples.len()) {
            if due > waited {
                delay.sleep(due - waited).await;
                waited = due;
            }
            report.record(controller, index, &examples[index]);
        }

        log::info!(
            "seeding finished: {} placed, {} failed",
            report.placed_count(),
            report.failed_count()
        );
        report
    }

    /// Places every example right away, ignoring all delays
    pub fn load_now<L: MapLayerAdapter>(
        &mut self,
        controller: &mut PlacementController<L>,
        examples: &[SeedPixel],
    ) -> SeedReport {
        futures::executor::block_on(self.load_examples(controller, examples, &NoDelay))
    }

    /// Same plan for hosts that drive time themselves, frame by frame
    pub fn schedule(mut self, examples: Vec<SeedPixel>) -> SeedSchedule {
        let plan = self.plan(examples.len());
        let mut slots: Vec<Option<SeedPixel>> = examples.into_iter().map(Some).collect();
        let items = plan
            .into_iter()
            .filter_map(|(index, due)| {
                slots[index]
                    .take()
                    .map(|example| (self.start_delay + due, index, example))
            })
            .collect();

        SeedSchedule {
            items,
            elapsed: Duration::ZERO,
            report: SeedReport::default(),
        }
    }
}

impl Default for SeedLoader {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(SEED_DELAY_MS),
            Duration::from_millis(SEED_MAX_JITTER_MS),
        )
    }
}

/// Seeding driven by [`SeedSchedule::poll`] from a frame or timer callback
#[derive(Debug)]
pub struct SeedSchedule {
    items: VecDeque<(Duration, usize, SeedPixel)>,
    elapsed: Duration,
    report: SeedReport,
}

impl SeedSchedule {
    /// Advances the clock by `dt` and places every example now due.
    /// Returns how many examples were attempted.
    pub fn poll<L: MapLayerAdapter>(
        &mut self,
        dt: Duration,
        controller: &mut PlacementController<L>,
    ) -> usize {
        self.elapsed += dt;
        let mut attempted = 0;
        while let Some((due, _, _)) = self.items.front() {
            if *due > self.elapsed {
                break;
            }
            if let Some((_, index, example)) = self.items.pop_front() {
                self.report.record(controller, index, &example);
                attempted += 1;
            }
        }
        attempted
    }

    pub fn is_done(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    pub fn report(&self) -> &SeedReport {
        &self.report
    }

    pub fn into_report(self) -> SeedReport {
        self.report
    }
}

/// Seeds `examples` after `delay` using tokio timers and the default jitter
#[cfg(feature = "tokio-runtime")]
pub async fn load_examples<L: MapLayerAdapter>(
    controller: &mut PlacementController<L>,
    examples: &[SeedPixel],
    delay: Duration,
) -> SeedReport {
    SeedLoader::new(delay, Duration::from_millis(SEED_MAX_JITTER_MS))
        .load_examples(controller, examples, &TokioDelay)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_respects_jitter_cap_and_covers_all() {
        let mut loader = SeedLoader::new(Duration::ZERO, Duration::from_secs(5)).with_seed(7);
        assert_eq!(loader.max_jitter(), Duration::from_secs(1));

        let plan = loader.plan(20);
        assert_eq!(plan.len(), 20);
        assert!(plan.iter().all(|(_, d)| *d <= Duration::from_secs(1)));
        assert!(plan.windows(2).all(|w| w[0].1 <= w[1].1));

        let mut indices: Vec<usize> = plan.iter().map(|(i, _)| *i).collect();
        indices.sort();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_jitter_keeps_list_order() {
        let mut loader = SeedLoader::new(Duration::ZERO, Duration::ZERO);
        let plan = loader.plan(4);
        assert_eq!(
            plan,
            vec![
                (0, Duration::ZERO),
                (1, Duration::ZERO),
                (2, Duration::ZERO),
                (3, Duration::ZERO)
            ]
        );
    }

    #[test]
    fn test_load_now_places_everything() {
        use crate::animation::runner::AnimationRunner;
        use crate::core::config::AnimationConfig;
        use crate::layers::headless::HeadlessLayer;
        use crate::state::{palette::PaletteStore, pixels::PixelStore};

        let mut controller = PlacementController::new(
            PaletteStore::default(),
            PixelStore::new(),
            HeadlessLayer::default(),
            AnimationRunner::new(AnimationConfig::default()),
        );
        let report = SeedLoader::default().load_now(&mut controller, &default_examples());
        assert_eq!(report.placed_count(), 8);
        assert_eq!(controller.layer().rendered().len(), 8);
    }

    #[test]
    fn test_default_examples_are_valid() {
        let examples = default_examples();
        assert_eq!(examples.len(), 8);
        assert!(examples.iter().all(|e| e.coordinate.is_valid()));
        assert_eq!(examples[0].label.as_deref(), Some("Beijing"));
    }

    #[test]
    fn test_seed_pixel_json_defaults() {
        let seed: SeedPixel =
            serde_json::from_str(r#"{ "coordinate": { "lat": 1.5, "lng": 2.5 } }"#).unwrap();
        assert_eq!(seed.coordinate, LatLng::new(1.5, 2.5));
        assert!(seed.color.is_none());
        assert!(seed.label.is_none());
    }
}
