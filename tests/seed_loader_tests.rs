use async_trait::async_trait;
use mapmosaic::prelude::*;
use std::cell::RefCell;

/// Startup seeding through the async loader and the frame-driven schedule
#[cfg(test)]
mod seed_loader_tests {
    use super::*;

    /// Records requested sleeps without waiting
    #[derive(Default)]
    struct RecordingDelay {
        sleeps: RefCell<Vec<Duration>>,
    }

    #[async_trait(?Send)]
    impl Delay for RecordingDelay {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }

    fn controller() -> PlacementController<HeadlessLayer> {
        PlacementController::new(
            PaletteStore::default(),
            PixelStore::new(),
            HeadlessLayer::default(),
            AnimationRunner::new(AnimationConfig::default()),
        )
    }

    fn examples_with_one_invalid() -> Vec<SeedPixel> {
        vec![
            SeedPixel::new(LatLng::new(39.9042, 116.4074), Color::parse("#ff6b6b")),
            SeedPixel::new(LatLng::new(31.2304, 121.4737), Color::parse("#4ecdc4")),
            SeedPixel::new(LatLng::new(f64::NAN, 0.0), None).labeled("broken"),
            SeedPixel::new(LatLng::new(35.6762, 139.6503), None),
            SeedPixel::new(LatLng::new(1.3521, 103.8198), Color::parse("#feca57")),
        ]
    }

    #[test]
    fn test_one_bad_example_does_not_stop_the_rest() {
        let mut controller = controller();
        let delay = RecordingDelay::default();
        let mut loader =
            SeedLoader::new(Duration::from_millis(1000), Duration::from_millis(1000)).with_seed(42);

        let report = futures::executor::block_on(loader.load_examples(
            &mut controller,
            &examples_with_one_invalid(),
            &delay,
        ));

        assert_eq!(report.placed_count(), 4);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.failed[0].0, 2);
        assert!(matches!(
            report.failed[0].1,
            MosaicError::InvalidCoordinate(_)
        ));
        assert_eq!(controller.pixels().count(), 4);
        assert_eq!(controller.layer().rendered().len(), 4);

        let sleeps = delay.sleeps.borrow();
        assert_eq!(sleeps[0], Duration::from_millis(1000));
        let jitter: Duration = sleeps[1..].iter().sum();
        assert!(jitter <= Duration::from_secs(1));
    }

    #[test]
    fn test_zero_jitter_places_in_list_order() {
        let mut controller = controller();
        let examples = default_examples();
        let mut loader = SeedLoader::new(Duration::ZERO, Duration::ZERO);

        let report =
            futures::executor::block_on(loader.load_examples(&mut controller, &examples, &NoDelay));

        assert_eq!(report.placed_count(), examples.len());
        let placed: Vec<LatLng> = controller.pixels().iter().map(|p| p.coordinate()).collect();
        let expected: Vec<LatLng> = examples.iter().map(|e| e.coordinate).collect();
        assert_eq!(placed, expected);
    }

    #[test]
    fn test_schedule_places_nothing_before_start_delay() {
        let mut controller = controller();
        let mut schedule = SeedLoader::new(Duration::from_millis(1000), Duration::from_millis(1000))
            .with_seed(3)
            .schedule(examples_with_one_invalid());
        assert_eq!(schedule.remaining(), 5);

        assert_eq!(schedule.poll(Duration::from_millis(999), &mut controller), 0);
        assert_eq!(controller.pixels().count(), 0);

        // Start delay plus the largest possible jitter
        schedule.poll(Duration::from_millis(1001), &mut controller);
        assert!(schedule.is_done());
        assert_eq!(controller.pixels().count(), 4);

        let report = schedule.into_report();
        assert_eq!(report.placed_count(), 4);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_seed_pixels_use_active_color_when_unset() {
        let mut controller = controller();
        controller.select_color("#5f27cd");
        let examples = vec![SeedPixel::new(LatLng::new(0.0, 0.0), None)];
        let mut loader = SeedLoader::new(Duration::ZERO, Duration::ZERO);

        let report =
            futures::executor::block_on(loader.load_examples(&mut controller, &examples, &NoDelay));
        assert_eq!(report.placed[0].color().as_str(), "#5f27cd");
    }

    #[tokio::test]
    async fn test_tokio_timers_drive_the_loader() {
        let mut controller = controller();
        let mut loader =
            SeedLoader::new(Duration::from_millis(5), Duration::from_millis(10)).with_seed(1);

        let started = tokio::time::Instant::now();
        let report = loader
            .load_examples(&mut controller, &default_examples(), &TokioDelay)
            .await;

        assert!(started.elapsed() >= Duration::from_millis(5));
        assert_eq!(report.placed_count(), 8);
        assert_eq!(controller.pixels().count(), 8);
    }

    #[tokio::test]
    async fn test_free_function_uses_given_start_delay() {
        let mut controller = controller();
        let examples = vec![SeedPixel::new(LatLng::new(10.0, 10.0), None)];

        let report = load_examples(&mut controller, &examples, Duration::from_millis(1)).await;
        assert_eq!(report.placed_count(), 1);
    }
}
