mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_breathing::{
        BreathingConfig, BreathingEngine, DEFAULT_TICK_INTERVAL, PeriodicTimer, PollResult,
        SharedBreathing, SoftTimer,
    };

    use crate::common::RecordingPwm;

    const MS: Duration = Duration::from_millis(1);

    fn at(us: u64) -> Instant {
        Instant::from_micros(us)
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = SoftTimer::new();
        assert!(!timer.is_armed());
        assert_eq!(timer.interval(), DEFAULT_TICK_INTERVAL);

        let result = timer.poll(at(10_000));
        assert_eq!(
            result,
            PollResult {
                fired: false,
                sleep_duration: DEFAULT_TICK_INTERVAL,
            }
        );
    }

    #[test]
    fn test_fires_every_interval() {
        let mut timer = SoftTimer::new();
        timer.schedule_periodic(MS);
        assert!(timer.is_armed());

        // First poll starts the schedule
        let result = timer.poll(at(0));
        assert!(!result.fired);
        assert_eq!(result.sleep_duration, MS);

        let result = timer.poll(at(500));
        assert!(!result.fired);
        assert_eq!(result.sleep_duration, Duration::from_micros(500));

        let result = timer.poll(at(1_000));
        assert!(result.fired);
        assert_eq!(result.sleep_duration, MS);

        // Slightly late, keeps the original cadence
        let result = timer.poll(at(2_500));
        assert!(result.fired);
        assert_eq!(result.sleep_duration, Duration::from_micros(500));
    }

    #[test]
    fn test_drops_backlog_after_long_stall() {
        let mut timer = SoftTimer::new();
        timer.schedule_periodic(MS);
        timer.poll(at(0));
        assert!(timer.poll(at(1_000)).fired);

        let result = timer.poll(at(10_000));
        assert!(result.fired);
        assert_eq!(result.sleep_duration, MS);

        // Within the drift window the timer catches up without waiting
        let result = timer.poll(at(12_500));
        assert!(result.fired);
        assert_eq!(result.sleep_duration, Duration::from_micros(0));
        assert!(timer.poll(at(12_500)).fired);
        assert!(!timer.poll(at(12_500)).fired);
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timer = SoftTimer::new();
        timer.schedule_periodic(MS);
        timer.poll(at(0));
        timer.cancel_periodic();
        timer.cancel_periodic();
        assert!(!timer.is_armed());
        assert!(!timer.poll(at(5_000)).fired);
    }

    #[test]
    fn test_engine_poll_drives_ticks() {
        let mut engine: BreathingEngine<RecordingPwm, SoftTimer, 2> = BreathingEngine::new(
            RecordingPwm::new(u16::MAX),
            SoftTimer::new(),
            BreathingConfig::default(),
        );
        engine.init();
        engine.pwm_mut().take();

        // Nothing breathing, the timer stays idle
        assert!(!engine.poll(at(0)).fired);

        engine.start(0, 1).unwrap();
        assert!(engine.timer().is_armed());
        assert!(!engine.poll(at(0)).fired);
        assert!(engine.pwm().writes.is_empty());

        assert!(engine.poll(at(3_906)).fired);
        assert_eq!(engine.pwm_mut().take(), [(0, 1)]);
        assert_eq!(engine.channel(0).unwrap().phase(), 1);

        engine.stop(0).unwrap();
        assert!(!engine.timer().is_armed());
        assert!(!engine.poll(at(7_812)).fired);
    }

    #[test]
    fn test_shared_poll() {
        let shared: SharedBreathing<RecordingPwm, SoftTimer, 2> = SharedBreathing::new();
        assert_eq!(shared.poll(at(0)), None);

        shared.init(
            RecordingPwm::new(u16::MAX),
            SoftTimer::new(),
            BreathingConfig {
                tick_interval: MS,
                ..BreathingConfig::default()
            },
        )
        .unwrap();
        shared.start(1, 1).unwrap();
        shared.poll(at(0));
        let result = shared.poll(at(1_000)).unwrap();
        assert!(result.fired);
        let last = shared.with(|engine| engine.pwm().last(1)).unwrap();
        assert_eq!(last, Some(1));
    }
}
