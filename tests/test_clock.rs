use getforce_shooter::clock::{Clock, FrameClock, ManualClock};

#[test]
fn frame_clock_deltas_add_up_to_session_time() {
    let mut clock = FrameClock::new(60);
    let summed: u64 = (0..60).map(|_| clock.tick()).sum();
    let now = clock.now_ms();
    // 60 frames of 16.67 ms; whole-ms truncation per tick would lose ~40 ms
    assert!(summed >= 990, "only {} ms elapsed", summed);
    assert!(now - summed <= 2, "summed dt = {} ms, clock = {} ms", summed, now);
}

#[test]
fn frame_clock_paces_to_the_frame_rate() {
    let mut clock = FrameClock::new(100);
    for _ in 0..5 {
        assert!(clock.tick() >= 9);
    }
}

#[test]
fn manual_clock_steps_exactly() {
    let mut clock = ManualClock::new(16);
    assert_eq!(clock.tick(), 16);
    assert_eq!(clock.tick(), 16);
    assert_eq!(clock.now_ms(), 32);
}
