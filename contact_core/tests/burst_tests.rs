//! Integration tests for burst generation and timer-based clearing

use contact_core::effects::burst::{CLEAR_DELAY_MS, PALETTE, PARTICLE_COUNT};
use contact_core::effects::random::SequenceSource;
use contact_core::{ContactWidget, FastRandSource, WidgetConfig, WidgetEvent};
use std::time::Duration;

fn widget() -> ContactWidget {
    ContactWidget::new(WidgetConfig::default()).with_random_source(FastRandSource::with_seed(2024))
}

#[tokio::test(start_paused = true)]
async fn test_burst_geometry() {
    let mut widget = widget();
    widget.trigger_burst();

    let particles = widget.particles();
    assert_eq!(particles.len(), PARTICLE_COUNT);
    for p in particles {
        let squared = p.dx * p.dx + p.dy * p.dy;
        assert!(squared >= 40.0 * 40.0 - 1e-6, "too close: {squared}");
        assert!(squared < 120.0 * 120.0, "too far: {squared}");
        assert!(PALETTE.contains(&p.color));
    }
}

#[tokio::test(start_paused = true)]
async fn test_burst_keys_strictly_increase() {
    let mut widget = widget();
    let mut last = widget.burst_key();
    for _ in 0..5 {
        let key = widget.trigger_burst();
        assert_eq!(key, last + 1);
        assert_eq!(widget.burst_key(), key);
        last = key;
    }
}

#[tokio::test(start_paused = true)]
async fn test_particles_cleared_regardless_of_durations() {
    // Every draw at the top of its range: longest flights, latest starts
    let mut widget = ContactWidget::new(WidgetConfig::default())
        .with_random_source(SequenceSource::constant(0.999));
    widget.trigger_burst();
    assert!(widget.particles().iter().all(|p| p.lifetime_ms() > 935.0));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    widget.poll_events();
    assert_eq!(widget.particles().len(), PARTICLE_COUNT);

    tokio::time::sleep(Duration::from_millis(CLEAR_DELAY_MS - 1000)).await;
    // Let the timer task deliver its event
    let event = widget.next_event().await;
    assert_eq!(event, Some(WidgetEvent::BurstExpired { key: 1 }));
    assert!(widget.particles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_old_timer_does_not_clear_new_burst() {
    let mut widget = widget();
    widget.trigger_burst();
    tokio::time::sleep(Duration::from_millis(600)).await;
    widget.trigger_burst();

    // First timer fires at 1100ms, second at 1700ms
    tokio::time::sleep(Duration::from_millis(600)).await;
    widget.poll_events();
    assert_eq!(widget.burst_key(), 2);
    assert_eq!(widget.particles().len(), PARTICLE_COUNT);

    let event = widget.next_event().await;
    assert_eq!(event, Some(WidgetEvent::BurstExpired { key: 2 }));
    assert!(widget.particles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_configured_clear_delay() {
    let config = WidgetConfig {
        clear_delay_ms: 2000,
        ..WidgetConfig::default()
    };
    let mut widget = ContactWidget::new(config);
    widget.trigger_burst();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    widget.poll_events();
    assert!(!widget.particles().is_empty());

    widget.next_event().await;
    assert!(widget.particles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_frames_follow_the_clock() {
    let mut widget = widget();
    widget.trigger_burst();
    assert!(widget.burst().frames_at(Duration::ZERO).len() <= PARTICLE_COUNT);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let elapsed = widget.burst().elapsed().unwrap();
    assert!(elapsed >= Duration::from_millis(300) && elapsed < Duration::from_millis(310));
    assert_eq!(widget.burst().frames_at(elapsed).len(), PARTICLE_COUNT);
    assert!(widget.burst().ripple_opacity() > 0.0);

    // Past every flight, nothing is visible even before the clear timer
    assert!(widget.burst().frames_at(Duration::from_millis(1000)).is_empty());
}
