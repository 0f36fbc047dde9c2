//! Clock polling tests

use std::time::Duration;

use tokio_test::{assert_pending, assert_ready, task};

use sumblocks::adapter::TickClock;

#[test]
fn cancelled_clock_stays_pending() {
    let mut clock = TickClock::new(Duration::from_secs(1));
    let mut tick = task::spawn(clock.tick());

    assert_pending!(tick.poll());
    assert_pending!(tick.poll());
    assert!(!tick.is_woken());
}

#[tokio::test(start_paused = true)]
async fn running_clock_wakes_after_one_period() {
    let mut clock = TickClock::new(Duration::from_millis(250));
    clock.start();
    let mut tick = task::spawn(clock.tick());

    assert_pending!(tick.poll());
    tokio::time::advance(Duration::from_millis(250)).await;
    assert_ready!(tick.poll());
}
