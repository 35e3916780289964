use std::time::Duration;

use swarm_tracker_clock::clock::stopped::Stopped as _;
use swarm_tracker_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(time, CurrentClock::now());
}

#[test]
fn it_should_let_tests_travel_past_the_inactivity_window() {
    CurrentClock::local_set(&Duration::from_secs(1_700_000_000));

    CurrentClock::local_add(&Duration::from_secs(1801)).unwrap();

    assert_eq!(CurrentClock::now(), Duration::from_secs(1_700_001_801));
}
