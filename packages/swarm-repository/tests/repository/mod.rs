use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use swarm_tracker_clock::clock::stopped::Stopped as _;
use swarm_tracker_clock::clock::Time as _;
use swarm_tracker_configuration::{TrackerPolicy, SWARM_PEERS_LIMIT};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_swarm_repository::repository::RepositoryAsync;
use swarm_tracker_swarm_repository::Swarms;

use crate::common::a_peer;
use crate::CurrentClock;

#[fixture]
fn swarms() -> Arc<Swarms> {
    Arc::new(Swarms::default())
}

fn info_hash(byte: u8) -> InfoHash {
    InfoHash([byte; 20])
}

#[rstest]
#[tokio::test]
async fn swarms_of_different_torrents_should_be_independent(swarms: Arc<Swarms>) {
    let policy = TrackerPolicy::default();

    swarms
        .announce(&info_hash(1), &a_peer(1), &AnnounceEvent::Started, CurrentClock::now(), &policy)
        .await;

    let peers = swarms
        .announce(&info_hash(2), &a_peer(2), &AnnounceEvent::Started, CurrentClock::now(), &policy)
        .await;

    assert!(peers.is_empty());
    assert_eq!(swarms.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_announces_to_one_swarm_should_all_be_recorded(swarms: Arc<Swarms>) {
    let now = CurrentClock::now();

    let handles: Vec<_> = (1..=40)
        .map(|id| {
            let swarms = swarms.clone();
            tokio::spawn(async move {
                swarms
                    .announce(
                        &info_hash(1),
                        &a_peer(id),
                        &AnnounceEvent::Started,
                        now,
                        &TrackerPolicy::default(),
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        let peers = handle.await.unwrap();
        assert!(peers.len() < 40);
    }

    assert_eq!(swarms.get_peers(&info_hash(1), SWARM_PEERS_LIMIT).await.len(), 40);
}

#[rstest]
#[tokio::test]
async fn the_listing_of_a_swarm_should_not_sweep_it(swarms: Arc<Swarms>) {
    let policy = TrackerPolicy::default();
    CurrentClock::local_set(&Duration::from_secs(1_700_000_000));

    swarms
        .announce(&info_hash(1), &a_peer(1), &AnnounceEvent::Started, CurrentClock::now(), &policy)
        .await;

    CurrentClock::local_add(&Duration::from_secs(3600)).unwrap();

    assert_eq!(swarms.get_peers(&info_hash(1), SWARM_PEERS_LIMIT).await.len(), 1);
}

#[rstest]
#[tokio::test]
async fn it_should_sweep_every_swarm(swarms: Arc<Swarms>) {
    let policy = TrackerPolicy::default();
    CurrentClock::local_set(&Duration::from_secs(1_700_000_000));

    for byte in 1..=3 {
        swarms
            .announce(&info_hash(byte), &a_peer(byte), &AnnounceEvent::Started, CurrentClock::now(), &policy)
            .await;
    }

    CurrentClock::local_add(&Duration::from_secs(1801)).unwrap();

    assert_eq!(swarms.remove_inactive_peers(CurrentClock::now(), &policy).await, 3);
    assert_eq!(swarms.remove_peerless_swarms().await, 3);
    assert!(swarms.is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_keep_the_swarms_that_still_have_peers(swarms: Arc<Swarms>) {
    let policy = TrackerPolicy::default();

    swarms
        .announce(&info_hash(1), &a_peer(1), &AnnounceEvent::Started, CurrentClock::now(), &policy)
        .await;
    swarms
        .announce(&info_hash(2), &a_peer(2), &AnnounceEvent::Stopped, CurrentClock::now(), &policy)
        .await;

    assert_eq!(swarms.remove_peerless_swarms().await, 1);
    assert!(swarms.get(&info_hash(1)).is_some());
    assert!(swarms.get(&info_hash(2)).is_none());
}
