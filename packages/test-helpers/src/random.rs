use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use swarm_tracker_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer;

/// Returns a random alphanumeric string of a certain size.
#[must_use]
pub fn string(size: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(size).map(char::from).collect()
}

/// Returns a random info hash, so tests running against one tracker do not
/// share swarms.
#[must_use]
pub fn info_hash() -> InfoHash {
    InfoHash(thread_rng().gen())
}

/// Returns a printable peer id in the Azureus style used by most clients.
#[must_use]
pub fn peer_id() -> peer::Id {
    let mut bytes = *b"-qB4650-000000000000";
    for (byte, random) in bytes[8..].iter_mut().zip(string(12).bytes()) {
        *byte = random;
    }
    peer::Id(bytes)
}
