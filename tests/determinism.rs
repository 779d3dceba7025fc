use std::collections::HashSet;

use blake3::Hasher;
use rangesplit::{Executor, ParRange, SchedulerConfig};

#[test]
fn parallel_map_is_deterministic() {
    let range = ParRange::new(-10_000i64, 10_000, 3, true).expect("valid range");
    let config = SchedulerConfig::for_len(range.len(), 8).expect("valid config");
    let executor = Executor::parallel(8, config).expect("pool builds");

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let mapped = range
            .map(&executor, |x| x.wrapping_mul(2_654_435_761) ^ (x >> 3))
            .expect("map succeeds");

        let mut hasher = Hasher::new();
        for value in &mapped {
            hasher.update(&value.to_le_bytes());
        }
        fingerprints.insert(hasher.finalize());
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}
