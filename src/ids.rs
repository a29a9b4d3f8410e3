//! Locally generated identifiers
//!
//! `{TAG}-{unix millis}-{9 base36 chars}`. Unique enough for one browser
//! session; nothing coordinates ids across clients.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

pub fn base36_suffix(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

pub fn tagged_id(tag: &str) -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}-{}-{}",
        tag,
        Utc::now().timestamp_millis(),
        base36_suffix(&mut rng, SUFFIX_LEN)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_suffix_alphabet() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let suffix = base36_suffix(&mut rng, 64);
        assert_eq!(suffix.len(), 64);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_tagged_id_shape() {
        let id = tagged_id("LEAD");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "LEAD");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(tagged_id("LEAD"), tagged_id("LEAD"));
    }
}
