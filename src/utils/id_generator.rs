//! Run id generation (spec §4.7: a human-sortable artifact directory name
//! without reading file contents).
//!
//! Format: `<UTC timestamp, second precision>-<4 lowercase hex chars>`,
//! e.g. `20260727T211530Z-a1b2`. Lexicographic sort order matches
//! chronological order.

use chrono::Utc;
use rand::Rng;

pub fn generate() -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let suffix: String = {
        let mut rng = rand::rng();
        (0..4).map(|_| char::from_digit(rng.random_range(0..16), 16).unwrap()).collect()
    };
    format!("{timestamp}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_id_has_expected_shape() {
        let id = generate();
        let (timestamp, suffix) = id.rsplit_once('-').expect("id must contain a separator");
        assert!(timestamp.starts_with("20") && timestamp.ends_with('Z'));
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
