//! Public share-slug generation.

use rand::Rng;

/// URL-safe alphabet, 64 symbols.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub const SLUG_LEN: usize = 10;

/// Generate a fresh random slug. 64^10 possible values, so collisions are
/// astronomically unlikely; the store's unique constraint catches the rest.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..SLUG_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_has_fixed_length() {
        assert_eq!(generate().chars().count(), SLUG_LEN);
    }

    #[test]
    fn slug_uses_url_safe_alphabet() {
        for _ in 0..100 {
            let slug = generate();
            assert!(slug.bytes().all(|b| ALPHABET.contains(&b)), "bad slug {slug}");
        }
    }

    #[test]
    fn consecutive_slugs_differ() {
        assert_ne!(generate(), generate());
    }
}
