//! Cover image selection. The reference is opaque to the rest of the service.

use rand::seq::SliceRandom;

pub const INTERVIEW_COVERS: &[&str] = &[
    "/adobe.png",
    "/amazon.png",
    "/facebook.png",
    "/hostinger.png",
    "/pinterest.png",
    "/quora.png",
    "/reddit.png",
    "/skype.png",
    "/spotify.png",
    "/telegram.png",
    "/tiktok.png",
    "/yahoo.png",
];

/// Picks a cover uniformly at random.
pub fn random_interview_cover() -> String {
    INTERVIEW_COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERVIEW_COVERS[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_is_from_known_set() {
        for _ in 0..50 {
            let cover = random_interview_cover();
            assert!(INTERVIEW_COVERS.contains(&cover.as_str()));
        }
    }
}
