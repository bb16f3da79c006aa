// Joke service - uniform-random picks from a static list.

use rand::seq::SliceRandom;

/// The static joke list. Data, not logic: edit freely.
pub const JOKES: &[&str] = &[
    "Why don't skeletons fight each other? Because they don't have the guts 😆💀",
    "I told my computer I needed a break… it showed me an ad for KitKat 🍫",
    "Why did the gamer bring a broom? To sweep the lobby 😂",
    "Why do programmers prefer dark mode? Because light attracts bugs 🪲🤣",
    "My WiFi dropped for 10 minutes… I met my family. They seem nice 😎",
];

/// Stateless picker over [`JOKES`]. Selection is uniform with replacement.
#[derive(Debug, Clone, Copy)]
pub struct JokeService;

impl JokeService {
    pub fn new() -> Self {
        Self
    }

    pub fn random_joke(&self) -> &'static str {
        JOKES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(JOKES[0])
    }
}

impl Default for JokeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_joke_is_from_the_list() {
        let service = JokeService::new();
        for _ in 0..50 {
            let joke = service.random_joke();
            assert!(JOKES.contains(&joke));
        }
    }
}
