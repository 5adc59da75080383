// Status text composition
//
// Builds the text of one status from the item metadata and the configured
// phrase pools. Greeting and announcement are picked uniformly at random per
// run; attribution, salutation and hashtags are deterministic.

use crate::config::TextConfig;
use crate::content::ContentMetadata;
use rand::seq::SliceRandom;

/// Interchangeable text fragments used to vary the generated status text.
///
/// The pools are immutable for the process lifetime. Non-emptiness is
/// enforced by `Settings::validate()` before any composition happens.
#[derive(Debug, Clone)]
pub struct PhrasePools {
    pub greetings: Vec<String>,
    pub announcements: Vec<String>,
    pub salutation: String,
    pub tags: Vec<String>,
}

impl From<&TextConfig> for PhrasePools {
    fn from(text: &TextConfig) -> Self {
        Self {
            greetings: text.greetings.clone(),
            announcements: text.announcements.clone(),
            salutation: text.salutation.clone(),
            tags: text.tags.clone(),
        }
    }
}

/// Compose the status text for one publishing run.
///
/// Output layout, segments joined by blank lines:
/// greeting, announcement, attribution block, salutation, hashtag list.
pub fn compose_status(metadata: &ContentMetadata, pools: &PhrasePools) -> String {
    let mut rng = rand::thread_rng();
    let greeting = pools
        .greetings
        .choose(&mut rng)
        .map(String::as_str)
        .unwrap_or("");
    let announcement = pools
        .announcements
        .choose(&mut rng)
        .map(String::as_str)
        .unwrap_or("");

    let attribution = format!(
        "This picture is from {} and can be found here: {}\nIt is licensed under {} ({}).",
        metadata.author, metadata.url, metadata.license.name, metadata.license.url
    );

    let hashtags = pools
        .tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{greeting}\n\n{announcement}\n\n{attribution}\n\n{}\n\n{hashtags}", pools.salutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::License;

    fn metadata() -> ContentMetadata {
        ContentMetadata {
            author: "Jane".to_string(),
            url: "http://example.com/x.jpg".to_string(),
            description: "a sloth".to_string(),
            license: License {
                name: "CC-BY".to_string(),
                url: "http://license.example".to_string(),
            },
        }
    }

    fn single_entry_pools() -> PhrasePools {
        PhrasePools {
            greetings: vec!["Hi".to_string()],
            announcements: vec!["News!".to_string()],
            salutation: "Bye".to_string(),
            tags: vec!["sloth".to_string(), "cute".to_string()],
        }
    }

    #[test]
    fn test_composed_text_exact_layout() {
        // Single-entry pools make the random choices deterministic
        let text = compose_status(&metadata(), &single_entry_pools());
        assert_eq!(
            text,
            "Hi\n\nNews!\n\nThis picture is from Jane and can be found here: \
             http://example.com/x.jpg\nIt is licensed under CC-BY \
             (http://license.example).\n\nBye\n\n#sloth #cute"
        );
    }

    #[test]
    fn test_composed_text_contains_exactly_one_greeting() {
        let mut pools = single_entry_pools();
        pools.greetings = vec!["GREET_A".to_string(), "GREET_B".to_string()];
        pools.announcements = vec!["ANN_A".to_string(), "ANN_B".to_string()];

        for _ in 0..50 {
            let text = compose_status(&metadata(), &pools);
            let greetings = pools
                .greetings
                .iter()
                .filter(|g| text.contains(g.as_str()))
                .count();
            let announcements = pools
                .announcements
                .iter()
                .filter(|a| text.contains(a.as_str()))
                .count();
            assert_eq!(greetings, 1);
            assert_eq!(announcements, 1);
        }
    }

    #[test]
    fn test_fixed_segments_identical_across_runs() {
        let mut pools = single_entry_pools();
        pools.greetings = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        pools.announcements = vec!["A".to_string(), "B".to_string()];

        let first = compose_status(&metadata(), &pools);
        let second = compose_status(&metadata(), &pools);

        // Five segments: greeting, announcement, attribution, salutation, tags.
        // Only the first two may differ between runs.
        let first_segments: Vec<&str> = first.split("\n\n").collect();
        let second_segments: Vec<&str> = second.split("\n\n").collect();
        assert_eq!(first_segments.len(), 5);
        assert_eq!(second_segments.len(), 5);
        assert_eq!(first_segments[2..], second_segments[2..]);
    }

    #[test]
    fn test_every_tag_is_prefixed() {
        let text = compose_status(&metadata(), &single_entry_pools());
        assert!(text.ends_with("#sloth #cute"));
    }
}
