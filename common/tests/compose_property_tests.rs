// Property-based tests for status text composition

use common::compose::{compose_status, PhrasePools};
use common::content::{ContentMetadata, License};
use proptest::prelude::*;

fn pools(
    greetings: Vec<String>,
    announcements: Vec<String>,
    salutation: String,
    tags: Vec<String>,
) -> PhrasePools {
    PhrasePools {
        greetings,
        announcements,
        salutation,
        tags,
    }
}

proptest! {
    /// Every composed text carries the full attribution, the salutation and
    /// all configured tags with a `#` prefix, regardless of pool contents.
    #[test]
    fn property_composed_text_contains_all_fixed_parts(
        author in "[A-Za-z ]{1,20}",
        url in "http://[a-z]{3,10}\\.example/[a-z]{1,8}\\.jpg",
        license_name in "[A-Z][A-Z-]{1,9}",
        license_url in "http://[a-z]{3,10}\\.example",
        salutation in "[A-Za-z !]{1,20}",
        tags in prop::collection::vec("[a-zA-Z]{1,12}", 1..5),
        greetings in prop::collection::vec("[A-Za-z ]{1,15}", 1..4),
        announcements in prop::collection::vec("[A-Za-z ]{1,15}", 1..4),
    ) {
        let metadata = ContentMetadata {
            author: author.clone(),
            url: url.clone(),
            description: "alt text".to_string(),
            license: License {
                name: license_name.clone(),
                url: license_url.clone(),
            },
        };
        let pools = pools(greetings.clone(), announcements, salutation.clone(), tags.clone());

        let text = compose_status(&metadata, &pools);

        prop_assert!(!text.is_empty());
        prop_assert!(text.contains(&author));
        prop_assert!(text.contains(&url));
        prop_assert!(text.contains(&license_name));
        prop_assert!(text.contains(&license_url));
        prop_assert!(text.contains(&salutation));
        for tag in &tags {
            let hashtag = format!("#{tag}");
            prop_assert!(text.contains(&hashtag));
        }
        prop_assert!(greetings.iter().any(|g| text.starts_with(g.as_str())));
    }

    /// Exactly one greeting and one announcement appear per composition.
    /// Markers are constructed pairwise distinct so substring counting is
    /// unambiguous.
    #[test]
    fn property_exactly_one_greeting_and_announcement(
        greeting_count in 1usize..6,
        announcement_count in 1usize..6,
    ) {
        let greetings: Vec<String> = (0..greeting_count)
            .map(|i| format!("GREETING{i}MARK"))
            .collect();
        let announcements: Vec<String> = (0..announcement_count)
            .map(|i| format!("ANNOUNCE{i}MARK"))
            .collect();
        let metadata = ContentMetadata {
            author: "Jane".to_string(),
            url: "http://example.com/x.jpg".to_string(),
            description: "a sloth".to_string(),
            license: License {
                name: "CC-BY".to_string(),
                url: "http://license.example".to_string(),
            },
        };
        let pools = pools(
            greetings.clone(),
            announcements.clone(),
            "Bye".to_string(),
            vec!["sloth".to_string()],
        );

        let text = compose_status(&metadata, &pools);

        let greetings_found = greetings.iter().filter(|g| text.contains(g.as_str())).count();
        let announcements_found = announcements
            .iter()
            .filter(|a| text.contains(a.as_str()))
            .count();
        prop_assert_eq!(greetings_found, 1);
        prop_assert_eq!(announcements_found, 1);
    }
}
