//! Length-based splitting of long messages into numbered SMS parts.
//!
//! Parts are split at word boundaries only and carry an `"i/N: "` prefix so
//! the recipient can reorder them. The prefix width depends on the final part
//! count, which is only known after splitting, so packing runs again with the
//! reduced budget until the count stabilizes.

/// One SMS-sized chunk of a longer message.
///
/// `text` is the final rendered part: for multi-part messages it includes the
/// `"i/N: "` prefix, for a single-part message it is the input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    /// 1-based position within the message.
    pub index: usize,
    /// Total number of parts.
    pub total: usize,
    /// Rendered part text as sent to the router.
    pub text: String,
}

/// Split `text` into SMS parts of at most `limit` characters.
///
/// A text that fits within `limit` comes back as a single unprefixed part,
/// unchanged. Longer texts are packed greedily word by word; a single word
/// longer than the limit is never broken and overflows alone in its own part.
/// Always returns at least one part.
pub fn split_message(text: &str, limit: usize) -> Vec<MessagePart> {
    if text.chars().count() <= limit {
        return vec![MessagePart {
            index: 1,
            total: 1,
            text: text.to_owned(),
        }];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        // Over the limit yet nothing but whitespace; send it as-is.
        return vec![MessagePart {
            index: 1,
            total: 1,
            text: text.to_owned(),
        }];
    }

    // First pass with the raw limit only estimates the part count; each
    // repack reserves room for the numbering prefix, whose width depends on
    // the digit count of the total. The count never shrinks as the budget
    // tightens, so this terminates.
    let mut bodies = pack_words(&words, limit);
    loop {
        let total = bodies.len();
        let budget = limit.saturating_sub(prefix_len(total)).max(1);
        let repacked = pack_words(&words, budget);
        if repacked.len() == total {
            bodies = repacked;
            break;
        }
        bodies = repacked;
    }

    let total = bodies.len();
    bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| MessagePart {
            index: i + 1,
            total,
            text: format!("{}/{}: {}", i + 1, total, body),
        })
        .collect()
}

/// Width of the `"i/N: "` prefix for a message of `total` parts, assuming the
/// widest index (`total` itself).
fn prefix_len(total: usize) -> usize {
    format!("{total}/{total}: ").chars().count()
}

/// Greedily pack whole words into chunks of at most `budget` characters.
///
/// A word wider than `budget` still gets its own chunk, unbroken.
fn pack_words(words: &[&str], budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in words {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 160;

    fn strip_prefix(part: &MessagePart) -> &str {
        let expected = format!("{}/{}: ", part.index, part.total);
        part.text
            .strip_prefix(&expected)
            .unwrap_or_else(|| panic!("part {} missing prefix {expected:?}", part.index))
    }

    #[test]
    fn short_text_is_a_single_unprefixed_part() {
        let text = "Server db-01 back online";
        let parts = split_message(text, LIMIT);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].index, 1);
        assert_eq!(parts[0].total, 1);
        assert_eq!(parts[0].text, text);
    }

    #[test]
    fn text_at_exactly_the_limit_is_not_split() {
        let text = "a".repeat(LIMIT);
        let parts = split_message(&text, LIMIT);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text, text);
    }

    #[test]
    fn two_hundred_chars_of_short_words_make_two_parts() {
        // 40 five-char words incl. separator = 200 chars.
        let text = vec!["word"; 40].join(" ");
        assert_eq!(text.chars().count(), 199);
        let text = format!("{text}x");

        let parts = split_message(&text, LIMIT);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].text.starts_with("1/2: "));
        assert!(parts[1].text.starts_with("2/2: "));
        for part in &parts {
            assert!(
                part.text.chars().count() <= LIMIT,
                "part {} is {} chars",
                part.index,
                part.text.chars().count()
            );
        }

        let rejoined = parts
            .iter()
            .map(strip_prefix)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn whitespace_only_text_is_a_single_part() {
        let text = " ".repeat(LIMIT + 40);
        let parts = split_message(&text, LIMIT);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text, text);
    }

    #[test]
    fn words_are_never_broken() {
        let text = vec!["monitoring", "alert", "disk", "usage", "critical"]
            .repeat(10)
            .join(" ");
        let parts = split_message(&text, 40);
        for part in &parts {
            for word in strip_prefix(part).split_whitespace() {
                assert!(
                    text.split_whitespace().any(|w| w == word),
                    "word {word:?} not in original"
                );
            }
        }
    }

    #[test]
    fn oversized_word_overflows_alone() {
        let long = "x".repeat(50);
        let text = format!("alpha {long} omega {}", "pad ".repeat(10));
        let parts = split_message(&text, 30);

        let holding = parts
            .iter()
            .find(|p| strip_prefix(p).contains(&long))
            .expect("long word lost");
        assert_eq!(strip_prefix(holding), long);
    }

    #[test]
    fn prefix_budget_accounts_for_part_count_growth() {
        // Enough text that reserving prefix room pushes the count up from the
        // raw-limit estimate.
        let text = vec!["abcdefgh"; 60].join(" ");
        let parts = split_message(&text, 40);
        let total = parts.len();
        assert!(total > 1);
        for part in &parts {
            assert_eq!(part.total, total);
            assert!(part.text.chars().count() <= 40);
        }
        assert_eq!(parts.last().unwrap().index, total);
    }

    #[test]
    fn round_trip_preserves_all_words_in_order() {
        let text = (0..80).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let parts = split_message(&text, 50);
        let rejoined = parts
            .iter()
            .map(strip_prefix)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }
}
