//! Thread decomposition.
//!
//! A thread is written as a single string with segments separated by a
//! literal `\n\n---\n\n` (blank line, three hyphens, blank line). Splitting
//! is deterministic and happens entirely before any network call.

use crate::error::Error;

/// Literal separator between thread segments.
pub const THREAD_SEPARATOR: &str = "\n\n---\n\n";

/// Platform tweet length limit, counted in Unicode scalar values.
///
/// X applies its own weighted counting server-side; this client-side check
/// mirrors the plain code-point count and defers the weighted rule to the
/// platform's own rejection.
pub const MAX_TWEET_CHARS: usize = 280;

/// Split raw thread text into trimmed, non-empty segments.
///
/// Empty parts (after trimming) are dropped; a single-segment result is
/// valid and posts as one tweet with no reply parent.
pub fn decompose(text: &str) -> Vec<String> {
    text.split(THREAD_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decompose thread text and validate every segment before posting starts.
///
/// Fails with a validation error if no non-empty segment remains, or if any
/// segment is over the length limit (identified by 1-based position). No
/// partial thread may be started when a later segment is already known to
/// be invalid.
pub fn split_thread(text: &str) -> Result<Vec<String>, Error> {
    let segments = decompose(text);

    if segments.is_empty() {
        return Err(Error::InvalidInput("empty thread".to_string()));
    }

    for (index, segment) in segments.iter().enumerate() {
        let length = segment.chars().count();
        if length > MAX_TWEET_CHARS {
            return Err(Error::InvalidInput(format!(
                "tweet {} too long ({} chars, max {})",
                index + 1,
                length,
                MAX_TWEET_CHARS
            )));
        }
    }

    Ok(segments)
}

/// Validate a single tweet's text before posting.
pub fn validate_tweet_text(text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("tweet text is empty".to_string()));
    }

    let length = text.chars().count();
    if length > MAX_TWEET_CHARS {
        return Err(Error::InvalidInput(format!(
            "tweet too long ({length} chars, max {MAX_TWEET_CHARS})"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_exact_separator() {
        let segments = decompose("first tweet\n\n---\n\nsecond tweet");
        assert_eq!(segments, vec!["first tweet", "second tweet"]);
    }

    #[test]
    fn trims_segments() {
        let segments = decompose("  first  \n\n---\n\n\tsecond\n");
        assert_eq!(segments, vec!["first", "second"]);
    }

    #[test]
    fn drops_empty_segments() {
        let segments = decompose("first\n\n---\n\n   \n\n---\n\nsecond");
        assert_eq!(segments, vec!["first", "second"]);
    }

    #[test]
    fn no_separator_yields_single_segment() {
        let segments = decompose("just one tweet");
        assert_eq!(segments, vec!["just one tweet"]);
    }

    #[test]
    fn partial_separator_does_not_split() {
        // A bare "---" line without surrounding blank lines is content
        let segments = decompose("first\n---\nsecond");
        assert_eq!(segments, vec!["first\n---\nsecond"]);
    }

    #[test]
    fn split_thread_rejects_empty_input() {
        let result = split_thread("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty thread"));
    }

    #[test]
    fn split_thread_rejects_whitespace_and_separators_only() {
        let result = split_thread("  \n\n---\n\n  ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty thread"));
    }

    #[test]
    fn split_thread_accepts_single_segment() {
        let segments = split_thread("solo").unwrap();
        assert_eq!(segments, vec!["solo"]);
    }

    #[test]
    fn split_thread_rejects_over_length_segment_by_position() {
        let long = "x".repeat(281);
        let input = format!("ok\n\n---\n\n{long}\n\n---\n\nalso ok");

        let result = split_thread(&input);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("tweet 2 too long"), "got: {message}");
        assert!(message.contains("281 chars"));
    }

    #[test]
    fn split_thread_accepts_exactly_280_chars() {
        let exact = "y".repeat(280);
        let segments = split_thread(&exact).unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn length_counts_code_points_not_bytes() {
        // 280 multibyte chars is within the limit even at 840 bytes
        let emoji_free = "é".repeat(280);
        assert!(split_thread(&emoji_free).is_ok());
        assert!(validate_tweet_text(&emoji_free).is_ok());
    }

    #[test]
    fn validate_tweet_text_rejects_empty() {
        assert!(validate_tweet_text("").is_err());
        assert!(validate_tweet_text("   ").is_err());
    }

    #[test]
    fn validate_tweet_text_rejects_281_chars() {
        let over = "z".repeat(281);
        let result = validate_tweet_text(&over);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("281 chars"));
    }

    proptest! {
        /// Every segment produced is non-empty after trimming.
        #[test]
        fn decompose_never_yields_empty_segments(text in ".{0,400}") {
            for segment in decompose(&text) {
                prop_assert!(!segment.trim().is_empty());
                prop_assert_eq!(segment.trim(), segment.as_str());
            }
        }

        /// Segment count equals the number of non-empty trimmed parts of
        /// the raw split.
        #[test]
        fn decompose_count_matches_non_empty_parts(
            parts in proptest::collection::vec("[a-z0-9 ]{0,40}", 0..6)
        ) {
            let joined = parts.join(THREAD_SEPARATOR);
            let expected: Vec<&str> = parts
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect();

            prop_assert_eq!(decompose(&joined), expected);
        }

        /// Segment order is preserved.
        #[test]
        fn decompose_preserves_order(
            parts in proptest::collection::vec("[a-z]{1,20}", 1..5)
        ) {
            let joined = parts.join(THREAD_SEPARATOR);
            prop_assert_eq!(decompose(&joined), parts);
        }
    }
}
