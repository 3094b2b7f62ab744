//! Best-effort location of a question reference ("5", "3b") inside student
//! questions and extracted paper text. False positives and negatives are
//! tolerated; callers always fall back to the full text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Narrowing is only attempted on context longer than this many characters.
pub const NARROWING_THRESHOLD_CHARS: usize = 100;

#[derive(Clone, Copy, Debug)]
pub struct NarrowingProfile {
    pub label_prefix: &'static str,
    pub min_block_chars: usize,
    pub max_scan_lines: usize,
}

pub const PAPER_NARROWING: NarrowingProfile = NarrowingProfile {
    label_prefix: "Question",
    min_block_chars: 20,
    max_scan_lines: 50,
};

pub const MARKING_SCHEME_NARROWING: NarrowingProfile = NarrowingProfile {
    label_prefix: "Marking scheme for Question",
    min_block_chars: 10,
    max_scan_lines: 100,
};

/// Matchers for a question reference in a free-text student question,
/// tried in order; the first capture wins. A reference is one or more
/// digits with an optional trailing letter.
static REFERENCE_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "question 5", "Question 3b"
        r"(?i)question\s*(\d+[a-z]?)\b",
        // "q.5", "Q3b", "q 7"
        r"(?i)\bq\.?\s*(\d+[a-z]?)\b",
        // "5)" standing alone
        r"(?i)(?:^|\s)(\d+[a-z]?)\)",
        // "5." / "5:" at the very start of the question
        r"(?i)^\s*(\d+[a-z]?)\s*[.:,)!?]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("reference pattern compiles"))
    .collect()
});

/// A line that opens with a bare number reference, used as the boundary
/// between one question's block and the next.
static BARE_REFERENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*\d+[a-z]?(?:[.):\s]|$)").expect("boundary pattern compiles"));

pub fn detect_question_reference(question: &str) -> Option<String> {
    REFERENCE_MATCHERS.iter().find_map(|matcher| {
        matcher
            .captures(question)
            .and_then(|captures| captures.get(1))
            .map(|reference| reference.as_str().to_lowercase())
    })
}

/// Byte span of the block belonging to `reference`: from the line that
/// opens with the reference (optionally prefixed by "question" or "q") up
/// to the next bare-number line, or end of text.
pub fn locate_question_span(text: &str, reference: &str) -> Option<(usize, usize)> {
    let escaped = regex::escape(reference);
    let pattern = format!(r"(?im)^[ \t]*(?:question\s+|q\.?\s*)?{escaped}[.):\s]");
    let start_matcher = Regex::new(&pattern).ok()?;
    let start = start_matcher.find(text)?.start();

    // The boundary search begins after the opening line so that line
    // cannot terminate its own block.
    let opening_line_end = text[start..]
        .find('\n')
        .map(|offset| start + offset + 1)
        .unwrap_or(text.len());

    let end = BARE_REFERENCE_LINE
        .find(&text[opening_line_end..])
        .map(|boundary| opening_line_end + boundary.start())
        .unwrap_or(text.len());

    Some((start, end))
}

/// Line-by-line fallback for layouts the single-pass scan misses (odd
/// spacing such as "Question5:"). Collects at most `max_lines` lines from
/// the matching line, stopping early at the next bare-number line.
pub fn scan_question_lines(text: &str, reference: &str, max_lines: usize) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    let mut started = false;

    for line in text.lines() {
        if !started {
            if line_opens_reference(line, reference) {
                started = true;
                collected.push(line);
            }
            continue;
        }
        if collected.len() >= max_lines || BARE_REFERENCE_LINE.is_match(line) {
            break;
        }
        collected.push(line);
    }

    started.then(|| collected.join("\n"))
}

fn line_opens_reference(line: &str, reference: &str) -> bool {
    let lowered = line.trim_start().to_lowercase();
    let candidate = lowered
        .strip_prefix("question")
        .or_else(|| lowered.strip_prefix('q'))
        .map(|rest| rest.trim_start_matches(['.', ' ', '\t']))
        .unwrap_or(&lowered);

    match candidate.strip_prefix(reference) {
        Some(rest) => rest
            .chars()
            .next()
            .map_or(true, |next| matches!(next, '.' | ')' | ':') || next.is_whitespace()),
        None => false,
    }
}

/// Narrows `text` to the labelled block for `reference`, or None when no
/// block longer than the profile minimum was found.
pub fn narrow_to_question(
    text: &str,
    reference: &str,
    profile: NarrowingProfile,
) -> Option<String> {
    let block = locate_question_span(text, reference)
        .map(|(start, end)| text[start..end].trim_end().to_string())
        .filter(|block| block.chars().count() > profile.min_block_chars)
        .or_else(|| {
            scan_question_lines(text, reference, profile.max_scan_lines)
                .map(|block| block.trim_end().to_string())
                .filter(|block| block.chars().count() > profile.min_block_chars)
        })?;

    Some(format!("{} {}:\n{}", profile.label_prefix, reference, block))
}

/// Applies the narrowing rules to one side of the context: short texts and
/// unlocatable references pass through unchanged.
pub fn narrow_context(text: &str, reference: &str, profile: NarrowingProfile) -> String {
    if text.chars().count() <= NARROWING_THRESHOLD_CHARS {
        return text.to_string();
    }
    narrow_to_question(text, reference, profile).unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_question_word_reference() {
        assert_eq!(
            detect_question_reference("Explain question 5"),
            Some("5".to_string())
        );
        assert_eq!(
            detect_question_reference("Can you walk me through Question 12?"),
            Some("12".to_string())
        );
    }

    #[test]
    fn detects_q_abbreviations() {
        assert_eq!(
            detect_question_reference("How do I solve Q3b?"),
            Some("3b".to_string())
        );
        assert_eq!(
            detect_question_reference("what does q.7 want"),
            Some("7".to_string())
        );
    }

    #[test]
    fn detects_lone_number_with_bracket() {
        assert_eq!(
            detect_question_reference("I'm stuck on 4a) here"),
            Some("4a".to_string())
        );
    }

    #[test]
    fn detects_leading_number_with_punctuation() {
        assert_eq!(
            detect_question_reference("5. how do I factorise this"),
            Some("5".to_string())
        );
    }

    #[test]
    fn capture_is_lowercased() {
        assert_eq!(
            detect_question_reference("help with Question 5B"),
            Some("5b".to_string())
        );
    }

    #[test]
    fn no_reference_yields_none() {
        assert_eq!(detect_question_reference("tell me about this paper"), None);
        assert_eq!(detect_question_reference("the equation confuses me"), None);
        assert_eq!(detect_question_reference(""), None);
    }

    #[test]
    fn first_matching_pattern_wins() {
        // "question 2" outranks the later "5)" token
        assert_eq!(
            detect_question_reference("for question 2, is part 5) relevant?"),
            Some("2".to_string())
        );
    }

    const PAPER_TEXT: &str = "\
Section A. Answer all questions.

5) Find the derivative of f(x) = 3x^2 + 2x - 1.
Show each step of your working and state the rule used.

6) Integrate g(x) = cos(x) over the interval [0, pi].
";

    #[test]
    fn span_covers_target_question_and_excludes_the_next() {
        let (start, end) = locate_question_span(PAPER_TEXT, "5").unwrap();
        let block = &PAPER_TEXT[start..end];

        assert!(block.contains("Find the derivative"));
        assert!(block.contains("rule used"));
        assert!(!block.contains("Integrate"));
    }

    #[test]
    fn span_accepts_question_word_prefix() {
        let text = "Question 3. State Newton's second law.\nGive the units of force.\n4. Define momentum.\n";
        let (start, end) = locate_question_span(text, "3").unwrap();
        let block = &text[start..end];

        assert!(block.starts_with("Question 3."));
        assert!(block.contains("units of force"));
        assert!(!block.contains("momentum"));
    }

    #[test]
    fn span_does_not_match_reference_inside_a_larger_number() {
        let text = "15) Not this one.\nSome working.\n";
        assert_eq!(locate_question_span(text, "5"), None);
    }

    #[test]
    fn span_runs_to_end_of_text_without_a_boundary() {
        let text = "2) Last question on the paper.\nExplain your reasoning fully.";
        let (start, end) = locate_question_span(text, "2").unwrap();
        assert_eq!(&text[start..end], text);
    }

    #[test]
    fn scanner_handles_missing_separator_spacing() {
        let text = "intro line\nQuestion5: sketch the curve y = x^3\nlabel the turning points\n6. next one\n";
        let block = scan_question_lines(text, "5", 50).unwrap();

        assert!(block.contains("sketch the curve"));
        assert!(block.contains("turning points"));
        assert!(!block.contains("next one"));
    }

    #[test]
    fn scanner_respects_the_line_cap() {
        let mut text = String::from("3) long question\n");
        for i in 0..80 {
            text.push_str(&format!("continuation line {i}\n"));
        }
        let block = scan_question_lines(&text, "3", 50).unwrap();
        assert_eq!(block.lines().count(), 50);
    }

    #[test]
    fn narrow_labels_paper_blocks() {
        let padded = format!("{PAPER_TEXT}\n{}", "x".repeat(120));
        let narrowed = narrow_context(&padded, "5", PAPER_NARROWING);

        assert!(narrowed.starts_with("Question 5:\n"));
        assert!(narrowed.contains("Find the derivative"));
        assert!(!narrowed.contains("Integrate"));
    }

    #[test]
    fn narrow_labels_marking_scheme_blocks() {
        let scheme = "\
General guidance line for markers that is long enough to pass the threshold.

5. One mark for the power rule, one for simplification.
6. Two marks for correct substitution.
";
        let narrowed = narrow_context(scheme, "5", MARKING_SCHEME_NARROWING);

        assert!(narrowed.starts_with("Marking scheme for Question 5:\n"));
        assert!(narrowed.contains("power rule"));
        assert!(!narrowed.contains("substitution"));
    }

    #[test]
    fn short_context_passes_through_unchanged() {
        let text = "5) tiny paper";
        assert_eq!(narrow_context(text, "5", PAPER_NARROWING), text);
    }

    #[test]
    fn unlocatable_reference_keeps_full_context() {
        let text = format!("no numbered questions here at all\n{}", "y".repeat(150));
        assert_eq!(narrow_context(&text, "9", PAPER_NARROWING), text);
    }

    #[test]
    fn blocks_below_the_minimum_length_are_rejected() {
        // Block for "7" is under the 20-char paper minimum, so the full
        // context is kept.
        let text = format!("7) hi\n8) also short\n{}", "z".repeat(120));
        let narrowed = narrow_context(&text, "7", PAPER_NARROWING);
        assert_eq!(narrowed, text);
    }
}
