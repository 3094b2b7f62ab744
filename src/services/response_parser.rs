//! Turns the model's semi-structured markdown reply into the AiResponse
//! contract. Never fails: replies that ignore the heading template land
//! whole in `explanation`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::AiResponse;

static EXPLANATION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##\s*Explanation").expect("heading pattern compiles"));
static EXAMPLES_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##\s*Examples").expect("heading pattern compiles"));
static FULL_MARKS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##\s*How to Get Full Marks").expect("heading pattern compiles"));
static SOLUTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##\s*Solution").expect("heading pattern compiles"));

pub fn parse_ai_response(raw: &str) -> AiResponse {
    let explanation = section(raw, &EXPLANATION_HEADING).filter(|text| !text.is_empty());
    let solution = section(raw, &SOLUTION_HEADING).filter(|text| !text.is_empty());

    // The model ignored the heading contract; hand the caller everything.
    if explanation.is_none() && solution.is_none() {
        return AiResponse {
            explanation: raw.to_string(),
            ..AiResponse::default()
        };
    }

    AiResponse {
        explanation: explanation.unwrap_or_default().to_string(),
        examples: section(raw, &EXAMPLES_HEADING)
            .map(split_list_items)
            .unwrap_or_default(),
        how_to_get_full_marks: section(raw, &FULL_MARKS_HEADING)
            .map(split_list_items)
            .unwrap_or_default(),
        solution: solution.unwrap_or_default().to_string(),
    }
}

/// Text between a heading and the next `##` (or end of string), trimmed.
fn section<'a>(text: &'a str, heading: &Regex) -> Option<&'a str> {
    let matched = heading.find(text)?;
    let rest = &text[matched.end()..];
    let end = rest.find("##").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn split_list_items(block: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            trimmed
                .strip_prefix(['-', '*'])
                .map(str::trim_start)
                .unwrap_or(trimmed)
        })
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
