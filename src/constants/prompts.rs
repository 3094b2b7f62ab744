pub const TUTOR_ROLE_PREAMBLE: &str = "You are an expert exam tutor helping students understand exam questions and how to answer them effectively.";

pub const NO_PAPER_CONTENT_PLACEHOLDER: &str = "No paper content provided";

pub const NO_MARKING_SCHEME_PLACEHOLDER: &str = "No marking scheme provided";

pub const PAPER_CONTEXT_EMPHASIS: &str = "Ground your answer in the exam paper content above rather than general knowledge wherever possible.";

pub const MARKING_SCHEME_EMPHASIS: &str = "Match the marking scheme wording as closely as possible when listing what earns marks.";

/// The response parser depends on these four headings, in this order.
/// Reword the surrounding copy freely; never rename or reorder the headings.
pub const RESPONSE_FORMAT_INSTRUCTIONS: &str = r#"Please provide a comprehensive response in the following structured format:

## Explanation
Explain clearly what the question is asking and the key concepts involved.

## Examples
Provide 2-3 worked examples related to this topic, as a bulleted list.

## How to Get Full Marks
List the specific points a student must include to earn full marks, as a bulleted list.

## Solution
Provide a complete model solution to the question.

Format your response clearly with these exact headings."#;
