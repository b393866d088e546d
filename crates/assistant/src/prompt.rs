//! Prompt assembly for the scripted assistant.
//!
//! The behavioural contract (short plain-text replies, no pricing, no
//! availability promises, polite redirects) lives in the system prompt;
//! it is not programmatically enforced. End-user text is hardened before
//! interpolation because it feeds a structured prompt.

use cadenza_core::assistant::{
    harden_user_text, AssistantRequest, USER_ANSWER_MAX_CHARS, USER_NAME_MAX_CHARS,
};
use cadenza_core::sanitize::truncate_chars;

/// Character cap on the serialized booking context.
const BOOKING_DATA_MAX_CHARS: usize = 2000;

/// The scripted persona. Every generation call uses this verbatim.
pub const SYSTEM_PROMPT: &str = "\
You are the friendly booking assistant on the website of Cadenza Strings, \
an independent professional musician. You help visitors through a guided \
booking questionnaire. Rules you must always follow: respond in one or two \
sentences of plain text with no markup or lists; never state or estimate \
prices, fees, or rates; never promise or imply that a date is available, \
confirmation always comes later by email; if the visitor asks something \
unrelated to booking a performance, politely steer them back to the \
questionnaire. Be warm and specific to the details you are given.";

/// Build the user-turn prompt for one assistant invocation.
pub fn build_user_prompt(request: &AssistantRequest) -> String {
    let mut lines = vec![
        format!("Touchpoint: {}", request.touchpoint.as_tag()),
        format!("Questionnaire phase: {}", request.phase),
    ];

    if let Some(question) = request.question {
        lines.push(format!("Question index: {question}"));
    }
    if let Some(name) = &request.user_name {
        let name = harden_user_text(name, USER_NAME_MAX_CHARS);
        if !name.is_empty() {
            lines.push(format!("Visitor name: {name}"));
        }
    }
    if let Some(answer) = &request.user_answer {
        let answer = harden_user_text(answer, USER_ANSWER_MAX_CHARS);
        if !answer.is_empty() {
            lines.push(format!("Visitor's latest answer: {answer}"));
        }
    }
    if let Some(data) = &request.booking_data {
        lines.push(format!(
            "Booking details so far: {}",
            truncate_chars(&data.to_string(), BOOKING_DATA_MAX_CHARS)
        ));
    }

    lines.push("Write the assistant's reply.".to_string());
    lines.join("\n")
}
