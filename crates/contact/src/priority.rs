use crate::Priority;

const URGENT_KEYWORDS: [&str; 6] = ["urgent", "asap", "immediate", "emergency", "hiring", "job"];
const HIGH_KEYWORDS: [&str; 4] = ["project", "work", "collaboration", "partnership"];

/// Derives the priority of a new submission from its subject and message.
///
/// Matching is a case-insensitive substring search; urgent keywords win
/// over high ones when both appear.
pub fn classify(subject: &str, message: &str) -> Priority {
    let subject = subject.to_lowercase();
    let message = message.to_lowercase();
    let contains_any = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| message.contains(k) || subject.contains(k))
    };

    if contains_any(&URGENT_KEYWORDS) {
        Priority::Urgent
    } else if contains_any(&HIGH_KEYWORDS) {
        Priority::High
    } else {
        Priority::Medium
    }
}
