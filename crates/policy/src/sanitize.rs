//! Question sanitization applied before anything is persisted or logged.
//!
//! The HTTP response answer is never sanitized; only the stored receipt and
//! the logged event are, and both must see the identical sanitized text.

use std::sync::OnceLock;

use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
            .expect("email pattern is valid")
    })
}

fn number_regex() -> &'static Regex {
    NUMBER_RE.get_or_init(|| Regex::new(r"\b\d{6,}\b").expect("number pattern is valid"))
}

/// Replace emails and long numeric sequences with redaction markers.
pub fn sanitize_question(question: &str) -> String {
    let question = email_regex().replace_all(question, "[REDACTED_EMAIL]");
    number_regex()
        .replace_all(&question, "[REDACTED_NUMBER]")
        .into_owned()
}
