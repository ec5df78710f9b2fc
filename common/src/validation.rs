use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // Unanchored on purpose: any run of seven digits/punctuation passes.
    static ref PHONE_RE: Regex = Regex::new(r"[0-9\-+()\s]{7,}").unwrap();
}

pub fn is_email_valid(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_phone_valid(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

/// True when the value has something other than whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
