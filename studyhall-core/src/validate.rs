use std::sync::OnceLock;

use regex::Regex;

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^010-\d{4}-\d{4}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Korean mobile number as the kiosk collects it, dashes included.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_re().is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Account PIN is exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit())
}
