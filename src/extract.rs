use regex::Regex;
use std::sync::OnceLock;

use crate::alert::AlertStatus;

/// Both alert-naming conventions seen in the feed: the legacy camel-case
/// marker and the current screaming-snake marker.
const ALERT_MARKERS: [&str; 2] = ["BasketNotEmpty", "BASKET_NOT_EMPTY"];

/// Fryer token to display label. Unknown tokens fall through unmapped.
const BASKET_LABELS: [(&str, &str); 4] = [
    ("meat_fryer_1", "Meat Fryer 1"),
    ("meat_fryer_2", "Meat Fryer 2"),
    ("veg_fryer_3", "Veg Fryer 3"),
    ("veg_fryer_4", "Veg Fryer 4"),
];

/// Status markers in priority order; first match wins.
const STATUS_RULES: [(&str, AlertStatus); 3] = [
    ("[Alert:Firing]", AlertStatus::Firing),
    ("[Alert:Resolved]", AlertStatus::Resolved),
    (":bell: Notification", AlertStatus::Notification),
];

fn legacy_basket_re() -> &'static Regex {
    static LEGACY_BASKET_RE: OnceLock<Regex> = OnceLock::new();
    LEGACY_BASKET_RE.get_or_init(|| {
        Regex::new(r"(meat_fryer_[12]|veg_fryer_[34])_content").expect("valid legacy basket regex")
    })
}

fn current_basket_re() -> &'static Regex {
    static CURRENT_BASKET_RE: OnceLock<Regex> = OnceLock::new();
    CURRENT_BASKET_RE.get_or_init(|| {
        Regex::new(r"(meat_fryer_[12]|veg_fryer_[34])\s+is\s+BASKET_NOT_EMPTY")
            .expect("valid current basket regex")
    })
}

/// A message is relevant only if it carries one of the BasketNotEmpty
/// markers (case-sensitive).
pub fn is_basket_alert(text: &str) -> bool {
    ALERT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Extract the human-readable basket name. The legacy `_content` form is
/// tried before the current `is BASKET_NOT_EMPTY` form.
pub fn extract_basket(text: &str) -> Option<String> {
    for re in [legacy_basket_re(), current_basket_re()] {
        if let Some(caps) = re.captures(text) {
            let token = caps.get(1).map(|m| m.as_str())?;
            return Some(basket_label(token));
        }
    }
    None
}

fn basket_label(token: &str) -> String {
    BASKET_LABELS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Extract the alert status from the message text. Rules are exclusive and
/// ordered, so a text carrying both the firing and notification markers
/// resolves to firing.
pub fn extract_status(text: &str) -> AlertStatus {
    STATUS_RULES
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, status)| *status)
        .unwrap_or(AlertStatus::Unknown)
}
