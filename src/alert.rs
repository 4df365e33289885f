use serde::{Deserialize, Serialize};

use crate::extract::{extract_basket, extract_status};
use crate::sgt::{parse_slack_timestamp, to_iso_utc, to_sgt_parts};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
    Notification,
    Unknown,
}

impl AlertStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Notification => "notification",
            AlertStatus::Unknown => "unknown",
        }
    }
}

/// One BasketNotEmpty occurrence, denormalized for the report consumers.
/// Field order here is the serialized field order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlertRecord {
    pub timestamp: String,
    pub date: String,
    pub time: String,
    pub hour: u32,
    pub basket: String,
    pub status: AlertStatus,
    pub text: String,
}

impl AlertRecord {
    /// Build a record from a message's `text` and Slack `ts` fields.
    /// Returns None when the basket pattern does not match or the
    /// timestamp is unparseable.
    pub fn from_message(text: &str, ts: &str) -> Option<Self> {
        let basket = extract_basket(text)?;
        let status = extract_status(text);
        let utc = parse_slack_timestamp(ts)?;
        let (date, time, hour) = to_sgt_parts(utc);

        Some(AlertRecord {
            timestamp: to_iso_utc(utc),
            date,
            time,
            hour,
            basket,
            status,
            text: text.to_string(),
        })
    }

    pub fn is_firing(&self) -> bool {
        self.status == AlertStatus::Firing
    }

    pub fn is_resolved(&self) -> bool {
        self.status == AlertStatus::Resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_legacy_message() {
        let record = AlertRecord::from_message(
            "meat_fryer_1_content [Alert:Firing] BasketNotEmpty",
            "1704067200.123456",
        )
        .unwrap();

        assert_eq!(record.basket, "Meat Fryer 1");
        assert_eq!(record.status, AlertStatus::Firing);
        assert_eq!(record.timestamp, "2024-01-01T00:00:00+00:00");
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.time, "08:00:00");
        assert_eq!(record.hour, 8);
        assert!(record.is_firing());
    }

    #[test]
    fn test_record_from_current_message() {
        let record = AlertRecord::from_message(
            "veg_fryer_3 is BASKET_NOT_EMPTY :bell: Notification",
            "1704067200",
        )
        .unwrap();

        assert_eq!(record.basket, "Veg Fryer 3");
        assert_eq!(record.status, AlertStatus::Notification);
        assert!(!record.is_resolved());
    }

    #[test]
    fn test_record_requires_basket_pattern() {
        let record = AlertRecord::from_message("BasketNotEmpty but no basket here", "1704067200");
        assert!(record.is_none());
    }

    #[test]
    fn test_record_requires_parseable_timestamp() {
        let record =
            AlertRecord::from_message("meat_fryer_1_content BasketNotEmpty", "not-a-timestamp");
        assert!(record.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AlertStatus::Notification).unwrap();
        assert_eq!(json, "\"notification\"");
        assert_eq!(AlertStatus::Firing.as_str(), "firing");
    }

    #[test]
    fn test_record_serialized_field_order() {
        let record = AlertRecord::from_message(
            "meat_fryer_2_content [Alert:Firing] BasketNotEmpty",
            "1704067200",
        )
        .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let pos = |key: &str| json.find(&format!("\"{}\":", key)).unwrap();
        assert!(pos("timestamp") < pos("date"));
        assert!(pos("date") < pos("time"));
        assert!(pos("time") < pos("hour"));
        assert!(pos("hour") < pos("basket"));
        assert!(pos("basket") < pos("status"));
        assert!(pos("status") < pos("text"));
    }
}
