use serde::{Deserialize, Serialize};

/// One minute bucket whose match count exceeded its rule's threshold
///
/// Created by the spike detector and consumed by the report writer;
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Name of the rule that flagged this minute
    pub rule: String,
    /// ISO 8601 timestamp truncated to minute precision, e.g. "2024-01-10T10:00"
    pub minute: String,
    /// Matching lines observed within the minute
    pub count: u64,
    /// The rule's `max_per_minute` at detection time
    pub threshold: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_all_four_fields() {
        let anomaly = Anomaly {
            rule: "failed_ssh_spike".to_string(),
            minute: "2024-01-10T10:00".to_string(),
            count: 7,
            threshold: 5,
        };

        let value = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(value["rule"], "failed_ssh_spike");
        assert_eq!(value["minute"], "2024-01-10T10:00");
        assert_eq!(value["count"], 7);
        assert_eq!(value["threshold"], 5);
    }
}
