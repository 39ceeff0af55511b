use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Event {
    pub id: String, // uuid from the remote table, epoch-millis string from the local store
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct EventDraft {
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl EventDraft {
    pub fn into_event(self, id: String, now: DateTime<Utc>) -> Event {
        Event {
            id,
            event_name: self.event_name,
            event_type: self.event_type,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            city: self.city,
            venue_type: self.venue_type,
            audience_size: self.audience_size,
            duration: self.duration,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl EventPatch {
    /// Merge the supplied fields into `event`, leaving the rest untouched.
    pub fn apply(&self, event: &mut Event) {
        if let Some(name) = &self.event_name {
            event.event_name = name.clone();
        }
        if let Some(kind) = &self.event_type {
            event.event_type = Some(kind.clone());
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(date) = self.date {
            event.date = Some(date);
        }
        if let Some(time) = &self.time {
            event.time = Some(time.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(city) = &self.city {
            event.city = Some(city.clone());
        }
        if let Some(venue_type) = &self.venue_type {
            event.venue_type = Some(venue_type.clone());
        }
        if let Some(audience_size) = self.audience_size {
            event.audience_size = Some(audience_size);
        }
        if let Some(duration) = self.duration {
            event.duration = Some(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_draft() -> EventDraft {
        EventDraft {
            event_name: "Launch Party".to_string(),
            event_type: Some("Celebration".to_string()),
            city: Some("Boise".to_string()),
            audience_size: Some(120),
            ..Default::default()
        }
    }

    #[test]
    fn draft_serialization_skips_missing_fields() {
        let draft = EventDraft {
            event_name: "Standup Night".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["event_name"], "Standup Night");
    }

    #[test]
    fn remote_row_parses() {
        let raw = r#"{
            "id": "6f1c9df2-1b7e-4a57-93a1-0dd6f2a1c001",
            "event_name": "Launch Party",
            "event_type": "Celebration",
            "description": null,
            "date": "2025-07-04",
            "time": "18:30",
            "location": null,
            "city": "Boise",
            "venue_type": "Indoor",
            "audience_size": 0,
            "duration": 4,
            "created_at": "2025-06-01T12:00:00+00:00",
            "updated_at": "2025-06-01T12:00:00+00:00"
        }"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.event_name, "Launch Party");
        assert_eq!(event.date, Some(NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()));
        assert_eq!(event.audience_size, Some(0));
        assert_eq!(event.duration, Some(4));
        assert_eq!(event.description, None);
        assert_eq!(
            event.created_at,
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn draft_into_event_stamps_both_timestamps() {
        let now = Utc::now();
        let event = sample_draft().into_event("1718000000000".to_string(), now);
        assert_eq!(event.id, "1718000000000");
        assert_eq!(event.created_at, now);
        assert_eq!(event.updated_at, now);
        assert_eq!(event.duration, None); // no default filled in outside the remote table
    }

    #[test]
    fn patch_apply_merges_only_supplied_fields() {
        let now = Utc::now();
        let mut event = sample_draft().into_event("1".to_string(), now);
        let patch = EventPatch {
            audience_size: Some(250),
            description: Some("Rooftop".to_string()),
            ..Default::default()
        };
        patch.apply(&mut event);
        assert_eq!(event.audience_size, Some(250));
        assert_eq!(event.description, Some("Rooftop".to_string()));
        assert_eq!(event.event_name, "Launch Party");
        assert_eq!(event.city, Some("Boise".to_string()));
    }
}
