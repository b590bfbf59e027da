//! The event model.
//!
//! An `Event` is the only entity in memento: a user-created record with a
//! title, description, calendar date, and time of day. Date and time are
//! kept as the strings the user typed; parsing happens at scheduling time,
//! so a stored event with unparseable fields is legal (it just never fires).

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MementoError, MementoResult};

/// A stored event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique id, assigned at creation, immutable afterwards.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Calendar date, expected as `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, expected as `HH:MM`.
    pub time: String,
}

/// The user-editable fields of an event, before an id is assigned.
///
/// Input to [`EventStore::add`](crate::store::EventStore::add) and
/// [`EventStore::update`](crate::store::EventStore::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

impl EventDraft {
    /// Check that all four fields are filled in.
    ///
    /// Whitespace-only values count as empty. Reports the first blank field
    /// by name. Only drafts are validated; data already on disk is loaded
    /// as-is.
    pub fn validate(&self) -> MementoResult<()> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("time", &self.time),
        ] {
            if value.trim().is_empty() {
                return Err(MementoError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Turn the draft into an event with a fresh id.
    pub(crate) fn into_event(self) -> Event {
        Event {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
        }
    }
}

impl Event {
    /// The instant this event's reminder should fire, in UTC.
    ///
    /// Combines the `date` and `time` strings in the local timezone.
    /// Returns `None` when either string does not parse or the combination
    /// names a local time that does not exist (DST gap).
    pub fn trigger_instant(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = parse_time(self.time.trim())?;

        match Local.from_local_datetime(&date.and_time(time)) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            // DST fold: the same wall time exists twice, take the earlier.
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }

    /// Draft carrying this event's current field values (for edit forms).
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

/// Accepts `HH:MM`, with `HH:MM:SS` tolerated.
fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft() -> EventDraft {
        EventDraft {
            title: "Standup".to_string(),
            description: "Daily sync".to_string(),
            date: "2025-03-20".to_string(),
            time: "15:00".to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(make_draft().validate().is_ok());
    }

    #[test]
    fn each_blank_field_is_named() {
        for field in ["title", "description", "date", "time"] {
            let mut draft = make_draft();
            match field {
                "title" => draft.title = String::new(),
                "description" => draft.description = "   ".to_string(),
                "date" => draft.date = String::new(),
                _ => draft.time = "\t".to_string(),
            }
            match draft.validate() {
                Err(MementoError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn into_event_assigns_fresh_ids() {
        let a = make_draft().into_event();
        let b = make_draft().into_event();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "Standup");
    }

    #[test]
    fn trigger_instant_parses_date_and_time() {
        let event = make_draft().into_event();
        let instant = event.trigger_instant().expect("should parse");

        let expected = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2025, 3, 20)
                    .unwrap()
                    .and_hms_opt(15, 0, 0)
                    .unwrap(),
            )
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(instant, expected);
    }

    #[test]
    fn trigger_instant_accepts_seconds_and_whitespace() {
        let mut event = make_draft().into_event();
        event.time = " 15:00:30 ".to_string();
        assert!(event.trigger_instant().is_some());
    }

    #[test]
    fn trigger_instant_rejects_malformed_input() {
        let cases = [
            ("tomorrow", "15:00"),
            ("2025-03-20", "3pm"),
            ("2025-13-01", "15:00"),
            ("2025-03-20", "25:00"),
            ("", ""),
        ];
        for (date, time) in cases {
            let mut event = make_draft().into_event();
            event.date = date.to_string();
            event.time = time.to_string();
            assert!(
                event.trigger_instant().is_none(),
                "{date} {time} should not parse"
            );
        }
    }
}
