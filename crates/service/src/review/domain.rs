use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::review::schema::{self, REVIEW_SCHEMA};

/// A stored review as returned to clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub reviewer: String,
    pub rating: i32,
    pub review: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub date: DateTime<Utc>,
}

/// Validated submission for create and update. Never carries an id.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewInput {
    pub title: String,
    pub artist: String,
    pub reviewer: String,
    pub rating: i32,
    pub review: String,
    pub picture: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl ReviewInput {
    /// Validate a raw JSON body against the review schema and extract the typed fields.
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        let mut checked = schema::validate(&REVIEW_SCHEMA, body)?;
        let required_text = |c: &mut schema::Checked, name: &str| {
            c.take_text(name)
                .ok_or_else(|| ServiceError::Validation(format!("\"{name}\" is required")))
        };
        let title = required_text(&mut checked, "title")?;
        let artist = required_text(&mut checked, "artist")?;
        let reviewer = required_text(&mut checked, "reviewer")?;
        let rating = checked
            .take_integer("rating")
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ServiceError::Validation("\"rating\" is required".into()))?;
        let review = required_text(&mut checked, "review")?;
        Ok(Self {
            title,
            artist,
            reviewer,
            rating,
            review,
            picture: checked.take_text("picture"),
            date: checked.take_timestamp("date"),
        })
    }

    /// Build a new review with a fresh id; `date` defaults to `now`.
    pub fn into_review(self, id: Uuid, now: DateTime<Utc>) -> Review {
        Review {
            id,
            title: self.title,
            artist: self.artist,
            reviewer: self.reviewer,
            rating: self.rating,
            review: self.review,
            picture: self.picture,
            date: self.date.unwrap_or(now),
        }
    }

    /// Overwrite every mutable field of `existing`; `date` is only replaced when supplied.
    pub fn apply_to(self, existing: &mut Review) {
        existing.title = self.title;
        existing.artist = self.artist;
        existing.reviewer = self.reviewer;
        existing.rating = self.rating;
        existing.review = self.review;
        existing.picture = self.picture;
        if let Some(date) = self.date {
            existing.date = date;
        }
    }
}

impl From<ReviewInput> for models::review::Fields {
    fn from(i: ReviewInput) -> Self {
        Self {
            title: i.title,
            artist: i.artist,
            reviewer: i.reviewer,
            rating: i.rating,
            review: i.review,
            picture: i.picture,
            date: i.date,
        }
    }
}

impl From<models::review::Model> for Review {
    fn from(m: models::review::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            artist: m.artist,
            reviewer: m.reviewer,
            rating: m.rating,
            review: m.review,
            picture: m.picture,
            date: m.date.with_timezone(&Utc),
        }
    }
}

/// Parse a path identifier before any store lookup.
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn input_ignores_echoed_id() {
        let body = json!({
            "id": "d7c1b3a0-0000-0000-0000-000000000000",
            "title": "Hope", "artist": "Hugo Dujardin", "reviewer": "Sarah Clark",
            "rating": 4, "review": "Short but very sweet."
        });
        let input = ReviewInput::from_json(&body).expect("valid");
        let now = Utc::now();
        let id = Uuid::new_v4();
        let review = input.into_review(id, now);
        assert_eq!(review.id, id);
        assert_eq!(review.date, now);
        assert_eq!(review.picture, None);
    }

    #[test]
    fn apply_replaces_fields_and_keeps_date_when_absent() {
        let created = Utc::now();
        let mut existing = ReviewInput::from_json(&json!({
            "title": "A", "artist": "B", "reviewer": "C", "rating": 5,
            "review": "great", "picture": "https://example.com/a.png"
        }))
        .expect("valid")
        .into_review(Uuid::new_v4(), created);

        ReviewInput::from_json(&json!({
            "title": "A2", "artist": "B", "reviewer": "C", "rating": 3, "review": "ok"
        }))
        .expect("valid")
        .apply_to(&mut existing);

        assert_eq!(existing.title, "A2");
        assert_eq!(existing.rating, 3);
        assert_eq!(existing.picture, None);
        assert_eq!(existing.date, created);
    }

    #[test]
    fn parse_id_rejects_malformed_ids() {
        assert!(matches!(parse_id("12"), Err(ServiceError::InvalidId(_))));
        assert!(matches!(parse_id("not-a-uuid"), Err(ServiceError::InvalidId(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).ok(), Some(id));
    }

    #[test]
    fn review_serializes_without_empty_picture() {
        let review = Review {
            id: Uuid::nil(),
            title: "Dreams".into(),
            artist: "Benjamin Tissot".into(),
            reviewer: "Jane Doe".into(),
            rating: 4,
            review: "Relaxing.".into(),
            picture: None,
            date: Utc::now(),
        };
        let v = serde_json::to_value(&review).expect("serialize");
        assert!(v.get("picture").is_none());
        assert_eq!(v["id"], "00000000-0000-0000-0000-000000000000");
    }
}
