use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Bowling,
    ArDarts,
    SoftPlay,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Bowling => "bowling",
            Activity::ArDarts => "ar-darts",
            Activity::SoftPlay => "soft-play",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bowling" => Some(Activity::Bowling),
            "ar-darts" => Some(Activity::ArDarts),
            "soft-play" => Some(Activity::SoftPlay),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Activity::Bowling => "Strike Zone Bowling",
            Activity::ArDarts => "AR Darts Arena",
            Activity::SoftPlay => "Adventure Soft Play",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Guests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<u32>,
}

impl Guests {
    /// "2 Adults, 1 Children" style summary; zero counts are left out.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(adults) = self.adults.filter(|n| *n > 0) {
            parts.push(format!("{adults} Adults"));
        }
        if let Some(children) = self.children.filter(|n| *n > 0) {
            parts.push(format!("{children} Children"));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lanes: Option<u32>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_play_addon: Option<bool>,
}

/// A booking as submitted by a wizard, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub activity: Activity,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub guests: Guests,
    #[serde(default)]
    pub details: BookingDetails,
    pub email: String,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub activity: Activity,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub guests: Guests,
    #[serde(default)]
    pub details: BookingDetails,
    pub email: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(data: NewBooking, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            activity: data.activity,
            date: data.date,
            time: data.time,
            guests: data.guests,
            details: data.details,
            email: data.email,
            total_price: data.total_price,
            created_at,
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn occupies(&self, date: NaiveDate, time: &str, activity: Activity) -> bool {
        self.date == date && self.time == time && self.activity == activity
    }
}
