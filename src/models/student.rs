use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_GRADE: &str = "1st Grade";

pub const GRADE_OPTIONS: [&str; 14] = [
    "Preschool",
    "Kindergarten",
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "9th Grade",
    "10th Grade",
    "11th Grade",
    "12th Grade",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub grade_level: String,
    pub parent_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewStudent {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub grade_level: String,
    pub parent_id: String,
}

/// Id/name pair used for the message compose list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: String,
    pub full_name: String,
}

impl From<&Student> for Contact {
    fn from(student: &Student) -> Self {
        Contact {
            id: student.id.to_string(),
            full_name: student.full_name.clone(),
        }
    }
}
