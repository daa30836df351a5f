use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeacherClass {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub student_count: u32,
    pub teacher_id: String,
}

/// Row of the provider-maintained `student_progress` rollup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentProgress {
    pub id: String,
    pub class_id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub completed_activities: u32,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub average_score: f64,
}
