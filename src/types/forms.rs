use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::ActivityStatus;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StudentForm {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub grade_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GuideForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    /// Free text from the form; blank means no rate.
    pub hourly_rate: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActivityForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: ActivityStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MessageForm {
    pub recipient_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AssignmentForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub class_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub urgency: Option<String>,
}
