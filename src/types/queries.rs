use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesQuery {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// Counterpart whose thread should be opened.
    pub with: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgressQuery {
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TutorQuery {
    pub subject: Option<String>,
    pub location: Option<String>,
    pub q: Option<String>,
}
