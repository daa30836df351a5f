use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{require, AppError, ProviderResultExt};
use crate::middleware::SessionContext;
use crate::models::{Guide, GuideStatus, NewGuide};
use crate::repository::Repositories;
use crate::types::GuideForm;

#[derive(Debug, Serialize)]
pub struct GuidesView {
    pub guides: Vec<Guide>,
}

pub struct GuidesPage<'a> {
    session: &'a SessionContext,
    repos: &'a Repositories,
}

impl<'a> GuidesPage<'a> {
    pub fn new(session: &'a SessionContext, repos: &'a Repositories) -> Self {
        GuidesPage { session, repos }
    }

    pub async fn load(&self) -> Result<GuidesView, AppError> {
        let guides = self
            .repos
            .guides
            .find_by_parent(&self.session.user_id)
            .await
            .or_fail("Failed to load data")?;
        Ok(GuidesView { guides })
    }

    pub async fn add(&self, form: GuideForm) -> Result<Guide, AppError> {
        let (Some(full_name), Some(email), Some(specialization)) = (
            require(&form.full_name),
            require(&form.email),
            require(&form.specialization),
        ) else {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        };

        let hourly_rate = parse_rate(require(&form.hourly_rate))?;

        let guide = self
            .repos
            .guides
            .insert(NewGuide {
                full_name: full_name.to_string(),
                email: email.to_string(),
                specialization: specialization.to_string(),
                hourly_rate,
                parent_id: self.session.user_id.clone(),
                status: GuideStatus::Active,
            })
            .await
            .or_fail("Failed to add guide")?;

        info!(guide_id = %guide.id, parent_id = %guide.parent_id, "Added guide");
        Ok(guide)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .repos
            .guides
            .delete(id, &self.session.user_id)
            .await
            .or_fail("Failed to delete guide")?;

        if !deleted {
            return Err(AppError::NotFound("Guide not found".to_string()));
        }
        info!(guide_id = %id, "Deleted guide");
        Ok(())
    }
}

fn parse_rate(value: Option<&str>) -> Result<Option<f64>, AppError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= 0.0 => Ok(Some(rate)),
        _ => Err(AppError::Validation(
            "Hourly rate must be a number".to_string(),
        )),
    }
}
