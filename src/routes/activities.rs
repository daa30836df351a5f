use actix_web::{get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::models::Activity;
use crate::pages::activities::{ActivitiesPage, ActivitiesView, StatusFilter};
use crate::pages::Page;
use crate::types::{ActivitiesQuery, ActivityForm, StatusUpdate};

#[get("/activities")]
async fn list_activities(
    user: Authenticated,
    query: web::Query<ActivitiesQuery>,
) -> Result<web::Json<Page<ActivitiesView>>, AppError> {
    let filter = StatusFilter::parse(query.status.as_deref())?;
    let view = ActivitiesPage::new(&user.session, &user.repos)
        .load(filter)
        .await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[post("/activities")]
async fn add_activity(
    user: Authenticated,
    form: web::Json<ActivityForm>,
) -> Result<HttpResponse, AppError> {
    let activity = ActivitiesPage::new(&user.session, &user.repos)
        .add(form.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(activity))
}

#[put("/activities/{id}/status")]
async fn update_status(
    user: Authenticated,
    id: web::Path<Uuid>,
    body: web::Json<StatusUpdate>,
) -> Result<web::Json<Activity>, AppError> {
    let activity = ActivitiesPage::new(&user.session, &user.repos)
        .update_status(id.into_inner(), body.status)
        .await?;
    Ok(web::Json(activity))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_activities)
        .service(add_activity)
        .service(update_status);
}
