use actix_web::{get, post, web, HttpResponse};

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::pages::dashboard::{DashboardPage, DashboardView};
use crate::pages::teacher_dashboard::{TeacherDashboardPage, TeacherDashboardView};
use crate::pages::Page;
use crate::types::AssignmentForm;

#[get("/dashboard")]
async fn dashboard(user: Authenticated) -> Result<web::Json<Page<DashboardView>>, AppError> {
    let view = DashboardPage::new(&user.session, &user.repos).load().await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[get("/teacher-dashboard")]
async fn teacher_dashboard(
    user: Authenticated,
) -> Result<web::Json<Page<TeacherDashboardView>>, AppError> {
    let view = TeacherDashboardPage::new(&user.session, &user.repos)?
        .load()
        .await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[post("/teacher-dashboard/assignments")]
async fn create_assignment(
    user: Authenticated,
    form: web::Json<AssignmentForm>,
) -> Result<HttpResponse, AppError> {
    let activity = TeacherDashboardPage::new(&user.session, &user.repos)?
        .assign(form.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(activity))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(teacher_dashboard)
        .service(create_assignment);
}
