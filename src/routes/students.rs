use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::pages::student_detail::{StudentDetailPage, StudentDetailView};
use crate::pages::students::{StudentsPage, StudentsView};
use crate::pages::Page;
use crate::types::StudentForm;

#[get("/students")]
async fn list_students(user: Authenticated) -> Result<web::Json<Page<StudentsView>>, AppError> {
    let view = StudentsPage::new(&user.session, &user.repos).load().await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[post("/students")]
async fn add_student(
    user: Authenticated,
    form: web::Json<StudentForm>,
) -> Result<HttpResponse, AppError> {
    let student = StudentsPage::new(&user.session, &user.repos)
        .add(form.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(student))
}

#[delete("/students/{id}")]
async fn delete_student(
    user: Authenticated,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    StudentsPage::new(&user.session, &user.repos)
        .delete(id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/students/{id}")]
async fn student_detail(
    user: Authenticated,
    id: web::Path<Uuid>,
) -> Result<web::Json<Page<StudentDetailView>>, AppError> {
    let view = StudentDetailPage::new(&user.session, &user.repos)
        .load(id.into_inner())
        .await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(add_student)
        .service(delete_student)
        .service(student_detail);
}
