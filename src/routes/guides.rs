use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::pages::guides::{GuidesPage, GuidesView};
use crate::pages::Page;
use crate::types::GuideForm;

#[get("/guides")]
async fn list_guides(user: Authenticated) -> Result<web::Json<Page<GuidesView>>, AppError> {
    let view = GuidesPage::new(&user.session, &user.repos).load().await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[post("/guides")]
async fn add_guide(
    user: Authenticated,
    form: web::Json<GuideForm>,
) -> Result<HttpResponse, AppError> {
    let guide = GuidesPage::new(&user.session, &user.repos)
        .add(form.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(guide))
}

#[delete("/guides/{id}")]
async fn delete_guide(user: Authenticated, id: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    GuidesPage::new(&user.session, &user.repos)
        .delete(id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_guides)
        .service(add_guide)
        .service(delete_guide);
}
