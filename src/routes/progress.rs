use actix_web::{get, web};

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::pages::progress::{ProgressPage, ProgressView};
use crate::pages::Page;
use crate::types::ProgressQuery;

#[get("/progress")]
async fn progress(
    user: Authenticated,
    query: web::Query<ProgressQuery>,
) -> Result<web::Json<Page<ProgressView>>, AppError> {
    let view = ProgressPage::new(&user.session, &user.repos)
        .load(query.student_id)
        .await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(progress);
}
