use actix_web::{get, post, web};

use crate::error::AppError;
use crate::middleware::SessionContext;
use crate::pages::find_tutor::{FindTutorPage, FindTutorView};
use crate::pages::marketing::{self, AboutView, ContactReceipt, ContactView, HomeView};
use crate::pages::Page;
use crate::types::{ContactForm, TutorQuery};

// Public pages only use the session for the layout; a missing or stale
// token renders the anonymous layout.

#[get("/")]
async fn home(session: Option<SessionContext>) -> web::Json<Page<HomeView>> {
    web::Json(Page::new(session.as_ref(), marketing::home()))
}

#[get("/about")]
async fn about(session: Option<SessionContext>) -> web::Json<Page<AboutView>> {
    web::Json(Page::new(session.as_ref(), marketing::about()))
}

#[get("/contact")]
async fn contact(session: Option<SessionContext>) -> web::Json<Page<ContactView>> {
    web::Json(Page::new(session.as_ref(), marketing::contact()))
}

#[post("/contact")]
async fn submit_contact(form: web::Json<ContactForm>) -> Result<web::Json<ContactReceipt>, AppError> {
    Ok(web::Json(marketing::submit_contact(&form)?))
}

#[get("/find-tutor")]
async fn find_tutor(
    session: Option<SessionContext>,
    query: web::Query<TutorQuery>,
) -> web::Json<Page<FindTutorView>> {
    web::Json(Page::new(session.as_ref(), FindTutorPage::load(&query)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(about)
        .service(contact)
        .service(submit_contact)
        .service(find_tutor);
}
