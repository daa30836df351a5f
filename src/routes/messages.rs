use actix_web::{get, post, web, HttpResponse};

use crate::error::AppError;
use crate::middleware::Authenticated;
use crate::pages::messages::{MessagesPage, MessagesView};
use crate::pages::Page;
use crate::types::{MessageForm, MessagesQuery};

/// Conversation list; `?with=<user id>` also opens that thread and marks it read.
#[get("/messages")]
async fn list_messages(
    user: Authenticated,
    query: web::Query<MessagesQuery>,
) -> Result<web::Json<Page<MessagesView>>, AppError> {
    let view = MessagesPage::new(&user.session, &user.repos)
        .load(query.with.as_deref())
        .await?;
    Ok(web::Json(Page::new(Some(&user.session), view)))
}

#[post("/messages")]
async fn send_message(
    user: Authenticated,
    form: web::Json<MessageForm>,
) -> Result<HttpResponse, AppError> {
    let message = MessagesPage::new(&user.session, &user.repos)
        .send(form.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(message))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_messages).service(send_message);
}
