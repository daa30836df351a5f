pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod guides;
pub mod messages;
pub mod progress;
pub mod public;
pub mod students;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::configure)
        .configure(public::configure)
        .configure(dashboard::configure)
        .configure(students::configure)
        .configure(activities::configure)
        .configure(guides::configure)
        .configure(messages::configure)
        .configure(progress::configure);
}
