mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{activity, bearer, init_app, student, Harness};
use kidguides::models::{ActivityStatus, Role};

fn ids(body: &Value, key: &str) -> Vec<String> {
    body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn parents_only_see_their_own_activities() {
    let harness = Harness::new();
    let (alice, alice_token) = harness.user(Role::Parent, "Alice");
    let (bob, bob_token) = harness.user(Role::Parent, "Bob");

    let alice_kid = student(&alice, "Ari");
    let bob_kid = student(&bob, "Bo");
    harness.store.add_student(alice_kid.clone());
    harness.store.add_student(bob_kid.clone());

    let alice_work = activity(alice_kid.id, "Count to 20", ActivityStatus::Pending, "2024-05-02");
    let bob_work = activity(bob_kid.id, "Paint a tree", ActivityStatus::Pending, "2024-05-01");
    harness.store.add_activity(alice_work.clone());
    harness.store.add_activity(bob_work.clone());

    let app = init_app!(harness.state());

    let req = test::TestRequest::get()
        .uri("/activities")
        .insert_header(bearer(&alice_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body, "activities"), vec![alice_work.id.to_string()]);
    assert_eq!(ids(&body, "students"), vec![alice_kid.id.to_string()]);

    let req = test::TestRequest::get()
        .uri("/activities")
        .insert_header(bearer(&bob_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body, "activities"), vec![bob_work.id.to_string()]);
}

#[actix_web::test]
async fn teachers_see_what_they_assigned() {
    let harness = Harness::new();
    let (parent, _) = harness.user(Role::Parent, "Pat");
    let (teacher, teacher_token) = harness.user(Role::Teacher, "Ms Frizzle");

    let kid = student(&parent, "Kit");
    harness.store.add_student(kid.clone());
    harness
        .store
        .add_activity(activity(kid.id, "Home reading", ActivityStatus::Pending, "2024-05-01"));

    let mut assigned = activity(kid.id, "Field trip notes", ActivityStatus::Pending, "2024-05-03");
    assigned.student_id = None;
    assigned.class_id = Some(Uuid::new_v4());
    assigned.teacher_id = Some(teacher.clone());
    harness.store.add_activity(assigned.clone());

    let app = init_app!(harness.state());
    let req = test::TestRequest::get()
        .uri("/activities")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body, "activities"), vec![assigned.id.to_string()]);
    assert!(body["students"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn tutors_see_nothing() {
    let harness = Harness::new();
    let (parent, _) = harness.user(Role::Parent, "Pat");
    let (_, tutor_token) = harness.user(Role::Tutor, "Tess");
    let kid = student(&parent, "Kit");
    harness.store.add_student(kid.clone());
    harness
        .store
        .add_activity(activity(kid.id, "Puzzle", ActivityStatus::Completed, "2024-05-01"));

    let app = init_app!(harness.state());
    let req = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header(bearer(&tutor_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["activities"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["completion_rate"], 0.0);
}

#[actix_web::test]
async fn cannot_touch_another_parents_student() {
    let harness = Harness::new();
    let (_, alice_token) = harness.user(Role::Parent, "Alice");
    let (bob, _) = harness.user(Role::Parent, "Bob");
    let bob_kid = student(&bob, "Bo");
    harness.store.add_student(bob_kid.clone());

    let app = init_app!(harness.state());

    let req = test::TestRequest::post()
        .uri("/activities")
        .insert_header(bearer(&alice_token))
        .set_json(json!({
            "title": "Sneaky",
            "due_date": "2024-06-01",
            "student_id": bob_kid.id.to_string()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(harness.store.activities().is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/students/{}", bob_kid.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Student not found");

    let req = test::TestRequest::delete()
        .uri(&format!("/students/{}", bob_kid.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(harness.store.students().len(), 1);
}

#[actix_web::test]
async fn progress_rejects_students_outside_the_family() {
    let harness = Harness::new();
    let (alice, alice_token) = harness.user(Role::Parent, "Alice");
    let (bob, _) = harness.user(Role::Parent, "Bob");
    harness.store.add_student(student(&alice, "Ari"));
    let bob_kid = student(&bob, "Bo");
    harness.store.add_student(bob_kid.clone());

    let app = init_app!(harness.state());
    let req = test::TestRequest::get()
        .uri(&format!("/progress?student_id={}", bob_kid.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
