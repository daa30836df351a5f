mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, guide, init_app, message, Harness};
use kidguides::models::Role;

#[actix_web::test]
async fn conversations_group_by_counterpart() {
    let harness = Harness::new();
    let (me, token) = harness.user(Role::Parent, "Pat");
    let (guide_a, _) = harness.user(Role::Tutor, "Gia");
    let (guide_b, _) = harness.user(Role::Tutor, "Ben");

    let mut newest = message(&guide_a, &me, "Lesson moved to 4pm", false, 30);
    newest.sender_name = Some("Gia".to_string());
    harness.store.add_message(newest);
    harness.store.add_message(message(&me, &guide_b, "Thanks!", false, 20));
    harness.store.add_message(message(&guide_a, &me, "Hi there", false, 10));
    harness.store.add_message(message(&guide_b, &me, "Welcome", true, 5));

    let app = init_app!(harness.state());
    let req = test::TestRequest::get()
        .uri("/messages")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let conversations = body["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0]["other_user_id"], guide_a);
    assert_eq!(conversations[0]["other_user_name"], "Gia");
    assert_eq!(conversations[0]["last_message"], "Lesson moved to 4pm");
    assert_eq!(conversations[0]["unread_count"], 2);
    assert_eq!(conversations[1]["other_user_id"], guide_b);
    // my own unread message to Ben is not waiting on me
    assert_eq!(conversations[1]["unread_count"], 0);
    assert_eq!(body["unread_total"], 2);
    assert!(body["thread"].is_null());
}

#[actix_web::test]
async fn opening_a_thread_marks_it_read() {
    let harness = Harness::new();
    let (me, token) = harness.user(Role::Parent, "Pat");
    let (other, _) = harness.user(Role::Tutor, "Gia");
    harness.store.add_message(message(&other, &me, "first", false, 1));
    harness.store.add_message(message(&me, &other, "reply", false, 2));
    harness.store.add_message(message(&other, &me, "second", false, 3));

    let app = init_app!(harness.state());
    let req = test::TestRequest::get()
        .uri(&format!("/messages?with={}", other))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let thread: Vec<&str> = body["thread"]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(thread, vec!["first", "reply", "second"]);
    assert_eq!(body["unread_total"], 0);

    let stored = harness.store.messages();
    assert!(stored.iter().filter(|m| m.sender_id == other).all(|m| m.read));
    // the reply is addressed to the other side and stays unread
    assert!(stored.iter().filter(|m| m.sender_id == me).all(|m| !m.read));
}

#[actix_web::test]
async fn parents_write_to_their_guides() {
    let harness = Harness::new();
    let (me, token) = harness.user(Role::Parent, "Pat");
    let tutor = guide(&me, "Gia Lopez");
    harness.store.add_guide(tutor.clone());

    let app = init_app!(harness.state());

    let req = test::TestRequest::get()
        .uri("/messages")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["contacts"][0]["full_name"], "Gia Lopez");

    let req = test::TestRequest::post()
        .uri("/messages")
        .insert_header(bearer(&token))
        .set_json(json!({ "recipient_id": tutor.id.to_string(), "content": "See you Tuesday" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let stored = harness.store.messages();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].sender_name.as_deref(), Some("Pat"));
    assert_eq!(stored[0].recipient_name.as_deref(), Some("Gia Lopez"));
    assert!(!stored[0].read);
}

#[actix_web::test]
async fn blank_messages_are_not_sent() {
    let harness = Harness::new();
    let (_, token) = harness.user(Role::Parent, "Pat");
    let app = init_app!(harness.state());

    let req = test::TestRequest::post()
        .uri("/messages")
        .insert_header(bearer(&token))
        .set_json(json!({ "recipient_id": "someone", "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(harness.store.messages().is_empty());
}
