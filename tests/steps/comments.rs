//! Step definitions for the comments of the open post
//!
//! - Backend answers for comment creation and removal
//! - Filling the new-comment form
//! - Comment list and form assertions

use crate::common::world::PostlineWorld;
use cucumber::{given, then, when};
use postline::app::models::FormField;
use postline::Focus;

#[given(regex = r#"^the backend accepts the comment "([^"]+)" from "([^"]+)" <([^>]+)>$"#)]
async fn given_backend_accepts_comment(
    world: &mut PostlineWorld,
    body: String,
    name: String,
    email: String,
) {
    let post_id = world
        .controller()
        .view_model()
        .selection()
        .post_id()
        .expect("a post should be open");
    world.accept_comment(post_id, &name, &email, &body).await;
}

#[given("the backend accepts deletes")]
async fn given_backend_accepts_deletes(world: &mut PostlineWorld) {
    world.accept_deletes().await;
}

#[when(regex = r#"^I fill the form with "([^"]*)", "([^"]*)" and "([^"]*)"$"#)]
async fn when_fill_form(world: &mut PostlineWorld, name: String, email: String, body: String) {
    for (index, value) in [name, email, body].iter().enumerate() {
        if index > 0 {
            world.press_without_waiting("Tab").expect("next field");
        }
        world.type_text(value).expect("text should be typed");
    }
}

#[when(regex = r#"^I delete comment "([^"]+)"$"#)]
async fn when_delete_comment(world: &mut PostlineWorld, name: String) {
    world.focus(Focus::Comments).expect("comments should be focusable");

    let vm = world.controller().view_model();
    let index = vm
        .comments()
        .comments()
        .iter()
        .position(|comment| comment.name == name)
        .expect("comment should be listed");
    let current = vm.cursors().comment;

    world.move_cursor_to(current, index).expect("cursor should move");
    world.press("d").await.expect("delete should be handled");
}

#[then(regex = r#"^the comment list has (\d+) comments?$"#)]
async fn then_comment_count(world: &mut PostlineWorld, count: usize) {
    assert_eq!(world.controller().view_model().comments().comments().len(), count);
}

#[then(regex = r#"^every listed comment belongs to post (\d+)$"#)]
async fn then_comments_belong_to(world: &mut PostlineWorld, post_id: u64) {
    let comments = world.controller().view_model().comments().comments().to_vec();
    assert!(!comments.is_empty(), "no comments are listed");
    assert!(comments.iter().all(|comment| comment.post_id == post_id));
}

#[then(regex = r#"^the last listed comment is "([^"]+)"$"#)]
async fn then_last_comment(world: &mut PostlineWorld, name: String) {
    let last = world
        .controller()
        .view_model()
        .comments()
        .comments()
        .last()
        .map(|comment| comment.name.clone());
    assert_eq!(last, Some(name));
}

#[then(regex = r#"^(\d+) comments? (?:was|were) sent to the backend$"#)]
async fn then_comments_sent(world: &mut PostlineWorld, count: usize) {
    assert_eq!(world.received("POST", "/comments").await, count);
}

#[then(regex = r#"^the form keeps name "([^"]*)" and email "([^"]*)" with an empty body$"#)]
async fn then_form_reset(world: &mut PostlineWorld, name: String, email: String) {
    let vm = world.controller().view_model();
    let form = vm.comments().form().expect("form should stay open");
    assert_eq!(form.value(FormField::Name), name);
    assert_eq!(form.value(FormField::Email), email);
    assert_eq!(form.value(FormField::Body), "");
    assert!(!form.is_submitting());
}

#[then("the form is closed")]
async fn then_form_closed(world: &mut PostlineWorld) {
    assert!(world.controller().view_model().comments().form().is_none());
}
