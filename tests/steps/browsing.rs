//! Step definitions for startup, backend setup and browsing
//!
//! - Mock backend data and failures
//! - Selecting users and toggling posts
//! - Generic key presses, time and screen assertions

use crate::common::world::PostlineWorld;
use cucumber::{given, then, when};
use postline::Focus;
use std::time::Duration;
use tracing::info;

// === Backend ===

#[given("the backend serves the sample users, posts and comments")]
async fn given_sample_backend(world: &mut PostlineWorld) {
    world.mount_sample_data().await;
}

#[given(regex = r#"^the backend fails on (GET|POST|DELETE) "([^"]+)"$"#)]
async fn given_route_fails(world: &mut PostlineWorld, http_method: String, route: String) {
    world.fail_route(&http_method, &route, 500).await;
}

#[given(regex = r#"^posts of user (\d+) take (\d+) ms to arrive$"#)]
async fn given_slow_posts(world: &mut PostlineWorld, user_id: u64, millis: u64) {
    world
        .delay_posts_of(user_id, Duration::from_millis(millis))
        .await;
}

#[given("postline is started")]
async fn given_started(world: &mut PostlineWorld) {
    world.start_app().await.expect("postline should start");
}

// === Actions ===

#[when(regex = r#"^I press "([^"]+)"$"#)]
async fn when_press_key(world: &mut PostlineWorld, key: String) {
    info!("Pressing key: {}", key);
    world.press(&key).await.expect("key should be handled");
}

#[when(regex = r#"^I type "([^"]*)"$"#)]
async fn when_type(world: &mut PostlineWorld, text: String) {
    world.type_text(&text).expect("text should be typed");
}

#[given(regex = r#"^I selected user "([^"]+)"$"#)]
async fn given_selected_user(world: &mut PostlineWorld, name: String) {
    select_user(world, &name).await;
}

#[when(regex = r#"^I select user "([^"]+)"$"#)]
async fn when_select_user(world: &mut PostlineWorld, name: String) {
    select_user(world, &name).await;
}

async fn select_user(world: &mut PostlineWorld, name: &str) {
    world.highlight_user(name).expect("user should be listed");
    world.press("Enter").await.expect("user should be selected");
}

#[when(regex = r#"^I select user "([^"]+)" without waiting$"#)]
async fn when_select_user_without_waiting(world: &mut PostlineWorld, name: String) {
    world.highlight_user(&name).expect("user should be listed");
    world
        .press_without_waiting("Enter")
        .expect("user should be selected");
}

#[given(regex = r#"^I opened post (\d+)$"#)]
async fn given_opened_post(world: &mut PostlineWorld, post_id: u64) {
    toggle_post(world, post_id).await;
}

#[when(regex = r#"^I (?:open|close) post (\d+)$"#)]
async fn when_toggle_post(world: &mut PostlineWorld, post_id: u64) {
    toggle_post(world, post_id).await;
}

async fn toggle_post(world: &mut PostlineWorld, post_id: u64) {
    world.highlight_post(post_id).expect("post should be listed");
    world.press("Enter").await.expect("post should toggle");
}

#[when(regex = r#"^(\d+(?:\.\d+)?) seconds? pass(?:es)?$"#)]
async fn when_time_passes(world: &mut PostlineWorld, seconds: f64) {
    world
        .advance(Duration::from_secs_f64(seconds))
        .expect("timers should fire");
}

// === Assertions ===

#[then(regex = r#"^the screen shows "([^"]+)"$"#)]
async fn then_screen_shows(world: &mut PostlineWorld, text: String) {
    let screen = world.screen_text();
    assert!(
        screen.contains(&text),
        "expected {text:?} on screen:\n{screen}"
    );
}

#[then(regex = r#"^the screen does not show "([^"]+)"$"#)]
async fn then_screen_does_not_show(world: &mut PostlineWorld, text: String) {
    let screen = world.screen_text();
    assert!(
        !screen.contains(&text),
        "did not expect {text:?} on screen:\n{screen}"
    );
}

#[then(regex = r#"^the status bar shows "([^"]+)"$"#)]
async fn then_status_bar_shows(world: &mut PostlineWorld, text: String) {
    let screen = world.screen_text();
    let status = screen.lines().last().unwrap_or_default();
    assert!(status.contains(&text), "status bar was {status:?}");
}

#[then(regex = r#"^the selected user is "([^"]+)"$"#)]
async fn then_selected_user(world: &mut PostlineWorld, name: String) {
    let selected = world
        .controller()
        .view_model()
        .selected_user()
        .map(|user| user.name.clone());
    assert_eq!(selected, Some(name));
}

#[then("no post is selected")]
async fn then_no_post_selected(world: &mut PostlineWorld) {
    assert_eq!(world.controller().view_model().selection().post_id(), None);
}

#[then(regex = r#"^post (\d+) is selected$"#)]
async fn then_post_selected(world: &mut PostlineWorld, post_id: u64) {
    assert_eq!(
        world.controller().view_model().selection().post_id(),
        Some(post_id)
    );
}

#[then(regex = r#"^the listed posts belong to user (\d+)$"#)]
async fn then_posts_belong_to(world: &mut PostlineWorld, user_id: u64) {
    let posts = world.controller().view_model().posts().posts().to_vec();
    assert!(!posts.is_empty(), "no posts are listed");
    assert!(posts.iter().all(|post| post.user_id == user_id));
}

#[then(regex = r#"^the focus is on (users|posts|comments|the form)$"#)]
async fn then_focus_is(world: &mut PostlineWorld, region: String) {
    let expected = match region.as_str() {
        "users" => Focus::Users,
        "posts" => Focus::Posts,
        "comments" => Focus::Comments,
        _ => Focus::Form,
    };
    assert_eq!(world.controller().view_model().focus(), expected);
}

#[then("postline has quit")]
async fn then_quit(world: &mut PostlineWorld) {
    assert!(world.controller().should_quit());
}
