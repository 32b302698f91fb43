use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cucumber::World;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postline::app::io::{MockEventStream, MockRenderStream, SharedScreen};
use postline::config::Settings;
use postline::{AppController, Focus, RestClient};

/// How long a step waits for the backend before failing
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Priority for mocks that override the sample data (wiremock default is 5)
const OVERRIDE_PRIORITY: u8 = 1;

pub type TestController = AppController<MockEventStream, MockRenderStream>;

/// State shared by the steps of one scenario
///
/// Each scenario gets its own mock server and its own controller drawing
/// onto an in-memory screen. Timers are driven through `clock` instead of
/// waiting in real time.
#[derive(World)]
#[world(init = Self::new)]
pub struct PostlineWorld {
    pub server: Option<MockServer>,
    pub controller: Option<TestController>,
    pub screen: Option<SharedScreen>,
    pub clock: Instant,
}

impl std::fmt::Debug for PostlineWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostlineWorld")
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("started", &self.controller.is_some())
            .finish()
    }
}

impl PostlineWorld {
    pub fn new() -> Self {
        Self {
            server: None,
            controller: None,
            screen: None,
            clock: Instant::now(),
        }
    }

    pub async fn server(&mut self) -> &MockServer {
        if self.server.is_none() {
            self.server = Some(MockServer::start().await);
        }
        self.server.as_ref().expect("server was just started")
    }

    pub fn controller(&mut self) -> &mut TestController {
        self.controller
            .as_mut()
            .expect("postline has not been started in this scenario")
    }

    /// Serve three users, three posts and three comments
    ///
    /// Ervin Howell has no posts. Post 1 has two comments, post 2 one.
    pub async fn mount_sample_data(&mut self) {
        let server = self.server().await;

        mount_json(
            server,
            Mock::given(method("GET")).and(path("/users")),
            json!([
                {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "phone": "1-770-736-8031"},
                {"id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv", "phone": "010-692-6593"},
                {"id": 3, "name": "Clementine Bauch", "email": "Nathan@yesenia.net", "phone": "1-463-123-4447"}
            ]),
        )
        .await;

        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/posts"))
                .and(query_param("userId", "1")),
            json!([
                {"id": 1, "userId": 1, "title": "sunt aut facere", "body": "quia et suscipit recusandae"},
                {"id": 2, "userId": 1, "title": "qui est esse", "body": "est rerum tempore vitae"}
            ]),
        )
        .await;
        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/posts"))
                .and(query_param("userId", "2")),
            json!([]),
        )
        .await;
        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/posts"))
                .and(query_param("userId", "3")),
            json!([
                {"id": 3, "userId": 3, "title": "ea molestias quasi", "body": "et iusto sed quo iure"}
            ]),
        )
        .await;

        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/comments"))
                .and(query_param("postId", "1")),
            json!([
                {"id": 1, "postId": 1, "name": "id labore", "email": "Eliseo@gardner.biz", "body": "laudantium enim"},
                {"id": 2, "postId": 1, "name": "quo vero", "email": "Jayne_Kuhic@sydney.com", "body": "est natus enim"}
            ]),
        )
        .await;
        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/comments"))
                .and(query_param("postId", "2")),
            json!([
                {"id": 6, "postId": 2, "name": "et fugit eligendi", "email": "Presley.Mueller@myrl.com", "body": "doloribus at sed"}
            ]),
        )
        .await;
        mount_json(
            server,
            Mock::given(method("GET"))
                .and(path("/comments"))
                .and(query_param("postId", "3")),
            json!([]),
        )
        .await;
    }

    /// Answer one route with a status code, taking precedence over the sample data
    pub async fn fail_route(&mut self, http_method: &str, route: &str, status: u16) {
        let server = self.server().await;
        Mock::given(method(http_method))
            .and(path_regex(route))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(OVERRIDE_PRIORITY)
            .mount(server)
            .await;
    }

    pub async fn delay_posts_of(&mut self, user_id: u64, delay: Duration) {
        let server = self.server().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("userId", user_id.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([
                        {"id": 90, "userId": user_id, "title": "slow post", "body": "arrives late"}
                    ]))
                    .set_delay(delay),
            )
            .with_priority(OVERRIDE_PRIORITY)
            .mount(server)
            .await;
    }

    pub async fn accept_comment(&mut self, post_id: u64, name: &str, email: &str, body: &str) {
        let server = self.server().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 501,
                "postId": post_id,
                "name": name,
                "email": email,
                "body": body
            })))
            .with_priority(OVERRIDE_PRIORITY)
            .mount(server)
            .await;
    }

    pub async fn accept_deletes(&mut self) {
        let server = self.server().await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/comments/\d+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(server)
            .await;
    }

    /// Requests the backend received with the given method and path
    pub async fn received(&mut self, http_method: &str, route: &str) -> usize {
        let server = self.server().await;
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| {
                request.method.to_string() == http_method && request.url.path() == route
            })
            .count()
    }

    /// Build the controller against the mock server and load the users
    pub async fn start_app(&mut self) -> Result<()> {
        let base_url = self.server().await.uri();
        let settings = Settings {
            base_url: base_url.clone(),
            timeout: SETTLE_TIMEOUT,
            verbose: false,
            log_file: None,
        };
        let backend = RestClient::new(&base_url, SETTLE_TIMEOUT)?;
        let render_stream = MockRenderStream::with_size((100, 40));
        self.screen = Some(render_stream.screen());

        let mut controller = AppController::with_io_streams(
            &settings,
            Arc::new(backend),
            MockEventStream::empty(),
            render_stream,
        )?;
        controller.start();
        controller.settle(SETTLE_TIMEOUT).await?;

        self.controller = Some(controller);
        self.clock = Instant::now();
        Ok(())
    }

    pub async fn settle(&mut self) -> Result<()> {
        self.controller().settle(SETTLE_TIMEOUT).await
    }

    /// Send one key and wait for every request it caused
    pub async fn press(&mut self, key: &str) -> Result<()> {
        self.press_without_waiting(key)?;
        self.settle().await
    }

    pub fn press_without_waiting(&mut self, key: &str) -> Result<()> {
        let event = parse_key(key)?;
        self.controller().process_key_event(event)
    }

    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            self.controller()
                .process_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))?;
        }
        Ok(())
    }

    /// Tab through the regions until `focus` is reached
    pub fn focus(&mut self, focus: Focus) -> Result<()> {
        for _ in 0..4 {
            if self.controller().view_model().focus() == focus {
                return Ok(());
            }
            self.press_without_waiting("Tab")?;
        }
        anyhow::bail!("could not move focus to {focus:?}")
    }

    /// Put the cursor of the focused list on row `index`
    pub fn move_cursor_to(&mut self, current: usize, index: usize) -> Result<()> {
        let (key, steps) = if index >= current {
            ("Down", index - current)
        } else {
            ("Up", current - index)
        };
        for _ in 0..steps {
            self.press_without_waiting(key)?;
        }
        Ok(())
    }

    pub fn highlight_user(&mut self, name: &str) -> Result<()> {
        self.focus(Focus::Users)?;
        let vm = self.controller().view_model();
        let index = vm
            .users()
            .users()
            .iter()
            .position(|user| user.name == name)
            .ok_or_else(|| anyhow::anyhow!("no user named {name}"))?;
        let current = vm.cursors().user;
        self.move_cursor_to(current, index)
    }

    pub fn highlight_post(&mut self, post_id: u64) -> Result<()> {
        self.focus(Focus::Posts)?;
        let vm = self.controller().view_model();
        let index = vm
            .posts()
            .posts()
            .iter()
            .position(|post| post.id == post_id)
            .ok_or_else(|| anyhow::anyhow!("post {post_id} is not listed"))?;
        let current = vm.cursors().post;
        self.move_cursor_to(current, index)
    }

    /// Advance the scenario clock and fire due timers
    pub fn advance(&mut self, duration: Duration) -> Result<()> {
        self.clock = self.clock.max(Instant::now()) + duration;
        let now = self.clock;
        self.controller().tick(now)
    }

    pub fn screen_text(&self) -> String {
        match &self.screen {
            Some(screen) => screen
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .text(),
            None => String::new(),
        }
    }
}

async fn mount_json(server: &MockServer, mock: wiremock::MockBuilder, body: Value) {
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Parse key names used in feature files ("Enter", "Ctrl+L", "w", ...)
pub fn parse_key(key: &str) -> Result<KeyEvent> {
    let (modifiers, name) = match key.split_once('+') {
        Some(("Ctrl", name)) => (KeyModifiers::CONTROL, name),
        Some(("Shift", name)) => (KeyModifiers::SHIFT, name),
        _ => (KeyModifiers::NONE, key),
    };

    let code = match name {
        "Enter" => KeyCode::Enter,
        "Tab" if modifiers == KeyModifiers::SHIFT => KeyCode::BackTab,
        "Tab" => KeyCode::Tab,
        "Esc" | "Escape" => KeyCode::Esc,
        "Backspace" => KeyCode::Backspace,
        "Delete" => KeyCode::Delete,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        single if single.chars().count() == 1 => {
            let ch = single.chars().next().unwrap_or(' ');
            if modifiers == KeyModifiers::CONTROL {
                KeyCode::Char(ch.to_ascii_lowercase())
            } else {
                KeyCode::Char(ch)
            }
        }
        other => anyhow::bail!("unknown key {other}"),
    };

    Ok(KeyEvent::new(code, modifiers))
}
