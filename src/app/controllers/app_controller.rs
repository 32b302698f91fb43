//! # Application Controller
//!
//! The controller orchestrates the application components and manages the event loop.
//! It connects key input to commands, commands to the ViewModel, ViewModel
//! requests to the dispatcher, and dispatcher completions back to the ViewModel.

use crate::app::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    events::{ApiRequest, ViewEvent},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    services::{ApiService, Backend, RestClient},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::config::Settings;
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    api_service: ApiService,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Controller on the real terminal talking to the configured backend
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = RestClient::new(&settings.base_url, settings.timeout)?;
        Self::with_io_streams(
            settings,
            Arc::new(client),
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create controller with injected backend and I/O streams
    pub fn with_io_streams(
        settings: &Settings,
        backend: Arc<dyn Backend>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let mut view_model = ViewModel::new();
        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);
        view_model.set_base_url(settings.base_url.clone());

        tracing::debug!(
            "Controller created for {} ({}x{})",
            settings.base_url,
            width,
            height
        );

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            api_service: ApiService::new(backend),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the main application loop until quit
    ///
    /// The terminal is restored even when the loop fails.
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        let result = self.run_loop().await;
        let cleanup = self.view_renderer.cleanup();
        result.and(cleanup)
    }

    async fn run_loop(&mut self) -> Result<()> {
        self.start();
        self.view_renderer.render_full(&self.view_model)?;
        self.view_model.collect_pending_view_events();

        while !self.should_quit {
            if self.event_stream.poll(INPUT_POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        self.handle_key_event(key_event)?;
                    }
                    Event::Resize(width, height) => {
                        self.view_model.update_terminal_size(width, height);
                        self.view_renderer.update_size(width, height);
                    }
                    _ => {}
                }
            }

            self.drain_completions();
            self.view_model.tick(Instant::now());

            if !self.should_quit {
                self.render_pending()?;
            }

            // Let spawned requests progress on the current thread runtime
            tokio::task::yield_now().await;
        }

        tracing::info!("Quit requested");
        Ok(())
    }

    /// Issue the initial users fetch
    pub fn start(&mut self) {
        let requests = self.view_model.start();
        self.dispatch(requests);
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::from_view_model(&self.view_model);
        let events = self.command_registry.process_event(key_event, &context)?;
        if !events.is_empty() {
            tracing::debug!("Command events generated: {:?}", events);
        }
        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        let requests = match event {
            CommandEvent::FocusNextRequested => {
                self.view_model.cycle_focus(true);
                Vec::new()
            }
            CommandEvent::FocusPreviousRequested => {
                self.view_model.cycle_focus(false);
                Vec::new()
            }
            CommandEvent::CursorMoveRequested { delta } => {
                self.view_model.move_cursor(delta);
                Vec::new()
            }
            CommandEvent::ActivateRequested => self.view_model.activate(),
            CommandEvent::DeleteCommentRequested => self.view_model.delete_at_cursor(),
            CommandEvent::OpenFormRequested => {
                self.view_model.open_comment_form();
                Vec::new()
            }
            CommandEvent::CloseFormRequested => {
                self.view_model.close_comment_form();
                Vec::new()
            }
            CommandEvent::FieldCharRequested { ch } => {
                self.view_model.insert_form_char(ch);
                Vec::new()
            }
            CommandEvent::FieldBackspaceRequested => {
                self.view_model.delete_form_char();
                Vec::new()
            }
            CommandEvent::NextFieldRequested => {
                self.view_model.focus_next_form_field();
                Vec::new()
            }
            CommandEvent::SubmitRequested => self.view_model.submit_comment(),
            CommandEvent::ClearFormRequested => {
                self.view_model.clear_comment_form();
                Vec::new()
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
                Vec::new()
            }
            CommandEvent::NoAction => Vec::new(),
        };
        self.dispatch(requests);
    }

    fn dispatch(&mut self, requests: Vec<ApiRequest>) {
        self.api_service.dispatch_all(requests);
    }

    /// Apply every completion that has already arrived
    fn drain_completions(&mut self) {
        while let Some(completion) = self.api_service.poll_completion() {
            self.view_model.apply_completion(completion, Instant::now());
        }
    }

    /// Render what the ViewModel reported as changed
    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        if view_events.is_empty() {
            return Ok(());
        }

        if view_events.contains(&ViewEvent::FullRedrawRequired) {
            return self.view_renderer.render_full(&self.view_model);
        }
        for event in &view_events {
            self.view_renderer.handle_view_event(event, &self.view_model)?;
        }
        Ok(())
    }

    /// Process a single key event without running the full event loop (for testing)
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        self.handle_key_event(key_event)?;
        self.render_pending()
    }

    /// Wait until every dispatched request has completed, applying completions
    /// as they arrive (for testing)
    pub async fn settle(&mut self, timeout: Duration) -> Result<()> {
        while self.api_service.in_flight() > 0 {
            let completion = tokio::time::timeout(timeout, self.api_service.next_completion())
                .await
                .map_err(|_| anyhow::anyhow!("Timed out waiting for backend completions"))?;
            if let Some(completion) = completion {
                self.view_model.apply_completion(completion, Instant::now());
            }
        }
        self.render_pending()
    }

    /// Advance timers to `now` and render (for testing)
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.view_model.tick(now);
        self.render_pending()
    }

    /// Get reference to view model (for testing)
    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Get reference to the renderer (for testing)
    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Check if the application should quit (for testing)
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
