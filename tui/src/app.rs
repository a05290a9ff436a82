//! Main Application
//!
//! The App struct runs the widget as a thin display client:
//! - Event loop (keyboard, paste, mouse, resize)
//! - Clicks on the launcher and the send button
//! - Key mapping into `WidgetEvent`s for the headless `ChatWidget`
//! - Reply polling once per frame
//! - Rendering of the launcher or the panel
//!
//! All widget rules live in `chat_core`; this module only translates
//! terminal input and draws state.

use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;

use chat_core::{AssistantBackend, ChatWidget, WidgetEvent};

use crate::theme::DIM_GRAY;
use crate::widgets::{launcher_area, panel_area, ChatPanel, Launcher, PanelLayout, TranscriptState};

/// Frame interval (~10 FPS is plenty for typing dots)
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Host screen hint, top-left
const HOST_HINT: &str = "Ctrl+O chat  ·  Ctrl+E expand  ·  PgUp/PgDn scroll  ·  Ctrl+C quit";

/// Main application state
pub struct App<B: AssistantBackend + 'static> {
    /// Is the app still running?
    running: bool,
    /// Headless widget state
    widget: ChatWidget<B>,
    /// Transcript scroll position
    scroll: TranscriptState,
    /// Animation step, advanced every frame tick
    tick: u64,
    /// Screen area of the last render, for mouse hit-testing
    screen: Rect,
}

impl<B: AssistantBackend + 'static> App<B> {
    /// Create an App around a mounted widget
    pub fn new(widget: ChatWidget<B>) -> Self {
        Self {
            running: true,
            widget,
            scroll: TranscriptState::default(),
            tick: 0,
            screen: Rect::default(),
        }
    }

    /// The widget being displayed
    pub fn widget(&self) -> &ChatWidget<B> {
        &self.widget
    }

    /// Transcript scroll state
    pub fn scroll(&self) -> &TranscriptState {
        &self.scroll
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => {
                        tracing::info!("Terminal event stream closed");
                        self.running = false;
                    }
                },

                _ = frames.tick() => {
                    self.tick = self.tick.wrapping_add(1);
                }
            }

            self.update();
            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Drain finished fetches and keep the transcript pinned to the latest
    pub fn update(&mut self) {
        let appended = self.widget.poll_replies();
        if appended > 0 {
            tracing::debug!(appended, "Replies appended");
        }
        self.scroll.follow(self.widget.transcript().len());
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            KeyCode::Char('o') if ctrl => {
                self.widget.handle_event(WidgetEvent::ToggleOpen);
            }
            _ if !self.widget.is_open() => {
                if key.code == KeyCode::Enter {
                    self.widget.handle_event(WidgetEvent::Open);
                }
            }
            KeyCode::Char('e') if ctrl => {
                self.widget.handle_event(WidgetEvent::ToggleExpanded);
            }
            KeyCode::Esc => {
                self.widget.handle_event(WidgetEvent::Close);
            }
            KeyCode::Enter => {
                let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                if self.widget.handle_event(WidgetEvent::Enter { shift }) {
                    self.update();
                }
            }
            KeyCode::Backspace => {
                self.widget.handle_event(WidgetEvent::Backspace);
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.widget.handle_event(WidgetEvent::InsertChar(c));
            }
            KeyCode::PageUp => {
                let page = self.scroll.page_size();
                self.scroll.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = self.scroll.page_size();
                self.scroll.scroll_down(page);
            }
            _ => {}
        }
    }

    /// Append pasted text to the draft (newlines become spaces)
    fn handle_paste(&mut self, text: &str) {
        if !self.widget.is_open() {
            return;
        }
        let pasted: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let draft = format!("{}{pasted}", self.widget.draft());
        self.widget.handle_event(WidgetEvent::SetDraft(draft));
    }

    /// Handle mouse input
    ///
    /// Hit-testing uses the area of the last render.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let at = Position::new(mouse.column, mouse.row);

        if !self.widget.is_open() {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && launcher_area(self.screen).contains(at)
            {
                self.widget.handle_event(WidgetEvent::Open);
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.scroll.scroll_down(WHEEL_LINES),
            MouseEventKind::Down(MouseButton::Left) => {
                let panel = panel_area(self.screen, self.widget.is_expanded());
                if PanelLayout::new(panel).send_button().contains(at)
                    && self.widget.handle_event(WidgetEvent::Submit)
                {
                    self.update();
                }
            }
            _ => {}
        }
    }

    /// Render a frame
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if let Some(cursor) = self.render_to(area, frame.buffer_mut()) {
            frame.set_cursor_position(cursor);
        }
    }

    /// Render into a buffer, returning where the input cursor belongs
    pub fn render_to(&mut self, area: Rect, buf: &mut Buffer) -> Option<Position> {
        self.screen = area;
        buf.set_stringn(
            area.x + 1,
            area.y,
            HOST_HINT,
            usize::from(area.width.saturating_sub(2)),
            Style::default().fg(DIM_GRAY),
        );

        if !self.widget.is_open() {
            Launcher.render(launcher_area(area), buf);
            return None;
        }

        let panel = panel_area(area, self.widget.is_expanded());
        ChatPanel::new(self.widget.transcript(), self.widget.draft())
            .typing(self.widget.is_typing())
            .expanded(self.widget.is_expanded())
            .tick(self.tick)
            .render(panel, buf, &mut self.scroll);

        Some(PanelLayout::new(panel).cursor(self.widget.draft()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chat_core::{AskRequest, AssistantReply, BackendError, Mood, Sender};
    use pretty_assertions::assert_eq;

    struct ParrotBackend;

    #[async_trait]
    impl AssistantBackend for ParrotBackend {
        fn name(&self) -> &str {
            "Parrot"
        }

        async fn ask(&self, request: &AskRequest) -> Result<AssistantReply, BackendError> {
            Ok(AssistantReply {
                content: format!("you said {}", request.prompt),
                mood: Mood::Excited,
            })
        }
    }

    fn app() -> App<ParrotBackend> {
        App::new(ChatWidget::new(ParrotBackend))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(app: &mut App<ParrotBackend>, at: Position) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: at.x,
            row: at.y,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn render(app: &mut App<ParrotBackend>, area: Rect) {
        let mut buf = Buffer::empty(area);
        app.render_to(area, &mut buf);
    }

    fn type_text(app: &mut App<ParrotBackend>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_opens_launcher() {
        let mut app = app();
        assert!(!app.widget().is_open());

        app.handle_key(key(KeyCode::Enter));
        assert!(app.widget().is_open());
    }

    #[test]
    fn test_typing_ignored_while_closed() {
        let mut app = app();
        type_text(&mut app, "hello");
        assert_eq!(app.widget().draft(), "");
    }

    #[test]
    fn test_ctrl_o_toggles_twice_back_to_launcher() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        assert!(app.widget().is_open());
        app.handle_key(ctrl('o'));
        assert!(!app.widget().is_open());

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        assert_eq!(app.render_to(buf.area, &mut buf), None);
    }

    #[test]
    fn test_panel_keys() {
        let mut app = app();
        app.handle_key(ctrl('o'));

        app.handle_key(ctrl('e'));
        assert!(app.widget().is_expanded());

        type_text(&mut app, "abc");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.widget().draft(), "ab");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.widget().is_open());
        // Expanded flag is orthogonal to open
        assert!(app.widget().is_expanded());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(ctrl('c'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        type_text(&mut app, "claim ");
        app.handle_event(Event::Paste("CLM-1\nstatus".to_string()));
        assert_eq!(app.widget().draft(), "claim CLM-1 status");
    }

    #[tokio::test]
    async fn test_send_round_trip() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        type_text(&mut app, "hi");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.widget().transcript().len(), 2);
        assert!(app.widget().is_typing());
        assert_eq!(app.widget().draft(), "");

        let reply = app.widget.wait_for_reply().await.cloned().unwrap();
        app.update();

        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.content, "you said hi");
        assert!(!app.widget().is_typing());
    }

    #[tokio::test]
    async fn test_shift_enter_does_not_send() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        type_text(&mut app, "hi");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));

        assert_eq!(app.widget().transcript().len(), 1);
        assert_eq!(app.widget().draft(), "hi");
    }

    #[test]
    fn test_render_open_panel_sets_cursor() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        type_text(&mut app, "hey");

        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        let cursor = app.render_to(area, &mut buf);

        // Compact panel at (39, 5); input field starts one column in
        assert_eq!(cursor, Some(Position::new(39 + 2 + 1 + 3, 5 + 20)));
    }

    #[test]
    fn test_click_launcher_opens_panel() {
        let mut app = app();
        let area = Rect::new(0, 0, 80, 30);
        render(&mut app, area);

        // Outside the launcher: nothing
        click(&mut app, Position::new(10, 10));
        assert!(!app.widget().is_open());

        let launcher = launcher_area(area);
        click(&mut app, Position::new(launcher.x + 1, launcher.y + 1));
        assert!(app.widget().is_open());
    }

    #[tokio::test]
    async fn test_click_send_button_submits() {
        let mut app = app();
        let area = Rect::new(0, 0, 80, 30);
        app.handle_key(ctrl('o'));
        type_text(&mut app, "CLM-9");
        render(&mut app, area);

        let send = PanelLayout::new(panel_area(area, false)).send_button();
        // The input field is not the button
        click(&mut app, Position::new(send.x - 2, send.y));
        assert_eq!(app.widget().transcript().len(), 1);

        click(&mut app, Position::new(send.x + 1, send.y));
        assert_eq!(app.widget().transcript().len(), 2);
        assert_eq!(app.widget().transcript()[1].content, "CLM-9");
        assert_eq!(app.widget().draft(), "");
        assert!(app.widget().is_typing());
    }

    #[test]
    fn test_click_send_with_blank_draft_is_ignored() {
        let mut app = app();
        let area = Rect::new(0, 0, 80, 30);
        app.handle_key(ctrl('o'));
        render(&mut app, area);

        let send = PanelLayout::new(panel_area(area, false)).send_button();
        click(&mut app, Position::new(send.x, send.y));
        assert_eq!(app.widget().transcript().len(), 1);
        assert!(!app.widget().is_typing());
    }
}
