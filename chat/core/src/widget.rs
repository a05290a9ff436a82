//! Chat Widget State
//!
//! [`ChatWidget`] is the whole widget minus pixels: the open/expanded flags,
//! the transcript, the draft, the typing indicator and the resolved user id.
//! Surfaces feed it [`WidgetEvent`]s and render whatever it holds.
//!
//! # Sending
//!
//! Submitting a draft appends the user message right away and spawns the
//! fetch on the tokio runtime. The reply comes back over a channel the
//! widget owns; call [`ChatWidget::poll_replies`] once per frame (or await
//! [`ChatWidget::wait_for_reply`]) to append it. Nothing stops a second send
//! while the first is in flight: replies are appended in the order they
//! complete.
//!
//! Replies that arrive after the panel was closed are still appended, so the
//! conversation is intact when it is reopened. Replies that arrive after the
//! widget was dropped are discarded.

use tokio::sync::mpsc;

use crate::backend::{AssistantBackend, AssistantReply, ResponseFetcher};
use crate::events::WidgetEvent;
use crate::identity::{resolve_user_id, AuthContext, UserId};
use crate::message::{ChatMessage, MessageIdGenerator};
use crate::storage::SessionStorage;

/// Capacity of the reply channel
const REPLY_CHANNEL_CAPACITY: usize = 32;

/// The chat widget's state holder
pub struct ChatWidget<B: AssistantBackend + 'static> {
    /// Infallible assistant client
    fetcher: ResponseFetcher<B>,
    /// Append-only conversation
    transcript: Vec<ChatMessage>,
    /// Message id source
    ids: MessageIdGenerator,
    /// Text in the input box
    draft: String,
    /// Panel shown (vs launcher only)
    open: bool,
    /// Expanded panel size
    expanded: bool,
    /// Typing indicator
    typing: bool,
    /// Resolved user id
    user_id: Option<UserId>,
    /// Fetches not yet appended
    in_flight: usize,
    /// Reply channel (sender cloned into fetch tasks)
    reply_tx: mpsc::Sender<AssistantReply>,
    reply_rx: mpsc::Receiver<AssistantReply>,
}

impl<B: AssistantBackend + 'static> ChatWidget<B> {
    /// Create a closed widget holding only the greeting
    pub fn new(backend: B) -> Self {
        Self::with_fetcher(ResponseFetcher::new(backend))
    }

    /// Create a widget around an existing fetcher
    pub fn with_fetcher(fetcher: ResponseFetcher<B>) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel(REPLY_CHANNEL_CAPACITY);
        Self {
            fetcher,
            transcript: vec![ChatMessage::greeting()],
            ids: MessageIdGenerator::new(),
            draft: String::new(),
            open: false,
            expanded: false,
            typing: false,
            user_id: None,
            in_flight: 0,
            reply_tx,
            reply_rx,
        }
    }

    /// Resolve the user id from the auth context or session storage
    pub async fn mount(&mut self, auth: &AuthContext, storage: &dyn SessionStorage) {
        self.user_id = resolve_user_id(auth, storage).await;
        tracing::info!(identified = self.user_id.is_some(), "Chat widget mounted");
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Whether the panel is shown
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the panel is expanded
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the typing indicator is shown
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Current draft
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Conversation so far, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Resolved user id
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Set the user id directly (e.g. after a late sign-in)
    pub fn set_user_id(&mut self, user_id: Option<UserId>) {
        self.user_id = user_id;
    }

    /// Number of sends still waiting for a reply
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Apply a surface event
    ///
    /// Returns `true` if the widget's state changed. Input events are ignored
    /// while the panel is closed.
    pub fn handle_event(&mut self, event: WidgetEvent) -> bool {
        if event.requires_open_panel() && !self.open {
            return false;
        }

        match event {
            WidgetEvent::Open => {
                let changed = !self.open;
                self.open = true;
                changed
            }
            WidgetEvent::Close => {
                let changed = self.open;
                self.open = false;
                changed
            }
            WidgetEvent::ToggleOpen => {
                self.open = !self.open;
                true
            }
            WidgetEvent::ToggleExpanded => {
                self.expanded = !self.expanded;
                true
            }
            WidgetEvent::InsertChar(c) => {
                self.draft.push(c);
                true
            }
            WidgetEvent::Backspace => self.draft.pop().is_some(),
            WidgetEvent::SetDraft(text) => {
                self.draft = text;
                true
            }
            WidgetEvent::Enter { shift: true } => false,
            WidgetEvent::Enter { shift: false } | WidgetEvent::Submit => self.submit(),
        }
    }

    /// Send the current draft
    ///
    /// Blank drafts are ignored and left untouched. Otherwise the user
    /// message is appended, the draft cleared, the typing indicator raised
    /// and the fetch spawned. Must be called from within a tokio runtime.
    ///
    /// Returns `true` if a message was sent.
    pub fn submit(&mut self) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }

        let prompt = std::mem::take(&mut self.draft);
        let id = self.ids.next_id();
        self.transcript.push(ChatMessage::user(id, prompt.clone()));
        self.typing = true;
        self.in_flight += 1;

        let fetcher = self.fetcher.clone();
        let user_id = self.user_id.clone();
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = fetcher.generate_response(&prompt, user_id.as_ref()).await;
            if tx.send(reply).await.is_err() {
                tracing::debug!("Chat widget dropped before the reply arrived; discarding");
            }
        });

        true
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Append every reply that has already arrived
    ///
    /// Returns the number of bot messages appended.
    pub fn poll_replies(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.append_reply(reply);
            appended += 1;
        }
        appended
    }

    /// Wait for the next reply and append it
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn wait_for_reply(&mut self) -> Option<&ChatMessage> {
        if self.in_flight == 0 {
            return None;
        }
        let reply = self.reply_rx.recv().await?;
        self.append_reply(reply);
        self.transcript.last()
    }

    fn append_reply(&mut self, reply: AssistantReply) {
        let id = self.ids.next_id();
        self.transcript
            .push(ChatMessage::bot(id, reply.content, reply.mood));
        self.in_flight = self.in_flight.saturating_sub(1);
        self.typing = false;
    }
}
