//! Event types and the single event queue of the console.
//!
//! Three producers feed one unbounded channel: terminal input, the ticker and
//! the command dispatcher. The loop consumes it in arrival order.

use crate::tui::command::Operation;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use cursor_agents::{Agent, Conversation, FollowupAck};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Everything the transition function reacts to.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to (width, height).
    Resize(u16, u16),
    /// Periodic tick carrying the time it fired.
    Tick(Instant),
    /// Result of remote work, or an internal selection.
    Message(AppMessage),
}

/// Results fed back into the loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A list call succeeded.
    AgentsFetched(Vec<Agent>),
    /// A single-agent fetch succeeded.
    AgentFetched(Agent),
    /// A conversation fetch succeeded.
    ConversationFetched {
        /// Agent the conversation belongs to.
        agent_id: String,
        /// The transcript.
        conversation: Conversation,
    },
    /// A follow-up was accepted.
    FollowupSent {
        /// Agent the follow-up was sent to.
        agent_id: String,
        /// Acknowledgement from the service.
        ack: FollowupAck,
    },
    /// Any remote or validation failure.
    OperationFailed {
        /// Operation that failed.
        origin: Operation,
        /// Display text.
        message: String,
    },
    /// The dashboard picked an agent.
    AgentSelected(String),
}

/// Sending half of the event queue.
pub type EventSender = mpsc::UnboundedSender<Event>;

/// Owns the event queue and the producer tasks feeding it.
///
/// Producer tasks are aborted when the handler is dropped.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
    tx: EventSender,
    rx: mpsc::UnboundedReceiver<Event>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventHandler {
    /// Creates the queue and starts the ticker. Must be called within a runtime.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = spawn_ticker(tx.clone(), tick_rate);
        Self {
            tick_rate,
            tx,
            rx,
            tasks: vec![ticker],
        }
    }

    /// Starts forwarding terminal input into the queue.
    pub fn listen_terminal(&mut self) {
        let input = spawn_input_task(self.tx.clone());
        self.tasks.push(input);
    }

    /// Ticker period.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// A handle other producers (the dispatcher) use to enqueue events.
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    /// Waits for the next event. `None` only if every sender is gone.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Returns an already-queued event without waiting.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Emits `Event::Tick` every `period` until the queue closes.
///
/// Late ticks are not caught up; each tick carries the time it actually fired.
fn spawn_ticker(tx: EventSender, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.send(Event::Tick(Instant::now())).is_err() {
                break;
            }
        }
    })
}

/// Forwards key presses and resizes from the terminal.
fn spawn_input_task(tx: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(next) = reader.next().await {
            let event = match next {
                Ok(event) => match translate(event) {
                    Some(event) => event,
                    None => continue,
                },
                Err(e) => {
                    tracing::warn!("terminal input failed: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}

/// Maps a crossterm event to a console event, dropping the ones we ignore.
///
/// Key releases and repeats are dropped so each press is handled once on
/// terminals that report them.
pub(crate) fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        // Focus, mouse and paste events
        _ => None,
    }
}
