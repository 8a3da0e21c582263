//! Tick broadcast
//!
//! Publish/subscribe for [`TickFrame`]s. Every publish hands listeners the
//! same immutable record; nothing is shared between ticks.
//!
//! Two ways to listen:
//! - [`TickBus::add_listener`] - boxed callback run synchronously inside the tick
//! - [`TickBus::subscribe`] - channel receiver, drained whenever the consumer likes

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::frame::TickFrame;

/// Synchronous tick callback.
pub trait TickListener {
    fn on_tick(&mut self, frame: &TickFrame);
}

impl<F> TickListener for F
where
    F: FnMut(&TickFrame),
{
    fn on_tick(&mut self, frame: &TickFrame) {
        self(frame)
    }
}

#[derive(Default)]
pub struct TickBus {
    listeners: Vec<Box<dyn TickListener>>,
    subscribers: Vec<Sender<TickFrame>>,
}

impl std::fmt::Debug for TickBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickBus")
            .field("listeners", &self.listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TickBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every publish, in registration order.
    pub fn add_listener(&mut self, listener: impl TickListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Open a channel that receives a copy of every frame published from
    /// now on. Dropping the receiver unsubscribes.
    ///
    /// The channel is unbounded: a receiver that is never drained keeps
    /// every frame published since it subscribed. Drain it once per tick.
    pub fn subscribe(&mut self) -> Receiver<TickFrame> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `frame` to every listener and live subscriber.
    /// Returns the number of recipients.
    pub fn publish(&mut self, frame: &TickFrame) -> usize {
        for listener in &mut self.listeners {
            listener.on_tick(frame);
        }
        self.subscribers.retain(|tx| tx.send(*frame).is_ok());
        self.listeners.len() + self.subscribers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
