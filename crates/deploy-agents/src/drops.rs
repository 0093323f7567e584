//! Drop capture: redirecting an entity's item drops into the agent.
//!
//! While an agent interacts with an entity (shearing a sheep, say), the
//! entity may emit items that would normally land in the world. A
//! [`DropCapture`] session routes those items through a caller-supplied sink
//! instead, typically one that stores into the agent's inventory. Whatever
//! the sink cannot store is buffered, in emission order, until [`end`].
//!
//! Sessions are not reentrant. Each `begin` must be paired with an `end`
//! before the next entity interaction.
//!
//! [`end`]: DropCapture::end

use core::fmt;

use deploy_types::{EntityId, ItemStack};

/// Receiver for items an entity emits during an interaction.
pub trait DropSink {
    /// Offer `stack`, emitted by `source`, to the sink.
    ///
    /// Returns `None` when the sink took responsibility for the stack, or
    /// the stack back when the world should drop it as usual.
    fn emit(&mut self, source: EntityId, stack: ItemStack) -> Option<ItemStack>;
}

/// A sink that never intercepts anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl DropSink for NoCapture {
    fn emit(&mut self, _source: EntityId, stack: ItemStack) -> Option<ItemStack> {
        Some(stack)
    }
}

type Sink<'s> = Box<dyn FnMut(ItemStack) -> ItemStack + 's>;

struct Session<'s> {
    entity: EntityId,
    sink: Sink<'s>,
}

/// An at-most-one-entity drop capture session.
#[derive(Default)]
pub struct DropCapture<'s> {
    session: Option<Session<'s>>,
    remaining: Vec<ItemStack>,
}

impl<'s> DropCapture<'s> {
    /// An inactive capture.
    pub const fn new() -> Self {
        Self {
            session: None,
            remaining: Vec::new(),
        }
    }

    /// Start capturing drops emitted by `entity`.
    ///
    /// `sink` receives each captured stack and returns what it could not
    /// store. Any previous session and its buffer are discarded.
    pub fn begin(&mut self, entity: EntityId, sink: impl FnMut(ItemStack) -> ItemStack + 's) {
        if let Some(previous) = &self.session {
            tracing::debug!(
                previous = %previous.entity,
                next = %entity,
                "drop capture restarted without end"
            );
        }
        self.session = Some(Session {
            entity,
            sink: Box::new(sink),
        });
        self.remaining.clear();
    }

    /// Whether a session is active.
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Stop capturing and return the stacks the sink could not store.
    pub fn end(&mut self) -> Vec<ItemStack> {
        self.session = None;
        core::mem::take(&mut self.remaining)
    }
}

impl DropSink for DropCapture<'_> {
    fn emit(&mut self, source: EntityId, stack: ItemStack) -> Option<ItemStack> {
        match &mut self.session {
            Some(session) if session.entity == source => {
                let rest = (session.sink)(stack);
                if !rest.is_empty() {
                    self.remaining.push(rest);
                }
                None
            }
            _ => Some(stack),
        }
    }
}

impl fmt::Debug for DropCapture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropCapture")
            .field("entity", &self.session.as_ref().map(|s| s.entity))
            .field("remaining", &self.remaining)
            .finish()
    }
}
