// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Synchronous publish/subscribe primitive.
//!
//! Every input controller in this application owns an [`EventBus`] and emits
//! its normalized events through it. Dispatch is synchronous and handlers for
//! a given event name run in registration order; there is no ordering
//! guarantee across different event names.
//!
//! A bus may be constructed with a fixed vocabulary of event names. In that
//! case subscribing to or triggering a name outside the vocabulary fails with
//! [`UnknownEventError`]: that is a programming mistake on the caller's
//! side, not a runtime condition, and is surfaced loudly rather than ignored.

use thiserror::Error;

/// Raised when an event name outside a bus's fixed vocabulary is used.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown event name: {0}")]
pub(crate) struct UnknownEventError(pub(crate) &'static str);

/// Token identifying one subscription, handed back by [`EventBus::on`].
///
/// Closures have no identity to match on, so removal goes through this token
/// instead of a callback reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SubscriberId(u64);

struct Subscription<P> {
    event: &'static str,
    id: SubscriberId,
    handler: Box<dyn FnMut(&P)>,
}

/// An ordered registry of event subscriptions for one emitter.
pub(crate) struct EventBus<P> {
    vocabulary: Option<Vec<&'static str>>,
    subscriptions: Vec<Subscription<P>>,
    next_id: u64,
}

impl<P> EventBus<P> {
    /// Creates a bus that accepts any event name.
    pub(crate) fn new() -> Self {
        Self {
            vocabulary: None,
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Creates a bus restricted to a fixed set of event names.
    pub(crate) fn with_vocabulary(names: &[&'static str]) -> Self {
        Self {
            vocabulary: Some(names.to_vec()),
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    fn check_name(&self, event: &'static str) -> Result<(), UnknownEventError> {
        match &self.vocabulary {
            Some(names) if !names.contains(&event) => Err(UnknownEventError(event)),
            _ => Ok(()),
        }
    }

    /// Registers a handler for `event`.
    ///
    /// Handlers for the same event name are invoked in the order they were
    /// registered.
    ///
    /// # Errors
    ///
    /// Fails if the bus has a fixed vocabulary and `event` is not in it.
    pub(crate) fn on(
        &mut self,
        event: &'static str,
        handler: Box<dyn FnMut(&P)>,
    ) -> Result<SubscriberId, UnknownEventError> {
        self.check_name(event)?;

        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        self.subscriptions.push(Subscription { event, id, handler });

        Ok(id)
    }

    /// Invokes every handler registered for `event`, synchronously and in
    /// registration order.
    ///
    /// # Errors
    ///
    /// Fails if the bus has a fixed vocabulary and `event` is not in it.
    pub(crate) fn trigger(
        &mut self,
        event: &'static str,
        payload: &P,
    ) -> Result<(), UnknownEventError> {
        self.check_name(event)?;

        for subscription in &mut self.subscriptions {
            if subscription.event == event {
                (subscription.handler)(payload);
            }
        }

        Ok(())
    }

    /// Removes matching subscriptions.
    ///
    /// An axis passed as `None` matches every value, so `off(None, None)`
    /// removes every subscription on the bus.
    pub(crate) fn off(&mut self, event: Option<&'static str>, id: Option<SubscriberId>) {
        self.subscriptions.retain(|subscription| {
            let event_matches = event.is_none_or(|name| subscription.event == name);
            let id_matches = id.is_none_or(|id| subscription.id == id);
            !(event_matches && id_matches)
        });
    }

    #[cfg(test)]
    pub(crate) fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_handler(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> Box<dyn FnMut(&u32)> {
        let log = Rc::clone(log);
        let tag = tag.to_string();
        Box::new(move |payload| log.borrow_mut().push(format!("{tag}:{payload}")))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        bus.on("change", recording_handler(&log, "a")).unwrap();
        bus.on("change", recording_handler(&log, "b")).unwrap();
        bus.on("change", recording_handler(&log, "c")).unwrap();

        bus.trigger("change", &7).unwrap();

        assert_eq!(*log.borrow(), vec!["a:7", "b:7", "c:7"]);
    }

    #[test]
    fn trigger_only_reaches_matching_event_name() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        bus.on("open", recording_handler(&log, "open")).unwrap();
        bus.on("close", recording_handler(&log, "close")).unwrap();

        bus.trigger("close", &1).unwrap();

        assert_eq!(*log.borrow(), vec!["close:1"]);
    }

    #[test]
    fn fixed_vocabulary_rejects_unknown_names() {
        let mut bus: EventBus<u32> = EventBus::with_vocabulary(&["press", "release"]);

        assert_eq!(
            bus.on("repeat", Box::new(|_| {})).unwrap_err(),
            UnknownEventError("repeat")
        );
        assert_eq!(
            bus.trigger("repeat", &0).unwrap_err(),
            UnknownEventError("repeat")
        );

        // Names inside the vocabulary are fine.
        bus.on("press", Box::new(|_| {})).unwrap();
        bus.trigger("press", &0).unwrap();
    }

    #[test]
    fn off_removes_by_id_by_name_or_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let a = bus.on("change", recording_handler(&log, "a")).unwrap();
        bus.on("change", recording_handler(&log, "b")).unwrap();
        bus.on("other", recording_handler(&log, "o")).unwrap();

        bus.off(Some("change"), Some(a));
        bus.trigger("change", &1).unwrap();
        assert_eq!(*log.borrow(), vec!["b:1"]);

        bus.off(Some("change"), None);
        assert_eq!(bus.subscription_count(), 1);

        bus.off(None, None);
        assert_eq!(bus.subscription_count(), 0);
    }

    #[test]
    fn off_with_id_only_matches_across_event_names() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let id = bus.on("open", recording_handler(&log, "open")).unwrap();
        bus.on("close", recording_handler(&log, "close")).unwrap();

        bus.off(None, Some(id));

        bus.trigger("open", &1).unwrap();
        bus.trigger("close", &2).unwrap();
        assert_eq!(*log.borrow(), vec!["close:2"]);
    }
}
