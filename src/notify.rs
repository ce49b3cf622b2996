//! Change notification registry.
//!
//! Components subscribe reactions to topics while they are constructed.
//! Notifications are queued and drained by the owner of the components, so a
//! reaction that triggers another change never re-enters the notifier.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A class was toggled or its exact count edited.
    Classes,
    Length,
    /// The password cache was cleared.
    Passwords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    UpdateLengthFloor,
    RefreshDisplay,
}

pub type Observer = Box<dyn FnMut(Topic)>;

#[derive(Default)]
pub struct Subscriptions {
    reactions: Vec<(Topic, Reaction)>,
    observers: Vec<Observer>,
    pending: VecDeque<Topic>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic, reaction: Reaction) {
        self.reactions.push((topic, reaction));
    }

    /// Register an outside observer, called after the reactions of every topic.
    pub fn observe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn notify(&mut self, topic: Topic) {
        if !self.pending.contains(&topic) {
            self.pending.push_back(topic);
        }
    }

    /// Next queued topic with its reactions in subscription order.
    pub fn next_pending(&mut self) -> Option<(Topic, Vec<Reaction>)> {
        let topic = self.pending.pop_front()?;
        let reactions = self
            .reactions
            .iter()
            .filter(|(t, _)| *t == topic)
            .map(|(_, r)| *r)
            .collect();
        Some((topic, reactions))
    }

    pub fn emit(&mut self, topic: Topic) {
        for observer in &mut self.observers {
            observer(topic);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("reactions", &self.reactions)
            .field("observers", &self.observers.len())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn reactions_come_back_in_subscription_order() {
        let mut subs = Subscriptions::new();
        subs.subscribe(Topic::Classes, Reaction::UpdateLengthFloor);
        subs.subscribe(Topic::Length, Reaction::RefreshDisplay);
        subs.subscribe(Topic::Classes, Reaction::RefreshDisplay);

        subs.notify(Topic::Classes);
        let (topic, reactions) = subs.next_pending().unwrap();

        assert_eq!(topic, Topic::Classes);
        assert_eq!(
            reactions,
            vec![Reaction::UpdateLengthFloor, Reaction::RefreshDisplay]
        );
        assert!(subs.is_idle());
    }

    #[test]
    fn repeated_notifications_collapse_while_queued() {
        let mut subs = Subscriptions::new();
        subs.notify(Topic::Length);
        subs.notify(Topic::Length);
        subs.notify(Topic::Passwords);

        assert_eq!(subs.next_pending().map(|(t, _)| t), Some(Topic::Length));
        assert_eq!(subs.next_pending().map(|(t, _)| t), Some(Topic::Passwords));
        assert!(subs.next_pending().is_none());
    }

    #[test]
    fn observers_see_emitted_topics() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut subs = Subscriptions::new();
        subs.observe(Box::new(move |t| sink.borrow_mut().push(t)));

        subs.emit(Topic::Classes);
        subs.emit(Topic::Passwords);

        assert_eq!(*seen.borrow(), vec![Topic::Classes, Topic::Passwords]);
    }
}
