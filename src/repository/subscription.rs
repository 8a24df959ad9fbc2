use crate::domain::ticket::Ticket;

pub type Listener = Box<dyn FnMut(&[Ticket])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners in registration order.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, tickets: &[Ticket]) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(tickets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        let first = calls.clone();
        subscribers.add(Box::new(move |_| first.borrow_mut().push("first")));
        let second = calls.clone();
        subscribers.add(Box::new(move |_| second.borrow_mut().push("second")));

        subscribers.notify(&[]);
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::default();

        let sink = calls.clone();
        let id = subscribers.add(Box::new(move |_| *sink.borrow_mut() += 1));
        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        assert!(subscribers.is_empty());

        subscribers.notify(&[]);
        assert_eq!(*calls.borrow(), 0);
    }
}
