use std::fmt;

/// Handle returned by a subscription, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Returns `false` once its receiving end is gone.
type Observer = Box<dyn FnMut() -> bool + Send>;

/// Subscriber list owned by the cart store. Observers receive no payload;
/// they re-read the cart after being called.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: impl FnMut() -> bool + Send + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Calls every observer in subscription order and drops the ones that
    /// report themselves gone. Returns how many were dropped.
    pub fn notify_all(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|(_, observer)| observer());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn notifies_in_subscription_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();
        for name in ["header", "floating_bar", "cart_page"] {
            let calls = calls.clone();
            observers.subscribe(move || {
                calls.lock().unwrap().push(name);
                true
            });
        }

        observers.notify_all();
        assert_eq!(*calls.lock().unwrap(), vec!["header", "floating_bar", "cart_page"]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let count = Arc::new(Mutex::new(0));
        let mut observers = Observers::default();
        let counter = count.clone();
        let id = observers.subscribe(move || {
            *counter.lock().unwrap() += 1;
            true
        });

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify_all();
        assert_eq!(*count.lock().unwrap(), 0);
        assert!(observers.is_empty());
    }

    #[test]
    fn gone_observers_are_dropped_after_notify() {
        let mut observers = Observers::default();
        let (notify, changes) = tokio::sync::mpsc::unbounded_channel();
        observers.subscribe(move || notify.send(()).is_ok());
        observers.subscribe(|| true);
        assert_eq!(observers.len(), 2);

        drop(changes);
        assert_eq!(observers.notify_all(), 1);
        assert_eq!(observers.len(), 1);
        assert_eq!(observers.notify_all(), 0);
    }
}
