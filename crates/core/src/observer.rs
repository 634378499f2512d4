/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers monitor or steer a solver without changing its API,
/// enabling logging, early stopping, or custom control policies.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_observer_returns_action() {
        let mut seen = Vec::new();
        let mut observer = |event: &u32| {
            seen.push(*event);
            (*event > 1).then_some("stop")
        };

        assert_eq!(observer.observe(&1), None);
        assert_eq!(observer.observe(&2), Some("stop"));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn unit_observer_never_acts() {
        let mut observer = ();
        let action: Option<()> = observer.observe(&"event");
        assert!(action.is_none());
    }
}
