/// Watches an iterative event solver and may steer it.
///
/// The mixed-system search in `seam-events` reports each combination it
/// tries as an event `E`. The observer can log it, record it for a test, or
/// answer with an action `A` such as stopping the search. Returning `None`
/// lets the search go on.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` is the silent
/// observer used by the `*_unobserved` entry points.
pub trait Observer<E, A> {
    /// Called once per reported iteration.
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

/// Never acts.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick(usize);

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    fn drive<Obs: Observer<Tick, Action>>(mut observer: Obs, ticks: usize) -> usize {
        for n in 1..=ticks {
            if observer.observe(&Tick(n)) == Some(Action::Stop) {
                return n;
            }
        }
        ticks
    }

    #[test]
    fn closure_observer_can_stop() {
        let stopped_at = drive(|tick: &Tick| (tick.0 == 3).then_some(Action::Stop), 10);
        assert_eq!(stopped_at, 3);
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 7), 7);
    }
}
