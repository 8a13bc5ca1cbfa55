use chrono::{DateTime, Duration, Utc};

/// Cancelable delayed value for debounced input.
///
/// Arming with a new value replaces the pending one and restarts the quiet
/// period; the value only comes out of [`Debouncer::fire`] once the full
/// quiet period has elapsed with no further arm.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, DateTime<Utc>)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Schedule `value`, discarding any previously pending value.
    pub fn arm(&mut self, value: T, now: DateTime<Utc>) {
        self.pending = Some((value, now + self.quiet_period));
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn fire(&mut self, now: DateTime<Utc>) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop the pending value without firing, returning it for inspection.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
