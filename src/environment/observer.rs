//! Per-tick observers

use crate::environment::Environment;

/// Notified once at the end of every tick, after factors have run
///
/// Any `FnMut(&Environment)` closure is an observer.
pub trait Observer {
    fn notify(&mut self, environment: &Environment);
}

impl<F> Observer for F
where
    F: FnMut(&Environment),
{
    fn notify(&mut self, environment: &Environment) {
        self(environment)
    }
}
