use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;

use crate::utils::error::{Error, Result};

/// Locks `mutex`, recovering the guard if a previous holder panicked.
///
/// Component state is only mutated through methods that keep it consistent
/// before any call that could panic, so a poisoned lock still guards valid
/// state.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spawns `future` on the current Tokio runtime.
///
/// Fails with `Initialization` instead of panicking when called outside a
/// runtime.
pub(crate) fn spawn<F>(what: &str, future: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = Handle::try_current().map_err(|_| {
        Error::Initialization(format!("{what} must be created inside a Tokio runtime"))
    })?;
    handle.spawn(future);
    Ok(())
}
