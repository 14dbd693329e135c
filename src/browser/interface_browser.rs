//! The lazily populated, closeable interface browser.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::BrowserError;
use super::snapshot::{Snapshot, SnapshotBuilder};
use crate::error::IllegalStateError;
use crate::network::platform::PlatformFetcher;
use crate::network::{InterfaceFetcher, InterfaceRecord, convert_interfaces};

struct State<H> {
    handle: Option<H>,
    cache: Option<Snapshot>,
}

/// Browses the network interfaces of the running machine.
///
/// The native resource is acquired on construction. The interface list is
/// read on first access and cached for the lifetime of the browser; it is
/// never refreshed. Closing releases the native resource exactly once, after
/// which every read fails with [`BrowserError::IllegalState`].
///
/// All methods take `&self` and may be called from several threads. The
/// first access populates the cache under a lock, so concurrent callers
/// observe one population.
///
/// # Example
///
/// ```no_run
/// use ifbrowse::InterfaceBrowser;
///
/// let browser = InterfaceBrowser::new()?;
/// if let Some(lo) = browser.get_by_name("lo")? {
///     println!("{lo}");
/// }
/// browser.close();
/// # Ok::<(), ifbrowse::BrowserError>(())
/// ```
pub struct InterfaceBrowser<F: InterfaceFetcher = PlatformFetcher> {
    fetcher: F,
    state: Mutex<State<F::Handle>>,
}

impl InterfaceBrowser<PlatformFetcher> {
    /// Creates a browser over the platform's interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::NativeOperationFailed`] if the native resource
    /// cannot be acquired.
    pub fn new() -> Result<Self, BrowserError> {
        Self::with_fetcher(PlatformFetcher::new())
    }
}

impl<F: InterfaceFetcher> InterfaceBrowser<F> {
    /// Creates a browser over a custom fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::NativeOperationFailed`] if `fetcher` fails to
    /// acquire its handle.
    pub fn with_fetcher(fetcher: F) -> Result<Self, BrowserError> {
        let handle = fetcher
            .acquire()
            .map_err(BrowserError::NativeOperationFailed)?;
        debug!("Acquired native interface handle");

        Ok(Self {
            fetcher,
            state: Mutex::new(State {
                handle: Some(handle),
                cache: None,
            }),
        })
    }

    /// Finds an interface by name.
    ///
    /// On Windows the adapter GUID, with or without braces, also matches.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::IllegalState`] if the browser is closed
    /// - [`BrowserError::NativeOperationFailed`] if population fails
    pub fn get_by_name(&self, name: &str) -> Result<Option<Arc<InterfaceRecord>>, BrowserError> {
        Ok(self.snapshot()?.get_by_name(name).cloned())
    }

    /// Finds an interface by index.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::IllegalState`] if the browser is closed
    /// - [`BrowserError::NativeOperationFailed`] if population fails
    pub fn get_by_index(&self, index: u32) -> Result<Option<Arc<InterfaceRecord>>, BrowserError> {
        Ok(self.snapshot()?.get_by_index(index).cloned())
    }

    /// Returns every interface in platform order.
    ///
    /// Repeated calls share one cached [`Snapshot`].
    ///
    /// # Errors
    ///
    /// - [`BrowserError::IllegalState`] if the browser is closed
    /// - [`BrowserError::NativeOperationFailed`] if population fails
    pub fn list(&self) -> Result<Snapshot, BrowserError> {
        self.snapshot()
    }

    /// Returns the number of interfaces.
    ///
    /// # Errors
    ///
    /// Same as [`InterfaceBrowser::list`].
    pub fn len(&self) -> Result<usize, BrowserError> {
        Ok(self.snapshot()?.len())
    }

    /// Returns true if the machine reports no interfaces.
    ///
    /// # Errors
    ///
    /// Same as [`InterfaceBrowser::list`].
    pub fn is_empty(&self) -> Result<bool, BrowserError> {
        Ok(self.snapshot()?.is_empty())
    }

    fn snapshot(&self) -> Result<Snapshot, BrowserError> {
        let mut state = self.lock();
        let State { handle, cache } = &mut *state;
        let handle = handle.as_ref().ok_or_else(IllegalStateError::closed)?;

        let snapshot = match cache.take() {
            Some(snapshot) => snapshot,
            None => self.populate(handle)?,
        };
        Ok(cache.insert(snapshot).clone())
    }

    /// Visits interfaces in platform order until `visitor` returns `false`.
    ///
    /// Returns `true` if every interface was visited. An unpopulated browser
    /// is filled first, with one native read; stopping early still leaves a
    /// complete cache behind. The lock is released before the first visit,
    /// so `visitor` may call back into this browser.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::IllegalState`] if the browser is closed
    /// - [`BrowserError::NativeOperationFailed`] if population fails
    pub fn for_each<V>(&self, visitor: V) -> Result<bool, BrowserError>
    where
        V: FnMut(&InterfaceRecord) -> bool,
    {
        let snapshot = self.snapshot()?;
        Ok(snapshot.iter().all(visitor))
    }

    /// Releases the native resource and drops the cache.
    ///
    /// Idempotent: only the first call releases. A release failure is logged
    /// and the browser still counts as closed.
    pub fn close(&self) {
        let mut state = self.lock();
        state.cache = None;
        if let Some(handle) = state.handle.take() {
            self.release(handle);
        }
    }

    /// Returns true once [`InterfaceBrowser::close`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().handle.is_none()
    }

    /// Returns true if the interface list has been read.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.lock().cache.is_some()
    }

    /// Returns the underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn lock(&self) -> MutexGuard<'_, State<F::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads and converts every interface.
    fn populate(&self, handle: &F::Handle) -> Result<Snapshot, BrowserError> {
        let raw = self
            .fetcher
            .fetch(handle)
            .map_err(BrowserError::NativeOperationFailed)?;

        let mut builder = SnapshotBuilder::with_capacity(raw.len());
        for record in convert_interfaces(raw) {
            builder.push(Arc::new(record));
        }

        debug!(interfaces = builder.len(), "Populated interface snapshot");
        Ok(builder.build())
    }

    fn release(&self, handle: F::Handle) {
        match self.fetcher.release(handle) {
            Ok(()) => debug!("Released native interface handle"),
            Err(e) => warn!(error = %e, "Failed to release native interface handle"),
        }
    }
}

impl<F: InterfaceFetcher> Drop for InterfaceBrowser<F> {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state.cache = None;
        let handle = state.handle.take();
        if let Some(handle) = handle {
            self.release(handle);
        }
    }
}

impl<F: InterfaceFetcher> fmt::Display for InterfaceBrowser<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        match (&state.handle, &state.cache) {
            (None, _) => f.write_str("InterfaceBrowser: closed"),
            (Some(_), None) => f.write_str("InterfaceBrowser: pending population"),
            (Some(_), Some(snapshot)) => {
                write!(f, "InterfaceBrowser: contains info on {} interfaces", snapshot.len())
            }
        }
    }
}

impl<F: InterfaceFetcher> fmt::Debug for InterfaceBrowser<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("InterfaceBrowser")
            .field("closed", &state.handle.is_none())
            .field("cached", &state.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
