//! Native enumeration trait, raw records, and error types.

use thiserror::Error;

use crate::address::AddressFamily;

/// Error type for native enumeration operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// A libc call failed.
    #[error("{operation} failed: {source}")]
    Os {
        /// The failing call.
        operation: &'static str,
        /// The `errno` captured right after the call.
        #[source]
        source: std::io::Error,
    },

    /// Permission denied to access network information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

impl FetchError {
    /// Captures `errno` for a failed libc call.
    #[must_use]
    pub fn last_os_error(operation: &'static str) -> Self {
        let source = std::io::Error::last_os_error();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied {
                context: format!("{operation}: {source}"),
            };
        }
        Self::Os { operation, source }
    }
}

/// One address entry as reported by the platform, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAddress {
    /// Address family tag; `None` for families this crate does not model.
    pub family: Option<AddressFamily>,
    /// Network-order address bytes.
    pub bytes: Vec<u8>,
    /// Prefix length, if known.
    pub prefix_length: Option<u8>,
    /// Broadcast address bytes, if any.
    pub broadcast: Option<Vec<u8>>,
    /// Point-to-point peer address bytes, if any.
    pub peer: Option<Vec<u8>>,
    /// Address flags in the `IN6_IFF_*` encoding.
    pub flags: u32,
    /// IPv6 zone index; ignored for IPv4.
    pub scope_id: Option<u32>,
}

impl RawAddress {
    /// Creates an IPv4 entry.
    #[must_use]
    pub fn v4(bytes: [u8; 4], prefix_length: Option<u8>) -> Self {
        Self {
            family: Some(AddressFamily::V4),
            bytes: bytes.to_vec(),
            prefix_length,
            ..Self::default()
        }
    }

    /// Creates an IPv6 entry.
    #[must_use]
    pub fn v6(bytes: [u8; 16], prefix_length: Option<u8>, scope_id: Option<u32>) -> Self {
        Self {
            family: Some(AddressFamily::V6),
            bytes: bytes.to_vec(),
            prefix_length,
            scope_id,
            ..Self::default()
        }
    }
}

/// One interface as reported by the platform, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInterface {
    /// Interface index; 0 when unknown.
    pub index: u32,
    /// Interface name.
    pub name: String,
    /// Adapter GUID text (Windows only).
    pub platform_uuid: Option<String>,
    /// Interface flags in the running platform's encoding.
    pub flags: u32,
    /// MTU, if reported.
    pub mtu: Option<u64>,
    /// Hardware address bytes, if any.
    pub mac: Option<Vec<u8>>,
    /// Address entries in platform order.
    pub addresses: Vec<RawAddress>,
}

impl RawInterface {
    /// Creates an entry with only index and name set.
    #[must_use]
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Native collaborator that enumerates interfaces.
///
/// # Design
///
/// - A `Handle` owns whatever native resource backs one snapshot
/// - [`InterfaceBrowser`](crate::InterfaceBrowser) acquires one handle,
///   fetches from it at most once per population, and releases it exactly once
/// - Mock implementations stand in for the platform in tests
///
/// # Example
///
/// ```
/// use ifbrowse::network::{FetchError, InterfaceFetcher, RawInterface};
///
/// struct Fixed(Vec<RawInterface>);
///
/// impl InterfaceFetcher for Fixed {
///     type Handle = ();
///
///     fn acquire(&self) -> Result<(), FetchError> {
///         Ok(())
///     }
///
///     fn fetch(&self, _handle: &()) -> Result<Vec<RawInterface>, FetchError> {
///         Ok(self.0.clone())
///     }
///
///     fn release(&self, _handle: ()) -> Result<(), FetchError> {
///         Ok(())
///     }
/// }
///
/// let fetcher = Fixed(vec![RawInterface::new(1, "lo")]);
/// let handle = fetcher.acquire().unwrap();
/// assert!(fetcher.lookup_by_name(&handle, "lo").unwrap().is_some());
/// ```
pub trait InterfaceFetcher: Send + Sync {
    /// Native resource backing one snapshot.
    type Handle: Send;

    /// Acquires the native resource.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the platform call fails.
    fn acquire(&self) -> Result<Self::Handle, FetchError>;

    /// Reads every interface from the handle, in platform order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the handle cannot be read.
    fn fetch(&self, handle: &Self::Handle) -> Result<Vec<RawInterface>, FetchError>;

    /// Finds one interface by name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the handle cannot be read.
    fn lookup_by_name(
        &self,
        handle: &Self::Handle,
        name: &str,
    ) -> Result<Option<RawInterface>, FetchError> {
        Ok(self
            .fetch(handle)?
            .into_iter()
            .find(|raw| raw.name == name))
    }

    /// Finds one interface by index.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the handle cannot be read.
    fn lookup_by_index(
        &self,
        handle: &Self::Handle,
        index: u32,
    ) -> Result<Option<RawInterface>, FetchError> {
        Ok(self
            .fetch(handle)?
            .into_iter()
            .find(|raw| raw.index == index))
    }

    /// Releases the native resource. Called exactly once per handle.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the platform reports a failure; callers log
    /// and discard it.
    fn release(&self, handle: Self::Handle) -> Result<(), FetchError>;
}
