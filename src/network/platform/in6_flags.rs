//! Per-address IPv6 flags.
//!
//! BSD-derived kernels report `IN6_IFF_*` flags for each IPv6 address through
//! the `SIOCGIFAFLAG_IN6` ioctl. Linux has no such ioctl; its addresses carry
//! no flags here.

use std::ffi::CStr;

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

/// Reads address flags for the entries of one `getifaddrs` list.
#[derive(Debug)]
pub(super) struct AddressFlagReader {
    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    socket: Option<OwnedFd>,
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
impl AddressFlagReader {
    /// Opens the `AF_INET6` datagram socket the ioctl runs on.
    ///
    /// Without a socket every address reads as flagless.
    pub(super) fn open() -> Self {
        // SAFETY: plain socket(2) call with constant arguments.
        let fd = unsafe { libc::socket(libc::AF_INET6, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            tracing::debug!(
                error = %std::io::Error::last_os_error(),
                "IPv6 address flags unavailable"
            );
            return Self { socket: None };
        }
        // SAFETY: fd was just opened and has no other owner.
        let socket = unsafe { OwnedFd::from_raw_fd(fd) };
        Self {
            socket: Some(socket),
        }
    }

    /// Returns the `IN6_IFF_*` flags of `address` on interface `name`, or 0
    /// when the kernel does not answer.
    pub(super) fn read(&self, name: &CStr, address: &libc::sockaddr_in6) -> u32 {
        let Some(ref socket) = self.socket else {
            return 0;
        };

        let mut request = bsd::In6Ifreq::new(name, address);
        // SAFETY: request is a complete in6_ifreq, the size the request code encodes.
        let rc = unsafe {
            libc::ioctl(socket.as_raw_fd(), bsd::SIOCGIFAFLAG_IN6, &raw mut request)
        };
        if rc < 0 {
            tracing::trace!(
                interface = %name.to_string_lossy(),
                error = %std::io::Error::last_os_error(),
                "SIOCGIFAFLAG_IN6 failed"
            );
            return 0;
        }
        request.flags6()
    }
}

#[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")))]
impl AddressFlagReader {
    pub(super) const fn open() -> Self {
        Self {}
    }

    #[allow(clippy::unused_self)]
    pub(super) const fn read(&self, _name: &CStr, _address: &libc::sockaddr_in6) -> u32 {
        0
    }
}

/// `<netinet6/in6_var.h>` definitions the `libc` crate does not export.
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
mod bsd {
    use std::ffi::CStr;
    use std::mem::size_of;

    /// `struct in6_ifreq`, with only the union members read here named.
    #[repr(C)]
    pub(super) struct In6Ifreq {
        pub(super) name: [libc::c_char; libc::IFNAMSIZ],
        pub(super) ifru: In6IfrIfru,
    }

    #[repr(C)]
    pub(super) union In6IfrIfru {
        pub(super) addr: libc::sockaddr_in6,
        pub(super) flags6: libc::c_int,
        // Largest member: struct icmp6_ifstat, 34 u_quad_t counters.
        _stat: [u64; 34],
    }

    const _: () = assert!(size_of::<In6Ifreq>() == 288);

    /// `_IOWR('i', 73, struct in6_ifreq)`
    pub(super) const SIOCGIFAFLAG_IN6: libc::c_ulong = iowr(b'i', 73, size_of::<In6Ifreq>());

    const IOC_INOUT: libc::c_ulong = 0xc000_0000;
    const IOCPARM_MASK: libc::c_ulong = 0x1fff;

    #[allow(clippy::cast_possible_truncation)]
    const fn iowr(group: u8, number: u8, len: usize) -> libc::c_ulong {
        IOC_INOUT
            | ((len as libc::c_ulong & IOCPARM_MASK) << 16)
            | ((group as libc::c_ulong) << 8)
            | number as libc::c_ulong
    }

    impl In6Ifreq {
        /// A request for `address` on interface `name`. Long names are
        /// truncated to leave room for the NUL.
        pub(super) fn new(name: &CStr, address: &libc::sockaddr_in6) -> Self {
            // SAFETY: all-zero is a valid in6_ifreq.
            let mut request: Self = unsafe { std::mem::zeroed() };
            let bytes = name.to_bytes();
            let len = bytes.len().min(libc::IFNAMSIZ - 1);
            for (slot, byte) in request.name.iter_mut().zip(&bytes[..len]) {
                *slot = libc::c_char::from_ne_bytes([*byte]);
            }
            request.ifru.addr = *address;
            request
        }

        /// The `ifru_flags6` member as an unsigned mask.
        pub(super) fn flags6(&self) -> u32 {
            // SAFETY: every bit pattern is a valid c_int.
            let flags = unsafe { self.ifru.flags6 };
            u32::from_ne_bytes(flags.to_ne_bytes())
        }
    }
}
