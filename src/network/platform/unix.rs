//! Unix interface enumeration using `getifaddrs`.

use std::collections::HashMap;
use std::ffi::CStr;
use std::ptr::{self, NonNull};

use super::in6_flags::AddressFlagReader;
use crate::address::AddressFamily;
use crate::network::{FetchError, InterfaceFetcher, RawAddress, RawInterface};

/// Unix implementation of [`InterfaceFetcher`] using `getifaddrs`.
///
/// `getifaddrs` reports one entry per (interface, address) pair; entries are
/// grouped back into interfaces by name, in the order names first appear.
///
/// # Example
///
/// ```no_run
/// use ifbrowse::network::{InterfaceFetcher, platform::UnixFetcher};
///
/// let fetcher = UnixFetcher::new();
/// let handle = fetcher.acquire().expect("getifaddrs failed");
/// for interface in fetcher.fetch(&handle).expect("read failed") {
///     println!("{} ({})", interface.name, interface.index);
/// }
/// fetcher.release(handle).ok();
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixFetcher {
    _private: (),
}

impl UnixFetcher {
    /// Creates a new Unix interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

/// The list returned by `getifaddrs`, freed with `freeifaddrs` on drop.
#[derive(Debug)]
pub struct IfAddrs {
    head: Option<NonNull<libc::ifaddrs>>,
}

// SAFETY: the list is exclusively owned and never mutated after creation.
unsafe impl Send for IfAddrs {}

impl IfAddrs {
    fn entries(&self) -> impl Iterator<Item = &libc::ifaddrs> + '_ {
        let mut current = self.head.map_or(ptr::null_mut(), NonNull::as_ptr);
        std::iter::from_fn(move || {
            // SAFETY: every node is valid until freeifaddrs, which only runs on drop.
            let entry = unsafe { current.as_ref()? };
            current = entry.ifa_next;
            Some(entry)
        })
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if let Some(head) = self.head.take() {
            // SAFETY: head came from a successful getifaddrs and is freed once.
            unsafe { libc::freeifaddrs(head.as_ptr()) };
        }
    }
}

impl InterfaceFetcher for UnixFetcher {
    type Handle = IfAddrs;

    fn acquire(&self) -> Result<IfAddrs, FetchError> {
        let mut head: *mut libc::ifaddrs = ptr::null_mut();
        // SAFETY: getifaddrs writes a list head (possibly null) on success.
        if unsafe { libc::getifaddrs(&raw mut head) } != 0 {
            return Err(FetchError::last_os_error("getifaddrs"));
        }
        tracing::debug!("Acquired getifaddrs list");
        Ok(IfAddrs {
            head: NonNull::new(head),
        })
    }

    fn fetch(&self, handle: &IfAddrs) -> Result<Vec<RawInterface>, FetchError> {
        let mut interfaces: Vec<RawInterface> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let address_flags = AddressFlagReader::open();

        for entry in handle.entries() {
            if entry.ifa_name.is_null() {
                continue;
            }
            // SAFETY: ifa_name is a NUL-terminated string owned by the list.
            let name_c = unsafe { CStr::from_ptr(entry.ifa_name) };
            let name = name_c.to_string_lossy().into_owned();

            let position = *positions.entry(name.clone()).or_insert_with(|| {
                // SAFETY: name_c is a valid C string.
                let index = unsafe { libc::if_nametoindex(name_c.as_ptr()) };
                interfaces.push(RawInterface {
                    flags: entry.ifa_flags,
                    ..RawInterface::new(index, name)
                });
                interfaces.len() - 1
            });

            absorb_entry(&mut interfaces[position], name_c, entry, &address_flags);
        }

        Ok(interfaces)
    }

    fn release(&self, handle: IfAddrs) -> Result<(), FetchError> {
        drop(handle);
        tracing::debug!("Released getifaddrs list");
        Ok(())
    }
}

/// Folds one `getifaddrs` node into its interface.
fn absorb_entry(
    interface: &mut RawInterface,
    name: &CStr,
    entry: &libc::ifaddrs,
    address_flags: &AddressFlagReader,
) {
    // SAFETY: ifa_addr is null or points to a sockaddr owned by the list.
    let Some(addr) = (unsafe { entry.ifa_addr.as_ref() }) else {
        return;
    };

    // SAFETY: same ownership as ifa_addr.
    if let Some(mac) = unsafe { link_address(addr) } {
        interface.mac.get_or_insert(mac);
        return;
    }

    // SAFETY: same ownership as ifa_addr.
    let Some(mut raw) = (unsafe { ip_address(addr) }) else {
        return;
    };

    if raw.family == Some(AddressFamily::V6) {
        // SAFETY: ip_address only yields V6 for an AF_INET6 sockaddr_in6.
        let sin6 = unsafe { ptr::from_ref(addr).cast::<libc::sockaddr_in6>().read_unaligned() };
        raw.flags = address_flags.read(name, &sin6);
    }

    // SAFETY: ifa_netmask is null or a sockaddr of the address's family.
    raw.prefix_length =
        unsafe { entry.ifa_netmask.as_ref() }.and_then(|mask| unsafe { prefix_length(mask) });

    // SAFETY: the shared slot is null or a sockaddr owned by the list.
    let other = unsafe { broadcast_or_destination(entry).as_ref() }
        .and_then(|sa| unsafe { ip_address(sa) });
    if let Some(other) = other.filter(|o| o.family == raw.family) {
        let flags = entry.ifa_flags;
        if flags & libc::IFF_POINTOPOINT as u32 != 0 {
            raw.peer = Some(other.bytes);
        } else if flags & libc::IFF_BROADCAST as u32 != 0 && raw.family == Some(AddressFamily::V4) {
            raw.broadcast = Some(other.bytes);
        }
    }

    interface.addresses.push(raw);
}

#[cfg(any(target_os = "linux", target_os = "android"))]
const fn broadcast_or_destination(entry: &libc::ifaddrs) -> *mut libc::sockaddr {
    entry.ifa_ifu
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
const fn broadcast_or_destination(entry: &libc::ifaddrs) -> *mut libc::sockaddr {
    entry.ifa_dstaddr
}

/// Decodes an `AF_INET`/`AF_INET6` sockaddr.
///
/// # Safety
///
/// `addr` must be the head of a sockaddr of the size its family implies.
unsafe fn ip_address(addr: &libc::sockaddr) -> Option<RawAddress> {
    let base = ptr::from_ref(addr);
    match i32::from(addr.sa_family) {
        libc::AF_INET => {
            // SAFETY: the family guarantees a sockaddr_in.
            let sin = unsafe { base.cast::<libc::sockaddr_in>().read_unaligned() };
            Some(RawAddress::v4(sin.sin_addr.s_addr.to_ne_bytes(), None))
        }
        libc::AF_INET6 => {
            // SAFETY: the family guarantees a sockaddr_in6.
            let sin6 = unsafe { base.cast::<libc::sockaddr_in6>().read_unaligned() };
            Some(RawAddress::v6(sin6.sin6_addr.s6_addr, None, Some(sin6.sin6_scope_id)))
        }
        _ => None,
    }
}

/// Counts the set bits of a netmask sockaddr.
///
/// # Safety
///
/// Same contract as [`ip_address`].
unsafe fn prefix_length(mask: &libc::sockaddr) -> Option<u8> {
    // Netmasks with a zeroed family (seen on some BSDs) yield no prefix
    let raw = unsafe { ip_address(mask) }?;
    let bits: u32 = raw.bytes.iter().map(|b| b.count_ones()).sum();
    u8::try_from(bits).ok()
}

/// Extracts an Ethernet hardware address from an `AF_PACKET` sockaddr.
///
/// # Safety
///
/// `addr` must be the head of a complete sockaddr.
#[cfg(any(target_os = "linux", target_os = "android"))]
unsafe fn link_address(addr: &libc::sockaddr) -> Option<Vec<u8>> {
    if i32::from(addr.sa_family) != libc::AF_PACKET {
        return None;
    }
    // SAFETY: AF_PACKET entries carry a sockaddr_ll.
    let sll = unsafe { ptr::from_ref(addr).cast::<libc::sockaddr_ll>().read_unaligned() };
    if sll.sll_hatype != libc::ARPHRD_ETHER {
        return None;
    }
    let len = usize::from(sll.sll_halen).min(sll.sll_addr.len());
    Some(sll.sll_addr[..len].to_vec())
}

/// Extracts a hardware address from an `AF_LINK` sockaddr.
///
/// # Safety
///
/// `addr` must be the head of a complete `sockaddr_dl`, whose data may extend
/// past the declared `sdl_data` array.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
unsafe fn link_address(addr: &libc::sockaddr) -> Option<Vec<u8>> {
    if i32::from(addr.sa_family) != libc::AF_LINK {
        return None;
    }
    let dl = ptr::from_ref(addr).cast::<libc::sockaddr_dl>();
    // SAFETY: AF_LINK entries carry a sockaddr_dl.
    let (name_len, addr_len) = unsafe {
        (
            usize::from((*dl).sdl_nlen),
            usize::from((*dl).sdl_alen),
        )
    };
    if addr_len == 0 {
        return None;
    }
    // SAFETY: the link-layer address follows the name inside sdl_data.
    let bytes = unsafe {
        let data = ptr::addr_of!((*dl).sdl_data).cast::<u8>().add(name_len);
        std::slice::from_raw_parts(data, addr_len)
    };
    Some(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sockaddr_in(octets: [u8; 4]) -> libc::sockaddr_in {
        // SAFETY: all-zero is a valid sockaddr_in.
        let mut sin: libc::sockaddr_in = unsafe { std::mem::zeroed() };
        sin.sin_family = libc::AF_INET as libc::sa_family_t;
        sin.sin_addr.s_addr = u32::from_ne_bytes(octets);
        sin
    }

    fn sockaddr_in6(octets: [u8; 16], scope_id: u32) -> libc::sockaddr_in6 {
        // SAFETY: all-zero is a valid sockaddr_in6.
        let mut sin6: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
        sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
        sin6.sin6_addr.s6_addr = octets;
        sin6.sin6_scope_id = scope_id;
        sin6
    }

    fn as_sockaddr<T>(value: &T) -> &libc::sockaddr {
        // SAFETY: every sockaddr_* type starts with the generic header.
        unsafe { &*ptr::from_ref(value).cast::<libc::sockaddr>() }
    }

    #[test]
    fn decodes_ipv4_sockaddr() {
        let sin = sockaddr_in([192, 168, 0, 42]);
        let raw = unsafe { ip_address(as_sockaddr(&sin)) }.unwrap();
        assert_eq!(raw.family, Some(AddressFamily::V4));
        assert_eq!(raw.bytes, vec![192, 168, 0, 42]);
    }

    #[test]
    fn decodes_ipv6_sockaddr_with_scope() {
        let octets = std::net::Ipv6Addr::LOCALHOST.octets();
        let sin6 = sockaddr_in6(octets, 7);
        let raw = unsafe { ip_address(as_sockaddr(&sin6)) }.unwrap();
        assert_eq!(raw.family, Some(AddressFamily::V6));
        assert_eq!(raw.bytes, octets.to_vec());
        assert_eq!(raw.scope_id, Some(7));
    }

    #[test]
    fn counts_netmask_bits() {
        let v4 = sockaddr_in([255, 255, 255, 0]);
        assert_eq!(unsafe { prefix_length(as_sockaddr(&v4)) }, Some(24));

        let mut mask = [0u8; 16];
        mask[..8].fill(0xff);
        let v6 = sockaddr_in6(mask, 0);
        assert_eq!(unsafe { prefix_length(as_sockaddr(&v6)) }, Some(64));
    }

    #[test]
    fn ignores_other_families() {
        // SAFETY: all-zero is a valid sockaddr_in.
        let mut unknown: libc::sockaddr_in = unsafe { std::mem::zeroed() };
        unknown.sin_family = libc::AF_UNIX as libc::sa_family_t;
        assert!(unsafe { ip_address(as_sockaddr(&unknown)) }.is_none());
    }

    // Integration test: enumerates the interfaces of this machine
    #[test]
    fn fetch_returns_loopback() {
        let fetcher = UnixFetcher::new();
        let handle = fetcher.acquire().expect("acquire() failed");
        let interfaces = fetcher.fetch(&handle).expect("fetch() failed");

        let loopback = interfaces
            .iter()
            .find(|i| i.flags & libc::IFF_LOOPBACK as u32 != 0)
            .expect("no loopback interface");
        assert!(loopback.index > 0);
        assert!(!loopback.name.is_empty());

        fetcher.release(handle).unwrap();
    }

    #[test]
    fn fetch_groups_each_name_once() {
        let fetcher = UnixFetcher::new();
        let handle = fetcher.acquire().expect("acquire() failed");
        let interfaces = fetcher.fetch(&handle).expect("fetch() failed");

        let mut names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn fetch_is_repeatable_on_one_handle() {
        let fetcher = UnixFetcher::new();
        let handle = fetcher.acquire().expect("acquire() failed");
        let first = fetcher.fetch(&handle).unwrap();
        let second = fetcher.fetch(&handle).unwrap();
        assert_eq!(first, second);
    }
}
