//! Windows interface enumeration using `GetAdaptersAddresses`.

use crate::flags::{ADDRESS_FLAGS, AddressFlag, INTERFACE_FLAGS, InterfaceFlag};
use crate::network::{FetchError, InterfaceFetcher, RawAddress, RawInterface};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH, IP_ADAPTER_ANYCAST_ADDRESS_XP,
    IP_ADAPTER_UNICAST_ADDRESS_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, IpDadStateDeprecated, IpDadStateDuplicate, IpDadStateTentative,
    IpPrefixOriginDhcp, IpSuffixOriginRandom, SOCKADDR_IN, SOCKADDR_IN6, SOCKET_ADDRESS,
};

/// Interface type for PPP (Point-to-Point Protocol) adapters.
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_PPP: u32 = 23;

/// Interface type for tunnel adapters (VPN, etc.).
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_TUNNEL: u32 = 131;

/// `IP_ADAPTER_NO_MULTICAST` bit of the adapter `Flags` field (`iptypes.h`).
const IP_ADAPTER_NO_MULTICAST: u32 = 0x0010;

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Storage unit of the adapter buffer. `u64` alignment covers every
/// structure the API writes into it.
type Word = u64;

/// Windows implementation of [`InterfaceFetcher`] using `GetAdaptersAddresses`.
///
/// The handle is the buffer the API fills in; every adapter and address
/// pointer read during a fetch points into it.
///
/// # Example
///
/// ```no_run
/// use ifbrowse::network::{InterfaceFetcher, platform::WindowsFetcher};
///
/// let fetcher = WindowsFetcher::new();
/// let handle = fetcher.acquire().expect("Failed to enumerate adapters");
/// for adapter in fetcher.fetch(&handle).expect("Failed to read adapters") {
///     println!("{} ({})", adapter.name, adapter.index);
/// }
/// fetcher.release(handle).ok();
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsFetcher {
    _private: (),
}

impl WindowsFetcher {
    /// Creates a new Windows adapter fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

/// The filled `GetAdaptersAddresses` buffer.
#[derive(Debug)]
pub struct AdapterBuffer {
    buffer: Vec<Word>,
}

impl InterfaceFetcher for WindowsFetcher {
    type Handle = AdapterBuffer;

    fn acquire(&self) -> Result<AdapterBuffer, FetchError> {
        let buffer = get_adapter_addresses()?;
        tracing::debug!(bytes = size_of_val(buffer.as_slice()), "Acquired adapter buffer");
        Ok(AdapterBuffer { buffer })
    }

    fn fetch(&self, handle: &AdapterBuffer) -> Result<Vec<RawInterface>, FetchError> {
        Ok(parse_adapters(&handle.buffer))
    }

    fn release(&self, handle: AdapterBuffer) -> Result<(), FetchError> {
        drop(handle);
        Ok(())
    }
}

/// Walks the adapter list stored in `buffer`.
fn parse_adapters(buffer: &[Word]) -> Vec<RawInterface> {
    let mut adapters = Vec::new();
    if buffer.is_empty() {
        return adapters;
    }

    // SAFETY: the buffer is a Vec<Word>, and Word is at least as aligned as
    // IP_ADAPTER_ADDRESSES_LH. The first adapter starts at offset 0.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: We iterate through a linked list returned by GetAdaptersAddresses.
    // The list is valid as long as the buffer is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(raw) = parse_adapter(adapter) {
            adapters.push(raw);
        }

        current = adapter.Next;
    }

    adapters
}

/// Calls `GetAdaptersAddresses` and returns the raw buffer containing adapter data.
///
/// This function handles the two-call pattern:
/// 1. First call with estimated buffer size
/// 2. Retry with exact size if buffer was too small
fn get_adapter_addresses() -> Result<Vec<Word>, FetchError> {
    // Anycast addresses are kept; they become `anycast` address records
    let flags = GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<Word> = vec![0; words_for(INITIAL_BUFFER_SIZE)];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Number of words holding at least `bytes` bytes.
const fn words_for(bytes: u32) -> usize {
    (bytes as usize).div_ceil(size_of::<Word>())
}

/// Handles the result of `GetAdaptersAddresses`, potentially retrying with a larger buffer.
///
/// # Coverage Note
///
/// This function is excluded from coverage because:
/// - Buffer overflow case requires a system with network adapter data exceeding 16KB
/// - Error paths require actual Windows API failures which cannot be mocked
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<Word>,
    size: &mut u32,
    flags: windows::Win32::NetworkManagement::IpHelper::GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), FetchError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR};

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(words_for(*size), 0);

        // SAFETY: Same as above, but with correctly sized buffer
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        };

        if result != NO_ERROR.0 {
            return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
        }
    } else if result == ERROR_NO_DATA.0 {
        // No adapters at all
        buffer.clear();
    } else if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

/// Parses a single `IP_ADAPTER_ADDRESSES_LH` structure into a [`RawInterface`].
///
/// Returns `None` if the adapter name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<RawInterface> {
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };
    // SAFETY: AdapterName is a NUL-terminated ANSI string owned by the buffer.
    let guid = unsafe { adapter.AdapterName.to_string().ok() };
    // SAFETY: both union views start with the same Length/IfIndex pair.
    let index = unsafe { adapter.Anonymous1.Anonymous.IfIndex };
    // SAFETY: Flags is the plain u32 view of the bitfield union.
    let adapter_flags = unsafe { adapter.Anonymous2.Flags };

    let flags = synthesize_flags(
        adapter.IfType,
        adapter.OperStatus == IfOperStatusUp,
        adapter_flags & IP_ADAPTER_NO_MULTICAST == 0,
    );

    let mac_len = (adapter.PhysicalAddressLength as usize).min(adapter.PhysicalAddress.len());
    let mac = (mac_len > 0).then(|| adapter.PhysicalAddress[..mac_len].to_vec());

    let mut addresses = collect_unicast(adapter.FirstUnicastAddress, flags);
    addresses.extend(collect_anycast(adapter.FirstAnycastAddress));

    Some(RawInterface {
        index: if index == 0 { adapter.Ipv6IfIndex } else { index },
        name,
        platform_uuid: guid,
        flags,
        mtu: (adapter.Mtu != u32::MAX).then_some(u64::from(adapter.Mtu)),
        mac,
        addresses,
    })
}

/// Builds an interface flag mask from adapter properties.
fn synthesize_flags(if_type: u32, oper_up: bool, multicast: bool) -> u32 {
    let mut flags = 0;
    if oper_up {
        flags |= INTERFACE_FLAGS.mask_of(InterfaceFlag::Up)
            | INTERFACE_FLAGS.mask_of(InterfaceFlag::Running);
    }
    if multicast {
        flags |= INTERFACE_FLAGS.mask_of(InterfaceFlag::Multicast);
    }
    flags |= match if_type {
        IF_TYPE_SOFTWARE_LOOPBACK => INTERFACE_FLAGS.mask_of(InterfaceFlag::Loopback),
        IF_TYPE_PPP | IF_TYPE_TUNNEL => INTERFACE_FLAGS.mask_of(InterfaceFlag::PointToPoint),
        _ => INTERFACE_FLAGS.mask_of(InterfaceFlag::Broadcast),
    };
    flags
}

/// Computes the directed broadcast address of an IPv4 network.
fn ipv4_broadcast(octets: [u8; 4], prefix_length: u8) -> Option<[u8; 4]> {
    if prefix_length >= 31 {
        return None;
    }
    let host_mask = u32::MAX >> prefix_length;
    Some((u32::from_be_bytes(octets) | host_mask).to_be_bytes())
}

/// Decodes a `SOCKET_ADDRESS` into a raw address entry without prefix.
///
/// # Safety Note
///
/// The pointer casts to `SOCKADDR_IN` and `SOCKADDR_IN6` are allowed despite alignment
/// concerns because Windows guarantees proper alignment of these structures when returned
/// from the networking APIs.
#[allow(clippy::cast_ptr_alignment)]
fn decode_socket_address(address: &SOCKET_ADDRESS) -> Option<RawAddress> {
    // SAFETY: The pointer is either null or points to a SOCKADDR inside the buffer.
    let sockaddr = unsafe { address.lpSockaddr.as_ref()? };

    match sockaddr.sa_family {
        f if f == AF_INET => {
            // SAFETY: We verified the family is AF_INET, so this is a valid cast.
            let sockaddr_in = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
            // SAFETY: sin_addr contains the IPv4 address bytes in network order.
            let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
            Some(RawAddress::v4(
                [octets.s_b1, octets.s_b2, octets.s_b3, octets.s_b4],
                None,
            ))
        }
        f if f == AF_INET6 => {
            // SAFETY: We verified the family is AF_INET6, so this is a valid cast.
            let sockaddr_in6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
            // SAFETY: We verified this is an IPv6 address, so the union fields are valid.
            let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
            let scope_id = unsafe { sockaddr_in6.Anonymous.sin6_scope_id };
            Some(RawAddress::v6(octets, None, Some(scope_id)))
        }
        _ => None,
    }
}

fn collect_unicast(
    mut unicast: *mut IP_ADAPTER_UNICAST_ADDRESS_LH,
    if_flags: u32,
) -> Vec<RawAddress> {
    let broadcast_capable = INTERFACE_FLAGS.is_enabled(if_flags, InterfaceFlag::Broadcast);
    let mut addresses = Vec::new();

    // SAFETY: We iterate through a linked list of unicast addresses.
    // Each address is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        if let Some(mut raw) = decode_socket_address(&entry.Address) {
            let prefix_length = entry.OnLinkPrefixLength;
            raw.prefix_length = Some(prefix_length);
            raw.flags = unicast_flags(entry);

            if broadcast_capable {
                if let Ok(octets) = <[u8; 4]>::try_from(raw.bytes.as_slice()) {
                    raw.broadcast = ipv4_broadcast(octets, prefix_length).map(|b| b.to_vec());
                }
            }
            addresses.push(raw);
        }

        unicast = entry.Next;
    }

    addresses
}

/// Maps origin and DAD state onto the `IN6_IFF_*` vocabulary.
fn unicast_flags(entry: &IP_ADAPTER_UNICAST_ADDRESS_LH) -> u32 {
    let mut flags = 0;
    if entry.SuffixOrigin == IpSuffixOriginRandom {
        flags |= ADDRESS_FLAGS.mask_of(AddressFlag::Temporary);
    }
    if entry.PrefixOrigin == IpPrefixOriginDhcp {
        flags |= ADDRESS_FLAGS.mask_of(AddressFlag::Dynamic);
    }
    flags |= match entry.DadState {
        s if s == IpDadStateTentative => ADDRESS_FLAGS.mask_of(AddressFlag::Tentative),
        s if s == IpDadStateDuplicate => ADDRESS_FLAGS.mask_of(AddressFlag::Duplicated),
        s if s == IpDadStateDeprecated => ADDRESS_FLAGS.mask_of(AddressFlag::Deprecated),
        _ => 0,
    };
    flags
}

fn collect_anycast(mut anycast: *mut IP_ADAPTER_ANYCAST_ADDRESS_XP) -> Vec<RawAddress> {
    let mut addresses = Vec::new();

    // SAFETY: Same list discipline as the unicast addresses.
    while !anycast.is_null() {
        let entry = unsafe { &*anycast };

        if let Some(mut raw) = decode_socket_address(&entry.Address) {
            raw.flags = ADDRESS_FLAGS.mask_of(AddressFlag::Anycast);
            addresses.push(raw);
        }

        anycast = entry.Next;
    }

    addresses
}
