use crate::HttpProtocol;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};

/// Address family of a [`ServerAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4.
    IPv4,
    /// IPv6.
    IPv6,
}

impl AddressFamily {
    /// Reports the family of the given IP address.
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::IPv4,
            IpAddr::V6(_) => Self::IPv6,
        }
    }
}

impl Display for AddressFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IPv4 => f.write_str("IPv4"),
            Self::IPv6 => f.write_str("IPv6"),
        }
    }
}

/// The address an [`HttpServer`](crate::HttpServer) is actually bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    /// Bound IP address.
    pub ip: IpAddr,
    /// Bound port.
    pub port: u16,
    /// Family of the bound IP address.
    pub family: AddressFamily,
}

impl From<SocketAddr> for ServerAddress {
    fn from(address: SocketAddr) -> Self {
        Self {
            ip: address.ip(),
            port: address.port(),
            family: AddressFamily::of(&address.ip()),
        }
    }
}

/// Composes a client-usable URL.
///
/// An IPv6 host is wrapped in brackets, with the unspecified `::` rendered as
/// the loopback `::1`. The IPv4 unspecified `0.0.0.0` is rendered as
/// `127.0.0.1`, and so is a missing host. Without a known `family`, the family
/// is inferred from the host when it is an IP literal.
pub(crate) fn compose_url(
    protocol: HttpProtocol,
    host: Option<&str>,
    port: u16,
    family: Option<AddressFamily>,
) -> String {
    let host = host.unwrap_or("127.0.0.1");
    let family = family.or_else(|| host.parse::<IpAddr>().ok().as_ref().map(AddressFamily::of));

    let host = match family {
        Some(AddressFamily::IPv6) if host == "::" => "[::1]".to_string(),
        Some(AddressFamily::IPv6) => format!("[{host}]"),
        _ if host == "0.0.0.0" => "127.0.0.1".to_string(),
        _ => host.to_string(),
    };

    format!("{protocol}://{host}:{port}")
}
