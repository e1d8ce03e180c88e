//! Endpoint selection from glob patterns over network interfaces.
//!
//! Interface metadata comes from an [`InterfaceSource`]; the selector itself
//! is pure, so it can be tested against fixed snapshots.

pub mod error;
pub mod selector;
pub mod system;

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

pub use error::EndpointError;
pub use selector::{resolve_endpoint, select_endpoint};
pub use system::SystemInterfaces;

/// Placeholder for names the platform does not publish.
pub const UNKNOWN_NAME: &str = "(unknown)";

/// One IPv4 address bound to an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterfaceAddress {
    pub addr: Ipv4Addr,
    /// Broadcast address, when the platform publishes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<Ipv4Addr>,
}

/// Interface metadata as seen by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    /// System identifier (e.g. `eth0`, or an adapter GUID).
    pub name: String,
    /// Adapter driver description.
    pub driver_desc: String,
    /// User-facing connection name.
    pub connection_name: String,
    /// IPv4 addresses in platform order.
    pub addresses: Vec<InterfaceAddress>,
}

impl InterfaceInfo {
    /// Interface with only a system name; the other names are unknown.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver_desc: UNKNOWN_NAME.to_string(),
            connection_name: UNKNOWN_NAME.to_string(),
            addresses: Vec::new(),
        }
    }

    pub fn identifiers(&self) -> [&str; 3] {
        [&self.name, &self.driver_desc, &self.connection_name]
    }
}

impl fmt::Display for InterfaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Interface: {}", self.connection_name)?;
        writeln!(f, "UID: {}", self.name)?;
        write!(f, "Adapter name: {}", self.driver_desc)?;
        for address in &self.addresses {
            write!(f, "\n   Address: {}", address.addr)?;
        }
        Ok(())
    }
}

/// Resolved address to bind or send from, and where to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub address: Ipv4Addr,
    /// Broadcast address of the subnet, or `address` when none is published.
    pub broadcast: Ipv4Addr,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (broadcast {})", self.address, self.broadcast)
    }
}

/// Provider of interface snapshots.
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, EndpointError>;
}

impl InterfaceSource for [InterfaceInfo] {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, EndpointError> {
        Ok(self.to_vec())
    }
}

impl InterfaceSource for Vec<InterfaceInfo> {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, EndpointError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{InterfaceAddress, InterfaceInfo};

    #[test]
    fn display_lists_names_and_addresses() {
        let mut info = InterfaceInfo::named("eth0");
        info.connection_name = "Ethernet".to_string();
        info.addresses.push(InterfaceAddress {
            addr: Ipv4Addr::new(192, 168, 1, 5),
            broadcast: None,
        });
        let text = info.to_string();
        assert_eq!(
            text,
            "Interface: Ethernet\nUID: eth0\nAdapter name: (unknown)\n   Address: 192.168.1.5"
        );
    }
}
