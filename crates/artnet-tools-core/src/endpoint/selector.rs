use glob::{MatchOptions, Pattern};
use tracing::debug;

use super::error::EndpointError;
use super::{Endpoint, InterfaceInfo, InterfaceSource};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Pick the first address whose interface or literal address matches
/// `pattern`.
///
/// Interfaces and addresses are visited in snapshot order and the first match
/// wins. An interface matches when the pattern matches its system name,
/// driver description or connection name; every IPv4 address of a matching
/// interface qualifies, starting with the first. Otherwise the dotted address
/// itself is matched. Matching is case-insensitive.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
///
/// use artnet_tools_core::endpoint::{InterfaceAddress, InterfaceInfo, select_endpoint};
///
/// let mut eth = InterfaceInfo::named("eth0");
/// eth.addresses.push(InterfaceAddress {
///     addr: Ipv4Addr::new(192, 168, 1, 5),
///     broadcast: Some(Ipv4Addr::new(192, 168, 1, 255)),
/// });
/// let endpoint = select_endpoint("192.*", &[eth])?;
/// assert_eq!(endpoint.broadcast, Ipv4Addr::new(192, 168, 1, 255));
/// # Ok::<(), artnet_tools_core::endpoint::EndpointError>(())
/// ```
pub fn select_endpoint(
    pattern: &str,
    interfaces: &[InterfaceInfo],
) -> Result<Endpoint, EndpointError> {
    let compiled = Pattern::new(pattern).map_err(|err| EndpointError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.msg.to_string(),
    })?;
    let is_match = |value: &str| compiled.matches_with(value, MATCH_OPTIONS);

    for interface in interfaces {
        let names_match = interface.identifiers().iter().any(|name| is_match(*name));
        for address in &interface.addresses {
            if names_match || is_match(&address.addr.to_string()) {
                let endpoint = Endpoint {
                    address: address.addr,
                    broadcast: address.broadcast.unwrap_or(address.addr),
                };
                debug!(
                    pattern,
                    interface = %interface.name,
                    %endpoint,
                    "pattern matched"
                );
                return Ok(endpoint);
            }
        }
    }

    Err(EndpointError::NotFound {
        pattern: pattern.to_string(),
    })
}

/// Take a snapshot from `source` and select from it.
pub fn resolve_endpoint<S>(source: &S, pattern: &str) -> Result<Endpoint, EndpointError>
where
    S: InterfaceSource + ?Sized,
{
    let interfaces = source.interfaces()?;
    select_endpoint(pattern, &interfaces)
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{resolve_endpoint, select_endpoint};
    use crate::endpoint::{EndpointError, InterfaceAddress, InterfaceInfo, InterfaceSource};

    fn iface(name: &str, desc: &str, conn: &str, addrs: &[(&str, Option<&str>)]) -> InterfaceInfo {
        InterfaceInfo {
            name: name.to_string(),
            driver_desc: desc.to_string(),
            connection_name: conn.to_string(),
            addresses: addrs
                .iter()
                .map(|(addr, bc)| InterfaceAddress {
                    addr: addr.parse().unwrap(),
                    broadcast: bc.map(|b| b.parse().unwrap()),
                })
                .collect(),
        }
    }

    fn snapshot() -> Vec<InterfaceInfo> {
        vec![
            iface("lo", "(unknown)", "(unknown)", &[("127.0.0.1", None)]),
            iface("{guid-no-ip}", "Bluetooth Device", "Bluetooth", &[]),
            iface(
                "{guid-artnet}",
                "Intel(R) Ethernet Connection",
                "Art-Net LAN",
                &[("2.0.0.10", Some("2.255.255.255"))],
            ),
            iface(
                "{guid-wifi}",
                "Realtek Wireless",
                "Wi-Fi",
                &[
                    ("192.168.1.5", Some("192.168.1.255")),
                    ("192.168.7.1", Some("192.168.7.255")),
                ],
            ),
        ]
    }

    #[test]
    fn matches_address_pattern() {
        let endpoint = select_endpoint("192.*", &snapshot()).unwrap();
        assert_eq!(endpoint.address, Ipv4Addr::new(192, 168, 1, 5));
        assert_eq!(endpoint.broadcast, Ipv4Addr::new(192, 168, 1, 255));
    }

    #[test]
    fn matches_later_address_of_interface() {
        let endpoint = select_endpoint("192.168.7.*", &snapshot()).unwrap();
        assert_eq!(endpoint.address, Ipv4Addr::new(192, 168, 7, 1));
    }

    #[test]
    fn matches_connection_name_case_insensitive() {
        let endpoint = select_endpoint("art-net*", &snapshot()).unwrap();
        assert_eq!(endpoint.address, Ipv4Addr::new(2, 0, 0, 10));
    }

    #[test]
    fn matches_driver_description() {
        let endpoint = select_endpoint("*Wireless*", &snapshot()).unwrap();
        assert_eq!(endpoint.address, Ipv4Addr::new(192, 168, 1, 5));
    }

    #[test]
    fn interface_without_addresses_never_matches() {
        let err = select_endpoint("Bluetooth", &snapshot()).unwrap_err();
        assert!(matches!(err, EndpointError::NotFound { .. }));
    }

    #[test]
    fn first_match_wins() {
        let endpoint = select_endpoint("*", &snapshot()).unwrap();
        assert_eq!(endpoint.address, Ipv4Addr::LOCALHOST);
        // no broadcast published: falls back to the address itself
        assert_eq!(endpoint.broadcast, Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn no_match_is_not_found() {
        let err = select_endpoint("10.*", &snapshot()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no interface or address matches pattern '10.*'"
        );
    }

    #[test]
    fn invalid_pattern() {
        let err = select_endpoint("[", &snapshot()).unwrap_err();
        assert!(matches!(err, EndpointError::InvalidPattern { .. }));
    }

    struct FailingSource;

    impl InterfaceSource for FailingSource {
        fn interfaces(&self) -> Result<Vec<InterfaceInfo>, EndpointError> {
            Err(EndpointError::Unsupported)
        }
    }

    #[test]
    fn resolve_uses_source_snapshot() {
        let endpoint = resolve_endpoint(&snapshot(), "2.*").unwrap();
        assert_eq!(endpoint.broadcast, Ipv4Addr::new(2, 255, 255, 255));
    }

    #[test]
    fn resolve_propagates_source_errors() {
        let err = resolve_endpoint(&FailingSource, "*").unwrap_err();
        assert!(matches!(err, EndpointError::Unsupported));
    }
}
