use super::{EndpointError, InterfaceInfo, InterfaceSource};

/// Interfaces as reported by the operating system.
///
/// Only the system name is known on Unix; driver description and
/// connection name are reported as `(unknown)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>, EndpointError> {
        imp::interfaces()
    }
}

#[cfg(unix)]
mod imp {
    use nix::ifaddrs::getifaddrs;

    use super::super::{InterfaceAddress, InterfaceInfo};
    use super::EndpointError;

    pub(super) fn interfaces() -> Result<Vec<InterfaceInfo>, EndpointError> {
        let addrs = getifaddrs().map_err(|e| EndpointError::Enumeration(std::io::Error::from(e)))?;

        let mut interfaces: Vec<InterfaceInfo> = Vec::new();
        for ifaddr in addrs {
            let position = match interfaces
                .iter()
                .position(|info| info.name == ifaddr.interface_name)
            {
                Some(position) => position,
                None => {
                    interfaces.push(InterfaceInfo::named(ifaddr.interface_name.clone()));
                    interfaces.len() - 1
                }
            };

            let Some(addr_in) = ifaddr.address.as_ref().and_then(|a| a.as_sockaddr_in()) else {
                continue;
            };
            let broadcast = ifaddr
                .broadcast
                .as_ref()
                .and_then(|b| b.as_sockaddr_in())
                .map(|b| b.ip());

            interfaces[position].addresses.push(InterfaceAddress {
                addr: addr_in.ip(),
                broadcast,
            });
        }

        tracing::debug!(count = interfaces.len(), "enumerated network interfaces");
        Ok(interfaces)
    }
}

#[cfg(not(unix))]
mod imp {
    use super::super::InterfaceInfo;
    use super::EndpointError;

    pub(super) fn interfaces() -> Result<Vec<InterfaceInfo>, EndpointError> {
        Err(EndpointError::Unsupported)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::SystemInterfaces;
    use crate::endpoint::InterfaceSource;

    #[test]
    fn enumeration_succeeds() {
        // Contents depend on the host; only check that the call works and
        // names are unique.
        let interfaces = SystemInterfaces.interfaces().unwrap();
        let mut names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
