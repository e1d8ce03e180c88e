//! UDP sockets for receiving and broadcasting Art-Net datagrams.

use std::io;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

/// Largest datagram read in one call; ArtDMX frames are 530 bytes.
pub const RECV_BUFFER_LEN: usize = 1024;

/// Socket bound to `addr:port` with address reuse, so several tools can
/// listen on the same node.
pub fn bind_receiver(addr: Ipv4Addr, port: u16) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&SocketAddrV4::new(addr, port).into())?;
    Ok(socket.into())
}

/// Unbound socket allowed to send to broadcast addresses.
pub fn broadcast_sender() -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_broadcast(true)?;
    socket.set_reuse_address(true)?;
    Ok(socket.into())
}
