mod channel;
mod domain;

pub use channel::{OutletChannel, UdpOutletChannel};
pub use domain::{Outlet, OutletEndpoint, OutletState, switch_datagram};
