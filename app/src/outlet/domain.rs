use serde::Deserialize;

/// One switchable socket on the power-control box. The wiring is fixed:
/// outlet 1 drives the red lamp, 2 the yellow lamp, 3 the green lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Outlet {
    Red,
    Yellow,
    Green,
}

impl Outlet {
    /// Outlet number as printed on the box. Numbering starts at 1, not 0.
    pub fn number(self) -> u8 {
        match self {
            Outlet::Red => 1,
            Outlet::Yellow => 2,
            Outlet::Green => 3,
        }
    }

    /// All outlets in ascending outlet-number order.
    pub fn all() -> [Outlet; 3] {
        [Outlet::Red, Outlet::Yellow, Outlet::Green]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum OutletState {
    On,
    Off,
}

impl OutletState {
    pub fn from_bool(on: bool) -> Self {
        if on { OutletState::On } else { OutletState::Off }
    }
}

/// Address and credential of one power-control box. The port stays a string
/// and is parsed only when a command is sent; the configuration UI treats it
/// as free text.
#[derive(Clone, Deserialize)]
pub struct OutletEndpoint {
    pub host: String,
    pub port: String,
    pub secret: String,
}

impl OutletEndpoint {
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty() && !self.port.trim().is_empty()
    }
}

impl std::fmt::Debug for OutletEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutletEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Builds the switch command datagram understood by the box:
/// `Sw_<on|off><outlet><secret>\0\r\n`, encoded as Latin-1.
pub fn switch_datagram(outlet: Outlet, state: OutletState, secret: &str) -> Vec<u8> {
    let command = match state {
        OutletState::On => "on",
        OutletState::Off => "off",
    };

    latin1_bytes(&format!("Sw_{}{}{}\0\r\n", command, outlet.number(), secret))
}

/// The box firmware reads single-byte characters. Characters outside Latin-1
/// are replaced by '?'.
fn latin1_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}
