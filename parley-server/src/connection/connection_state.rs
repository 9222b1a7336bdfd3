/// Lifecycle of a single connection inside the relay.
///
/// `Left` is terminal: a client that wants back in opens a new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Joined = 1,
    Left = 2,
}

impl ConnectionState {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Connecting,
            1 => Self::Joined,
            _ => Self::Left,
        }
    }
}
