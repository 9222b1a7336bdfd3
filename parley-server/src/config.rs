/// Queue sizes for the relay.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Notifications buffered per connection before it is considered
    /// stalled and evicted.
    pub send_queue_capacity: usize,
    /// Pending connect/route/disconnect requests buffered in front of the engine.
    pub command_queue_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_queue_capacity: 64,
            command_queue_capacity: 1024,
        }
    }
}
