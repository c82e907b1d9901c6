//! Channel configuration for the order streams
//!
//! The engine moves orders over bounded channels: a full outbound buffer
//! blocks the loop, propagating backpressure to the inbound side. Small
//! defaults keep memory bounded; larger buffers trade memory for
//! throughput under bursty flow.

use tokio::sync::mpsc;

use matchbook_types::order::Order;

/// Capacities for the inbound and outbound order channels
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Buffered capacity of the inbound order stream
    pub inbound_capacity: usize,
    /// Buffered capacity of the outbound order stream
    pub outbound_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            inbound_capacity: 64,
            outbound_capacity: 64,
        }
    }
}

impl ChannelConfig {
    /// Build the inbound and outbound channel pairs
    ///
    /// Returns `((inbound_tx, inbound_rx), (outbound_tx, outbound_rx))`.
    /// The caller feeds `inbound_tx`, hands `inbound_rx` and `outbound_tx`
    /// to [`crate::Book::run`], and consumes `outbound_rx`.
    #[allow(clippy::type_complexity)]
    pub fn build(
        &self,
    ) -> (
        (mpsc::Sender<Order>, mpsc::Receiver<Order>),
        (mpsc::Sender<Order>, mpsc::Receiver<Order>),
    ) {
        (
            mpsc::channel(self.inbound_capacity),
            mpsc::channel(self.outbound_capacity),
        )
    }
}
