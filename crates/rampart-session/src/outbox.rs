//! The outbound packet queue: the session's interface to the network
//! client. The transport drains it once per frame and owns delivery.

use rampart_protocol::{Delivery, Packet};

/// A packet awaiting transmission, with its requested delivery mode.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundPacket {
    /// The packet to send.
    pub packet: Packet,
    /// Requested delivery mode.
    pub delivery: Delivery,
}

/// Accumulates outbound packets in send order.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: Vec<OutboundPacket>,
}

impl Outbox {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue with reliable, ordered delivery.
    pub fn send(&mut self, packet: Packet) {
        self.queue.push(OutboundPacket {
            packet,
            delivery: Delivery::Sequenced,
        });
    }

    /// Enqueue with unsequenced delivery (stale-tolerant reports).
    pub fn send_unsequenced(&mut self, packet: Packet) {
        self.queue.push(OutboundPacket {
            packet,
            delivery: Delivery::Unsequenced,
        });
    }

    /// Remove and return everything queued, in send order.
    pub fn drain(&mut self) -> Vec<OutboundPacket> {
        std::mem::take(&mut self.queue)
    }

    /// Peek at queued packets without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &OutboundPacket> {
        self.queue.iter()
    }

    /// Number of queued packets.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_protocol::packets::{PositionData, Restock};
    use rampart_protocol::types::PlayerId;

    #[test]
    fn test_delivery_modes_recorded() {
        let mut outbox = Outbox::new();
        outbox.send(Packet::Restock(Restock { pid: PlayerId(0) }));
        outbox.send_unsequenced(Packet::PositionData(PositionData {
            position: glam::Vec3::ZERO,
        }));

        let sent = outbox.drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].delivery, Delivery::Sequenced);
        assert_eq!(sent[1].delivery, Delivery::Unsequenced);
        assert!(outbox.is_empty());
    }
}
