//! Versioned binary codec for [`Packet`].
//!
//! Wire format: `[version: u8] [postcard-encoded Packet]`. The transport
//! layer owns framing and reassembly; this module only turns a complete
//! payload into a [`Packet`] and back.

use crate::packets::Packet;

/// Current wire-protocol version. Prepended to every serialized packet.
pub const PROTOCOL_VERSION: u8 = 1;

/// Errors that can occur while decoding a packet payload.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The payload was empty (no version byte).
    #[error("empty payload, no version byte")]
    EmptyPayload,

    /// The version byte does not match [`PROTOCOL_VERSION`].
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// Postcard deserialization failed.
    #[error("deserialization error: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Serialize a [`Packet`] into a versioned binary payload.
pub fn serialize_packet(packet: &Packet) -> Result<Vec<u8>, postcard::Error> {
    let body = postcard::to_allocvec(packet)?;
    let mut out = Vec::with_capacity(1 + body.len());
    out.push(PROTOCOL_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Deserialize a versioned binary payload into a [`Packet`].
///
/// # Errors
///
/// Returns [`PacketError`] if the payload is empty, carries an unsupported
/// version byte, or the body is malformed.
pub fn deserialize_packet(data: &[u8]) -> Result<Packet, PacketError> {
    if data.is_empty() {
        return Err(PacketError::EmptyPayload);
    }

    let version = data[0];
    if version != PROTOCOL_VERSION {
        return Err(PacketError::UnsupportedVersion(version));
    }

    Ok(postcard::from_bytes(&data[1..])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::{BlockAction, ChatMessage, GrenadePacket, PacketTag};
    use crate::types::{BlockActionKind, ChatKind, PlayerId};
    use glam::{IVec3, Vec3};

    #[test]
    fn test_block_action_roundtrip() {
        let packet = Packet::BlockAction(BlockAction {
            pid: PlayerId(5),
            action: BlockActionKind::Grenade,
            position: IVec3::new(-10, 4, 63),
        });
        let bytes = serialize_packet(&packet).unwrap();
        assert_eq!(bytes[0], PROTOCOL_VERSION);
        assert_eq!(deserialize_packet(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_grenade_roundtrip_preserves_floats() {
        let packet = Packet::GrenadePacket(GrenadePacket {
            pid: PlayerId(0),
            position: Vec3::new(256.5, 128.25, 32.0),
            velocity: Vec3::new(-1.0, 0.5, 0.0),
            fuse: 2.75,
        });
        let bytes = serialize_packet(&packet).unwrap();
        let decoded = deserialize_packet(&bytes).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(decoded.tag(), PacketTag::GrenadePacket);
    }

    #[test]
    fn test_chat_roundtrip() {
        let packet = Packet::ChatMessage(ChatMessage {
            pid: PlayerId(40),
            kind: ChatKind::System,
            message: "server restarting".to_string(),
        });
        let bytes = serialize_packet(&packet).unwrap();
        assert_eq!(deserialize_packet(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(
            deserialize_packet(&[]),
            Err(PacketError::EmptyPayload)
        ));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let packet = Packet::Restock(crate::packets::Restock { pid: PlayerId(0) });
        let mut bytes = serialize_packet(&packet).unwrap();
        bytes[0] = 200;
        assert!(matches!(
            deserialize_packet(&bytes),
            Err(PacketError::UnsupportedVersion(200))
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let packet = Packet::ChatMessage(ChatMessage {
            pid: PlayerId(1),
            kind: ChatKind::All,
            message: "a fairly long message body".to_string(),
        });
        let bytes = serialize_packet(&packet).unwrap();
        assert!(deserialize_packet(&bytes[..bytes.len() / 2]).is_err());
    }
}
