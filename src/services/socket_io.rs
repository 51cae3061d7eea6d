// ============================================================================
// SOCKET.IO - Codec del protocolo v4 (Engine.IO 4, transporte websocket)
// ============================================================================
// Cada frame de texto es un paquete Engine.IO. Los mensajes (`4`) llevan
// dentro un paquete Socket.IO del namespace por defecto `/`.
//
//   0{"sid":..}      handshake      ->  respondemos `40`
//   2                ping           ->  respondemos `3`
//   40{"sid":..}     namespace conectado
//   42["evento",{}]  evento en ambos sentidos
// ============================================================================

use serde_json::{json, Value};

use super::realtime::{ChannelError, ChannelMessage};

/// Query que abre directamente el transporte websocket (sin polling)
pub const ENGINE_QUERY: &str = "EIO=4&transport=websocket";
pub const CONNECT_PACKET: &str = "40";
pub const DISCONNECT_PACKET: &str = "41";
pub const PONG_PACKET: &str = "3";

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Handshake de Engine.IO
    Open(Value),
    Close,
    Ping,
    Pong,
    /// El servidor aceptó el namespace
    Connected(Value),
    Disconnected,
    Event(ChannelMessage),
    ConnectError(Value),
    /// Acks, binarios, upgrade, noop y otros namespaces
    Ignored,
}

fn split_first(text: &str) -> Option<(char, &str)> {
    let mut chars = text.chars();
    let first = chars.next()?;
    Some((first, chars.as_str()))
}

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or(Value::Null)
}

/// `None` si el frame no es un paquete válido
pub fn decode(text: &str) -> Option<Packet> {
    let (engine, rest) = split_first(text)?;
    match engine {
        '0' => Some(Packet::Open(parse_json(rest))),
        '1' => Some(Packet::Close),
        '2' => Some(Packet::Ping),
        '3' => Some(Packet::Pong),
        '4' => decode_message(rest),
        '5' | '6' => Some(Packet::Ignored),
        _ => None,
    }
}

fn decode_message(text: &str) -> Option<Packet> {
    let (kind, body) = split_first(text)?;
    if body.starts_with('/') {
        return Some(Packet::Ignored);
    }
    match kind {
        '0' => Some(Packet::Connected(parse_json(body))),
        '1' => Some(Packet::Disconnected),
        // Un id de ack opcional precede al array
        '2' => decode_event(body.trim_start_matches(|c: char| c.is_ascii_digit())),
        '4' => Some(Packet::ConnectError(parse_json(body))),
        '3' | '5' | '6' => Some(Packet::Ignored),
        _ => None,
    }
}

fn decode_event(body: &str) -> Option<Packet> {
    let mut args = match serde_json::from_str::<Value>(body).ok()? {
        Value::Array(args) => args.into_iter(),
        _ => return None,
    };
    let event = match args.next()? {
        Value::String(event) => event,
        _ => return None,
    };
    let data = args.next().unwrap_or(Value::Null);
    Some(Packet::Event(ChannelMessage { event, data }))
}

/// `42["evento",datos]`; sin datos solo se envía el nombre
pub fn encode_event(message: &ChannelMessage) -> Result<String, ChannelError> {
    let args = if message.data.is_null() {
        json!([message.event])
    } else {
        json!([message.event, message.data])
    };
    serde_json::to_string(&args)
        .map(|array| format!("42{}", array))
        .map_err(|e| ChannelError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_and_heartbeat() {
        match decode(r#"0{"sid":"abc","pingInterval":25000,"pingTimeout":20000}"#) {
            Some(Packet::Open(handshake)) => assert_eq!(handshake["sid"], "abc"),
            other => panic!("expected open, got {:?}", other),
        }
        assert_eq!(decode("2"), Some(Packet::Ping));
        assert_eq!(decode("1"), Some(Packet::Close));
    }

    #[test]
    fn namespace_connect_and_disconnect() {
        assert_eq!(decode(r#"40{"sid":"xyz"}"#), Some(Packet::Connected(json!({"sid": "xyz"}))));
        assert_eq!(decode("40"), Some(Packet::Connected(Value::Null)));
        assert_eq!(decode("41"), Some(Packet::Disconnected));
        assert_eq!(
            decode(r#"44{"message":"Not authorized"}"#),
            Some(Packet::ConnectError(json!({"message": "Not authorized"})))
        );
    }

    #[test]
    fn incoming_events_become_channel_messages() {
        assert_eq!(
            decode(r#"42["ride-confirmed",{"_id":"r1","otp":"4821"}]"#),
            Some(Packet::Event(ChannelMessage::new("ride-confirmed", json!({"_id": "r1", "otp": "4821"}))))
        );
        assert_eq!(
            decode(r#"4213["ride-started",{"_id":"r1"}]"#),
            Some(Packet::Event(ChannelMessage::new("ride-started", json!({"_id": "r1"}))))
        );
        assert_eq!(decode(r#"42["ping-me"]"#), Some(Packet::Event(ChannelMessage::new("ping-me", Value::Null))));
    }

    #[test]
    fn other_namespaces_and_garbage() {
        assert_eq!(decode(r#"42/admin,["new-ride",{}]"#), Some(Packet::Ignored));
        assert_eq!(decode("6"), Some(Packet::Ignored));
        assert_eq!(decode(""), None);
        assert_eq!(decode("x"), None);
        assert_eq!(decode(r#"42{"event":"join"}"#), None);
        assert_eq!(decode("42[17]"), None);
    }

    #[test]
    fn outgoing_events_use_the_event_packet() {
        let join = ChannelMessage::new("join", json!({"userType": "user", "userId": "u1"}));
        let text = encode_event(&join).unwrap();
        assert!(text.starts_with(r#"42["join",{"#));
        assert_eq!(decode(&text), Some(Packet::Event(join)));

        assert_eq!(encode_event(&ChannelMessage::new("leave", Value::Null)).unwrap(), r#"42["leave"]"#);
    }
}
