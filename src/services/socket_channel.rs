// ============================================================================
// SOCKET CHANNEL - RealtimeChannel socket.io sobre el WebSocket del navegador
// ============================================================================

use futures::channel::mpsc::{self, UnboundedSender};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::realtime::{
    browser_realtime_endpoint, ChannelError, ChannelMessage, Connector, Handler, ListenerId, ListenerRegistry,
    RealtimeChannel, CONNECT_EVENT, DISCONNECT_EVENT,
};
use super::socket_io::{self, Packet, CONNECT_PACKET, DISCONNECT_PACKET, PONG_PACKET};

pub struct SocketChannel {
    id: u64,
    connected: Rc<Cell<bool>>,
    listeners: Rc<ListenerRegistry>,
    outbox: RefCell<Option<UnboundedSender<String>>>,
    /// Eventos emitidos antes de conectar el namespace
    pending: Rc<RefCell<Vec<String>>>,
}

fn push(outbox: &UnboundedSender<String>, text: &str) {
    if outbox.unbounded_send(text.to_string()).is_err() {
        log::debug!("🔌 Outbox cerrado, se descarta {}", text);
    }
}

impl SocketChannel {
    pub fn open(id: u64, url: &str) -> Result<Self, ChannelError> {
        let socket = WebSocket::open(url).map_err(|e| ChannelError::Open {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let (mut write, mut read) = socket.split();
        let (tx, mut rx) = mpsc::unbounded::<String>();

        let connected = Rc::new(Cell::new(false));
        let listeners = Rc::new(ListenerRegistry::default());
        let pending = Rc::new(RefCell::new(Vec::new()));

        // Writer: vacía el outbox hasta que se cierre el canal
        spawn_local(async move {
            while let Some(text) = rx.next().await {
                if let Err(e) = write.send(Message::Text(text)).await {
                    log::error!("❌ Envío fallido en canal #{}: {}", id, e);
                    break;
                }
            }
            if let Err(e) = write.close().await {
                log::debug!("🔌 Cierre de #{}: {}", id, e);
            }
        });

        // Reader: handshake, heartbeat y reparto de eventos
        {
            let connected = connected.clone();
            let listeners = listeners.clone();
            let pending = pending.clone();
            let outbox = tx.clone();
            spawn_local(async move {
                while let Some(frame) = read.next().await {
                    let text = match frame {
                        Ok(Message::Text(text)) => text,
                        Ok(Message::Bytes(_)) => {
                            log::debug!("🔌 Frame binario ignorado");
                            continue;
                        }
                        Err(e) => {
                            log::warn!("⚠️ Error en canal #{}: {}", id, e);
                            break;
                        }
                    };

                    match socket_io::decode(&text) {
                        Some(Packet::Open(handshake)) => {
                            log::debug!("🔌 Handshake #{}: {}", id, handshake);
                            push(&outbox, CONNECT_PACKET);
                        }
                        Some(Packet::Ping) => push(&outbox, PONG_PACKET),
                        Some(Packet::Connected(_)) => {
                            connected.set(true);
                            let queued: Vec<String> = pending.borrow_mut().drain(..).collect();
                            for text in &queued {
                                push(&outbox, text);
                            }
                            listeners.dispatch(CONNECT_EVENT, &Value::Null);
                        }
                        Some(Packet::Event(message)) => {
                            log::debug!("🔌 <- {}", message.event);
                            listeners.dispatch(&message.event, &message.data);
                        }
                        Some(Packet::ConnectError(reason)) => {
                            log::error!("❌ Namespace rechazado en #{}: {}", id, reason);
                        }
                        Some(Packet::Disconnected) | Some(Packet::Close) => break,
                        Some(Packet::Pong) | Some(Packet::Ignored) => {}
                        None => log::warn!("⚠️ Frame mal formado ignorado: {}", text),
                    }
                }
                connected.set(false);
                listeners.dispatch(DISCONNECT_EVENT, &Value::Null);
            });
        }

        Ok(Self {
            id,
            connected,
            listeners,
            outbox: RefCell::new(Some(tx)),
            pending,
        })
    }
}

impl RealtimeChannel for SocketChannel {
    fn handle_id(&self) -> u64 {
        self.id
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn emit(&self, event: &str, data: Value) -> Result<(), ChannelError> {
        let text = socket_io::encode_event(&ChannelMessage::new(event, data))?;
        let outbox = self.outbox.borrow();
        let tx = outbox.as_ref().ok_or(ChannelError::Closed)?;
        if !self.connected.get() {
            // Se envía al conectar el namespace
            self.pending.borrow_mut().push(text);
            return Ok(());
        }
        tx.unbounded_send(text).map_err(|_| ChannelError::Closed)?;
        log::debug!("🔌 -> {}", event);
        Ok(())
    }

    fn on(&self, event: &str, handler: Handler) -> ListenerId {
        self.listeners.add(event, handler)
    }

    fn off(&self, event: &str) {
        self.listeners.remove_event(event);
    }

    fn off_listener(&self, id: ListenerId) {
        self.listeners.remove_id(id);
    }

    fn disconnect(&self) {
        if let Some(tx) = self.outbox.borrow_mut().take() {
            if self.connected.get() {
                push(&tx, DISCONNECT_PACKET);
            }
            // Cierra para todos los emisores; el writer termina y cierra el socket
            tx.close_channel();
        }
        self.pending.borrow_mut().clear();
        self.listeners.clear();
        self.connected.set(false);
    }
}

impl Drop for SocketChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SocketConnector {
    url: String,
}

impl SocketConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Connector para la ubicación de la propia página
    pub fn for_browser() -> Option<Self> {
        browser_realtime_endpoint().map(Self::new)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connector for SocketConnector {
    type Channel = SocketChannel;

    fn connect(&self, handle_id: u64) -> Result<SocketChannel, ChannelError> {
        log::info!("🔌 Conectando a {}", self.url);
        SocketChannel::open(handle_id, &self.url)
    }
}
