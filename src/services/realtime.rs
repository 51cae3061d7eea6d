// ============================================================================
// REALTIME - Canal bidireccional compartido con el backend
// ============================================================================
// Un canal por app. `ChannelManager::get_or_create` devuelve el mismo handle
// hasta `close`; la siguiente llamada abre uno nuevo. Las pantallas se
// suscriben con `Subscription`, que al soltarse quita solo sus listeners.
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::socket_io::ENGINE_QUERY;
use crate::models::ActorKind;

pub const CONNECT_EVENT: &str = "connect";
pub const DISCONNECT_EVENT: &str = "disconnect";
pub const JOIN_EVENT: &str = "join";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("could not open channel to {url}: {reason}")]
    Open { url: String, reason: String },
    #[error("channel is closed")]
    Closed,
    #[error("could not encode message: {0}")]
    Encode(String),
}

/// Un evento con nombre y su carga; el codec vive en `socket_io`
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub event: String,
    pub data: Value,
}

impl ChannelMessage {
    pub fn new(event: &str, data: Value) -> Self {
        Self {
            event: event.to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinPayload {
    #[serde(rename = "userType")]
    pub user_type: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

pub type Handler = Rc<dyn Fn(Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Conexión viva. Los emits no esperan respuesta.
pub trait RealtimeChannel {
    /// Identidad del handle; cada handle nuevo tiene otro id
    fn handle_id(&self) -> u64;
    fn is_connected(&self) -> bool;
    fn emit(&self, event: &str, data: Value) -> Result<(), ChannelError>;
    fn on(&self, event: &str, handler: Handler) -> ListenerId;
    /// Quita todos los listeners de `event`
    fn off(&self, event: &str);
    /// Quita un solo listener
    fn off_listener(&self, id: ListenerId);
    fn disconnect(&self);
}

/// Abre canales para el manager
pub trait Connector {
    type Channel: RealtimeChannel;

    fn connect(&self, handle_id: u64) -> Result<Self::Channel, ChannelError>;
}

pub struct ChannelManager<C: Connector> {
    connector: C,
    current: RefCell<Option<Rc<C::Channel>>>,
    next_id: Cell<u64>,
}

impl<C: Connector> ChannelManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            current: RefCell::new(None),
            next_id: Cell::new(1),
        }
    }

    /// El canal abierto; abre uno si no hay
    pub fn get_or_create(&self) -> Result<Rc<C::Channel>, ChannelError> {
        if let Some(channel) = self.current.borrow().as_ref() {
            return Ok(channel.clone());
        }

        let id = self.next_id.get();
        let channel = Rc::new(self.connector.connect(id)?);
        self.next_id.set(id + 1);
        log::info!("🔌 Canal en tiempo real #{} abierto", id);
        *self.current.borrow_mut() = Some(channel.clone());
        Ok(channel)
    }

    pub fn current(&self) -> Option<Rc<C::Channel>> {
        self.current.borrow().clone()
    }

    /// Desconecta y olvida el canal. Sin canal no hace nada.
    pub fn close(&self) {
        let Some(channel) = self.current.borrow_mut().take() else {
            return;
        };
        channel.disconnect();
        log::info!("🔌 Canal en tiempo real #{} cerrado", channel.handle_id());
    }
}

/// Listeners de un canal. Los handlers se clonan antes de ejecutarse, así un
/// handler puede añadir o quitar listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, String, Handler)>>,
}

impl ListenerRegistry {
    pub fn add(&self, event: &str, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, event.to_string(), handler));
        id
    }

    pub fn remove_event(&self, event: &str) {
        self.entries.borrow_mut().retain(|(_, e, _)| e != event);
    }

    pub fn remove_id(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(i, _, _)| *i != id);
    }

    pub fn dispatch(&self, event: &str, data: &Value) -> usize {
        let handlers: Vec<Handler> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, e, _)| e == event)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in &handlers {
            handler(data.clone());
        }
        handlers.len()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Listeners que una pantalla registró en un canal; se quitan en el drop
pub struct Subscription<C: RealtimeChannel> {
    channel: Rc<C>,
    ids: Vec<ListenerId>,
}

impl<C: RealtimeChannel + 'static> Subscription<C> {
    pub fn new(channel: Rc<C>) -> Self {
        Self { channel, ids: Vec::new() }
    }

    /// Anuncia `user_id` en el canal: ahora si está conectado y en cada
    /// (re)conexión.
    pub fn join(channel: Rc<C>, kind: ActorKind, user_id: &str) -> Self {
        let mut subscription = Self::new(channel.clone());
        let payload = JoinPayload {
            user_type: kind.user_type().to_string(),
            user_id: user_id.to_string(),
        };
        let payload = match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(e) => {
                log::error!("❌ No se pudo codificar el join: {}", e);
                return subscription;
            }
        };

        if channel.is_connected() {
            send_join(channel.as_ref(), &payload);
        }

        let weak = Rc::downgrade(&channel);
        subscription.listen(CONNECT_EVENT, move |_| {
            if let Some(channel) = weak.upgrade() {
                send_join(channel.as_ref(), &payload);
            }
        });
        subscription.listen(DISCONNECT_EVENT, |_| {
            log::warn!("⚠️ Canal en tiempo real desconectado");
        });
        subscription
    }

    pub fn listen<F>(&mut self, event: &str, handler: F)
    where
        F: Fn(Value) + 'static,
    {
        let id = self.channel.on(event, Rc::new(handler));
        self.ids.push(id);
    }

    pub fn channel(&self) -> &Rc<C> {
        &self.channel
    }
}

impl<C: RealtimeChannel> Drop for Subscription<C> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.channel.off_listener(id);
        }
    }
}

fn send_join<C: RealtimeChannel + ?Sized>(channel: &C, payload: &Value) {
    match channel.emit(JOIN_EVENT, payload.clone()) {
        Ok(()) => log::info!("🔌 Join enviado al canal"),
        Err(e) => log::error!("❌ Join no enviado: {}", e),
    }
}

/// URL socket.io según dónde se sirve la página. En local se habla con el
/// backend directamente; desplegado se pasa por el proxy del mismo origen.
pub fn realtime_endpoint(page_protocol: &str, hostname: &str, host: &str, backend_url: &str, path: &str) -> String {
    let secure = page_protocol.starts_with("https");
    if hostname == "localhost" || hostname == "127.0.0.1" {
        let backend = backend_url.trim_end_matches('/');
        let backend = if let Some(rest) = backend.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = backend.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            backend.to_string()
        };
        return format!("{}/socket.io/?{}", backend, ENGINE_QUERY);
    }

    let scheme = if secure { "wss" } else { "ws" };
    format!("{}://{}{}/?{}", scheme, host, path.trim_end_matches('/'), ENGINE_QUERY)
}

pub fn browser_realtime_endpoint() -> Option<String> {
    let location = web_sys::window()?.location();
    Some(realtime_endpoint(
        &location.protocol().ok()?,
        &location.hostname().ok()?,
        &location.host().ok()?,
        &crate::config::CONFIG.backend_url,
        &crate::config::CONFIG.realtime_path,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct FakeChannel {
        id: u64,
        connected: Cell<bool>,
        emitted: RefCell<Vec<ChannelMessage>>,
        listeners: ListenerRegistry,
        disconnected: Cell<bool>,
    }

    impl FakeChannel {
        fn fire(&self, event: &str, data: Value) -> usize {
            self.listeners.dispatch(event, &data)
        }
    }

    impl RealtimeChannel for FakeChannel {
        fn handle_id(&self) -> u64 {
            self.id
        }

        fn is_connected(&self) -> bool {
            self.connected.get()
        }

        fn emit(&self, event: &str, data: Value) -> Result<(), ChannelError> {
            if self.disconnected.get() {
                return Err(ChannelError::Closed);
            }
            self.emitted.borrow_mut().push(ChannelMessage::new(event, data));
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
            self.connected.set(false);
            self.disconnected.set(true);
            self.listeners.clear();
        }
    }

    #[derive(Default)]
    struct FakeConnector {
        opened: Cell<usize>,
    }

    impl Connector for FakeConnector {
        type Channel = FakeChannel;

        fn connect(&self, handle_id: u64) -> Result<FakeChannel, ChannelError> {
            self.opened.set(self.opened.get() + 1);
            Ok(FakeChannel { id: handle_id, ..FakeChannel::default() })
        }
    }

    #[test]
    fn get_or_create_reuses_the_open_channel() {
        let manager = ChannelManager::new(FakeConnector::default());
        let a = manager.get_or_create().unwrap();
        let b = manager.get_or_create().unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(manager.connector.opened.get(), 1);
    }

    #[test]
    fn close_then_get_opens_a_new_handle() {
        let manager = ChannelManager::new(FakeConnector::default());
        let first = manager.get_or_create().unwrap();
        manager.close();
        assert!(first.disconnected.get());
        assert!(manager.current().is_none());

        let second = manager.get_or_create().unwrap();
        assert_ne!(first.handle_id(), second.handle_id());
        assert_eq!(manager.connector.opened.get(), 2);
    }

    #[test]
    fn close_without_channel_is_a_no_op() {
        let manager = ChannelManager::new(FakeConnector::default());
        manager.close();
        manager.close();
        assert_eq!(manager.connector.opened.get(), 0);
    }

    #[test]
    fn join_is_sent_now_when_connected_and_on_reconnect() {
        let channel = Rc::new(FakeChannel::default());
        channel.connected.set(true);

        let _sub = Subscription::join(channel.clone(), ActorKind::Rider, "u1");
        assert_eq!(
            channel.emitted.borrow()[0],
            ChannelMessage::new("join", json!({"userType": "user", "userId": "u1"}))
        );

        channel.fire(CONNECT_EVENT, Value::Null);
        assert_eq!(channel.emitted.borrow().len(), 2);
    }

    #[test]
    fn join_waits_for_connect_when_not_yet_open() {
        let channel = Rc::new(FakeChannel::default());
        let _sub = Subscription::join(channel.clone(), ActorKind::Captain, "c9");
        assert!(channel.emitted.borrow().is_empty());

        channel.connected.set(true);
        channel.fire(CONNECT_EVENT, Value::Null);
        assert_eq!(channel.emitted.borrow()[0].data["userType"], "captain");
    }

    #[test]
    fn dropping_a_subscription_removes_only_its_listeners() {
        let channel = Rc::new(FakeChannel::default());
        let other_hits = Rc::new(Cell::new(0));
        let counter = other_hits.clone();
        channel.on("ride-confirmed", Rc::new(move |_| counter.set(counter.get() + 1)));

        let mut sub = Subscription::new(channel.clone());
        sub.listen("ride-confirmed", |_| {});
        sub.listen("ride-started", |_| {});
        assert_eq!(channel.listeners.len(), 3);

        drop(sub);
        assert_eq!(channel.listeners.len(), 1);
        assert_eq!(channel.fire("ride-confirmed", json!({})), 1);
        assert_eq!(other_hits.get(), 1);
    }

    #[test]
    fn off_removes_every_listener_for_an_event() {
        let channel = FakeChannel::default();
        channel.on("ride-started", Rc::new(|_| {}));
        channel.on("ride-started", Rc::new(|_| {}));
        channel.on("new-ride", Rc::new(|_| {}));
        channel.off("ride-started");
        assert_eq!(channel.fire("ride-started", Value::Null), 0);
        assert_eq!(channel.fire("new-ride", Value::Null), 1);
    }

    #[test]
    fn endpoint_depends_on_where_the_page_is_served() {
        assert_eq!(
            realtime_endpoint("http:", "localhost", "localhost:8080", "http://localhost:4000/", "/api/socket.io"),
            "ws://localhost:4000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            realtime_endpoint("https:", "ride.example.com", "ride.example.com", "https://api.example.com", "/api/socket.io"),
            "wss://ride.example.com/api/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            realtime_endpoint("http:", "10.0.0.5", "10.0.0.5:8080", "http://localhost:4000", "/api/socket.io/"),
            "ws://10.0.0.5:8080/api/socket.io/?EIO=4&transport=websocket"
        );
    }
}
