// ============================================================================
// SESSION CONTEXT - Acceso a los providers que instala la app
// ============================================================================

use yew::prelude::*;

use crate::components::channel_provider::ChannelContext;
use crate::components::session_provider::SessionContext;

/// Sesiones de rider y capitán. Solo bajo `SessionProvider`.
#[hook]
pub fn use_session_store() -> SessionContext {
    use_context::<SessionContext>().expect("use_session_store: SessionProvider not found")
}

/// Canal en tiempo real compartido. Solo bajo `ChannelProvider`.
#[hook]
pub fn use_channel() -> ChannelContext {
    use_context::<ChannelContext>().expect("use_channel: ChannelProvider not found")
}
