// ============================================================================
// CHANNEL PROVIDER - Dueño del único canal en tiempo real de la app
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::services::realtime::realtime_endpoint;
use crate::services::{ChannelError, ChannelManager, SocketChannel, SocketConnector};

#[derive(Clone)]
pub struct ChannelContext {
    manager: Rc<ChannelManager<SocketConnector>>,
}

impl PartialEq for ChannelContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl ChannelContext {
    pub fn get_or_create(&self) -> Result<Rc<SocketChannel>, ChannelError> {
        self.manager.get_or_create()
    }

    pub fn close(&self) {
        self.manager.close();
    }
}

fn connector() -> SocketConnector {
    SocketConnector::for_browser().unwrap_or_else(|| {
        // Sin window.location (no pasa en un navegador): se asume desarrollo local
        SocketConnector::new(realtime_endpoint(
            "http:",
            "localhost",
            "localhost",
            &CONFIG.backend_url,
            &CONFIG.realtime_path,
        ))
    })
}

#[derive(Properties, PartialEq)]
pub struct ChannelProviderProps {
    pub children: Children,
}

#[function_component(ChannelProvider)]
pub fn channel_provider(props: &ChannelProviderProps) -> Html {
    let context = use_memo((), |_| ChannelContext {
        manager: Rc::new(ChannelManager::new(connector())),
    });

    {
        let context = context.clone();
        use_effect_with((), move |_| move || context.close());
    }

    html! {
        <ContextProvider<ChannelContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<ChannelContext>>
    }
}
