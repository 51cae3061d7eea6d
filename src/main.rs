use ride_client::config::CONFIG;
use ride_client::App;

fn main() {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_production() { log::Level::Info } else { log::Level::Debug };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Iniciando ride client ({})", CONFIG.environment);

    yew::Renderer::<App>::new().render();
}
