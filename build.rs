// Pasa las claves de `.env` a `option_env!` (src/config.rs).
// Una variable ya definida en el entorno de compilación tiene prioridad.

use std::env;
use std::fs;

const ENV_FILE: &str = ".env";

/// Claves que lee `AppConfig::from_env`
const CONFIG_KEYS: [&str; 10] = [
    "BACKEND_URL",
    "ENVIRONMENT",
    "REALTIME_PATH",
    "OLA_MAPS_API_KEY",
    "MAP_STYLE_URL",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "POSITION_POLL_INTERVAL_MS",
    "CAMERA_EASE_DURATION_MS",
];

/// `KEY=VALUE`, `export KEY=VALUE`, valor opcionalmente entre comillas
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some((key.trim(), value))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let Ok(contents) = fs::read_to_string(ENV_FILE) else {
        println!("cargo:warning=Sin {}: se usan los valores por defecto (ver .env.example)", ENV_FILE);
        return;
    };
    println!("cargo:rerun-if-changed={}", ENV_FILE);

    for (key, value) in contents.lines().filter_map(parse_line) {
        if !CONFIG_KEYS.contains(&key) {
            println!("cargo:warning={}: clave desconocida {}", ENV_FILE, key);
            continue;
        }
        if env::var_os(key).is_none() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
