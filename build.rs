use std::env;
use std::fs;
use std::path::Path;

/// Claves que el cliente lee con `option_env!`
const CONFIG_KEYS: [&str; 5] = [
    "BACKEND_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "REDIRECT_DELAY_MS",
    "LOGOUT_ON_UNAUTHORIZED",
];

fn main() {
    // Cargar variables de entorno desde .env si existe
    let env_file = Path::new(".env");

    if let Ok(contents) = fs::read_to_string(env_file) {
        println!("cargo:rerun-if-changed=.env");

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // KEY=VALUE, con o sin `export` y comillas
            let line = line.strip_prefix("export ").unwrap_or(line);
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = unquote(value.trim());

                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida {}", key);
                    continue;
                }

                // Lo definido en el entorno manda sobre el .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default values (backend http://localhost:8000/api).");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}
