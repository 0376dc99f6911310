//! Host application installer.
//!
//! Registers this executable in the host's `claude_desktop_config.json` so
//! the host launches it with `serve`. Only macOS and Windows have a known
//! config location.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::types::FatalError;

/// Key under `mcpServers` this server registers itself as.
pub const SERVER_KEY: &str = "mcprestapis";

const HOST_DIR: &str = "Claude";
const HOST_CONFIG_FILE: &str = "claude_desktop_config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Result<Self, FatalError> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a supported platform.
    pub fn from_os(os: &str) -> Result<Self, FatalError> {
        match os {
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(FatalError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Host config path: `~/Library/Application Support/Claude/...` on macOS,
    /// `%APPDATA%\Claude\...` on Windows.
    pub fn host_config_path(&self) -> Result<PathBuf, FatalError> {
        let base = dirs::config_dir().ok_or_else(|| {
            FatalError::install(format!("no config directory available on {:?}", self))
        })?;
        Ok(base.join(HOST_DIR).join(HOST_CONFIG_FILE))
    }
}

/// Launch entry written under `mcpServers`.
pub fn server_entry(command: &Path) -> Value {
    json!({
        "command": command.to_string_lossy(),
        "args": ["serve"],
    })
}

/// Insert or replace this server's entry in the host config at `config_path`,
/// preserving everything else in the file.
pub fn install_into(config_path: &Path, command: &Path) -> Result<(), FatalError> {
    let mut config = match std::fs::read_to_string(config_path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %config_path.display(), "existing config unreadable, starting fresh");
                Map::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("Creating new config file");
            Map::new()
        }
        Err(e) => {
            return Err(FatalError::install(format!(
                "failed to read {}: {}",
                config_path.display(),
                e
            )))
        }
    };

    let servers = config
        .entry("mcpServers")
        .or_insert_with(|| Value::Object(Map::new()));
    if !servers.is_object() {
        *servers = Value::Object(Map::new());
    }
    if let Value::Object(servers) = servers {
        servers.insert(SERVER_KEY.to_string(), server_entry(command));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FatalError::install(format!("failed to create {}: {}", parent.display(), e))
        })?;
    }
    let pretty = serde_json::to_string_pretty(&Value::Object(config))
        .map_err(|e| FatalError::install(e.to_string()))?;
    std::fs::write(config_path, pretty).map_err(|e| {
        FatalError::install(format!("failed to write {}: {}", config_path.display(), e))
    })?;

    tracing::info!(path = %config_path.display(), command = %command.display(), "Updated config");
    Ok(())
}

/// Install into the current platform's host config, or into `override_path`
/// when given. Returns the path written.
pub fn install(override_path: Option<&Path>) -> Result<PathBuf, FatalError> {
    let config_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => Platform::current()?.host_config_path()?,
    };
    let command = std::env::current_exe()
        .map_err(|e| FatalError::install(format!("cannot locate executable: {}", e)))?;
    install_into(&config_path, &command)?;
    Ok(config_path)
}
