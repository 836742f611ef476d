//! Runtime configuration, read from the environment.

use tracing::warn;

/// Environment variable holding the channel capacity of every store actor.
pub const CHANNEL_BUFFER_VAR: &str = "ORDER_SERVICE_CHANNEL_BUFFER";

const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of each store's request channel. Callers wait when it is full.
    pub channel_buffer: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl SystemConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing values use the defaults; invalid ones are logged and replaced by the
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let channel_buffer = match lookup(CHANNEL_BUFFER_VAR) {
            None => DEFAULT_CHANNEL_BUFFER,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        var = CHANNEL_BUFFER_VAR,
                        value = %raw,
                        default = DEFAULT_CHANNEL_BUFFER,
                        "Invalid channel buffer, using default"
                    );
                    DEFAULT_CHANNEL_BUFFER
                }
            },
        };
        Self { channel_buffer }
    }
}
