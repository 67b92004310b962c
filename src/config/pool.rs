//! Pool configuration structure.

use serde::{Deserialize, Serialize};

/// Guard against misconfigured deployments asking for absurd thread counts.
const MAX_WORKER_COUNT: usize = 512;

/// Worker pool configuration.
///
/// The thread-init hook is not part of the configuration because it is not
/// serializable; it is attached through
/// [`crate::builders::PoolBuilder::with_thread_init`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of worker threads. `0` runs every submitted task inline on
    /// the caller's thread.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Maximum queued tasks before submitters block. `0` means unbounded.
    #[serde(default)]
    pub max_queue_size: usize,
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            max_queue_size: 0,
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count > MAX_WORKER_COUNT {
            return Err(format!(
                "worker_count {} exceeds the maximum of {MAX_WORKER_COUNT}",
                self.worker_count
            ));
        }
        Ok(())
    }

    /// Parse pool configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = PoolConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.worker_count >= 1);
        assert_eq!(cfg.max_queue_size, 0);
    }

    #[test]
    fn test_excessive_worker_count_is_rejected() {
        let cfg = PoolConfig {
            worker_count: 100_000,
            max_queue_size: 0,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let cfg = PoolConfig::from_json_str(r#"{"worker_count": 4, "max_queue_size": 32}"#)
            .expect("valid config");
        assert_eq!(cfg.worker_count, 4);
        assert_eq!(cfg.max_queue_size, 32);

        // Omitted fields fall back to defaults.
        let cfg = PoolConfig::from_json_str("{}").expect("empty config");
        assert_eq!(cfg.max_queue_size, 0);

        assert!(PoolConfig::from_json_str(r#"{"worker_count": 999999}"#).is_err());
        assert!(PoolConfig::from_json_str("not json").is_err());
    }
}
