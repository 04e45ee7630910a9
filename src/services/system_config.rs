use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::config::Settings;
use crate::services::{refresh_server_version, InMemoryRegistry};
use std::sync::Arc;

/// Source of the maintenance flag gating `/properties`
pub trait MaintenanceFlag: Send + Sync {
    fn is_in_maintenance(&self) -> bool;
}

/// Runtime system configuration, mutated from outside the request path
#[derive(Debug, Default)]
pub struct SystemConfig {
    in_maintenance: AtomicBool,
}

impl SystemConfig {
    pub fn new(in_maintenance: bool) -> Self {
        Self {
            in_maintenance: AtomicBool::new(in_maintenance),
        }
    }

    pub fn set_in_maintenance(&self, in_maintenance: bool) {
        let previous = self.in_maintenance.swap(in_maintenance, Ordering::SeqCst);
        if previous != in_maintenance {
            info!("Maintenance mode changed: {} -> {}", previous, in_maintenance);
        }
    }

    pub fn apply(&self, settings: &Settings) {
        self.set_in_maintenance(settings.system.in_maintenance);
    }
}

impl MaintenanceFlag for SystemConfig {
    fn is_in_maintenance(&self) -> bool {
        self.in_maintenance.load(Ordering::SeqCst)
    }
}

/// Applies freshly loaded settings, keeping the current values on failure
pub fn apply_reloaded_settings<E: std::fmt::Display>(
    system_config: &SystemConfig,
    registry: &InMemoryRegistry,
    settings: Result<Settings, E>,
) {
    match settings {
        Ok(settings) => {
            system_config.apply(&settings);
            if let Err(e) = refresh_server_version(registry, &settings.runtime) {
                warn!("Failed to refresh server version: {}", e);
            }
        }
        Err(e) => warn!("Failed to reload configuration, keeping current values: {}", e),
    }
}

/// Re-reads the configuration on every SIGHUP.
///
/// The handler is installed before returning, so a SIGHUP sent right after
/// this call is not lost.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(
    system_config: Arc<SystemConfig>,
    registry: Arc<InMemoryRegistry>,
) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            info!("Received SIGHUP, reloading configuration");
            apply_reloaded_settings(&system_config, &registry, Settings::new());
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(
    _system_config: Arc<SystemConfig>,
    _registry: Arc<InMemoryRegistry>,
) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_OBJECT_NAME, DEFAULT_VERSION_ATTRIBUTE};
    use crate::services::{register_server_info, RuntimeVersionService};
    use tokio::time::{sleep, Duration};

    fn server_info_registry(version: &str) -> Arc<InMemoryRegistry> {
        let registry = Arc::new(InMemoryRegistry::new());
        register_server_info(
            &registry,
            DEFAULT_OBJECT_NAME,
            DEFAULT_VERSION_ATTRIBUTE,
            version,
        )
        .unwrap();
        registry
    }

    fn registered_version(registry: &Arc<InMemoryRegistry>) -> String {
        RuntimeVersionService::new(
            registry.clone(),
            DEFAULT_OBJECT_NAME,
            DEFAULT_VERSION_ATTRIBUTE,
        )
        .server_version()
        .unwrap()
    }

    #[test]
    fn test_flag_is_read_live() {
        let config = SystemConfig::new(false);
        assert!(!config.is_in_maintenance());

        config.set_in_maintenance(true);
        assert!(config.is_in_maintenance());

        config.set_in_maintenance(false);
        assert!(!config.is_in_maintenance());
    }

    #[test]
    fn test_reload_applies_settings() {
        let config = SystemConfig::default();
        let registry = server_info_registry("23.0.0.1");
        let mut settings = Settings::default();
        settings.system.in_maintenance = true;
        settings.runtime.server_version = Some("24.0.0.1".to_string());

        apply_reloaded_settings::<String>(&config, &registry, Ok(settings));
        assert!(config.is_in_maintenance());
        assert_eq!(registered_version(&registry), "24.0.0.1");
    }

    #[test]
    fn test_reload_failure_keeps_current_values() {
        let config = SystemConfig::new(true);
        let registry = server_info_registry("23.0.0.1");

        apply_reloaded_settings(
            &config,
            &registry,
            Err::<Settings, _>("config/default not found"),
        );
        assert!(config.is_in_maintenance());
        assert_eq!(registered_version(&registry), "23.0.0.1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sighup_reloads_configuration() {
        let config = Arc::new(SystemConfig::new(false));
        let registry = server_info_registry("23.0.0.1");
        spawn_reload_on_hangup(config.clone(), registry.clone()).unwrap();

        std::env::set_var("APP_SYSTEM__IN_MAINTENANCE", "true");
        std::env::set_var("APP_RUNTIME__SERVER_VERSION", "24.0.0.1");
        let status = std::process::Command::new("kill")
            .args(["-HUP", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        for _ in 0..100 {
            if config.is_in_maintenance() {
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        std::env::remove_var("APP_SYSTEM__IN_MAINTENANCE");
        std::env::remove_var("APP_RUNTIME__SERVER_VERSION");

        assert!(config.is_in_maintenance());
        assert_eq!(registered_version(&registry), "24.0.0.1");
    }
}
