//! Startup checks
//!
//! The only fatal path of the agent lives here: if a required secret is
//! missing the loop is never entered and no remote service is contacted.

use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ConfigurationFailure;
use crate::repository::{MessageRepository, StatusRepository};
use crate::scheduler::StatusPoller;

/// Checks that every required secret is present
///
/// Each missing one is logged at critical severity by its variable name.
pub fn check_required_configuration(config: &Config) -> bool {
    let missing = config.missing_credentials();
    for name in &missing {
        error!(
            severity = "critical",
            "Required environment variable {} is missing or empty", name
        );
    }
    missing.is_empty()
}

/// Validates credentials, then builds the repositories and the poller
///
/// `connect` is only called once the check has passed, so a misconfigured
/// agent never constructs a client.
pub fn start<F>(config: &Config, connect: F) -> Result<StatusPoller, ConfigurationFailure>
where
    F: FnOnce(&Config) -> (Arc<dyn StatusRepository>, Arc<dyn MessageRepository>),
{
    if !check_required_configuration(config) {
        return Err(ConfigurationFailure {
            missing: config.missing_credentials(),
        });
    }

    let (statuses, messages) = connect(config);
    info!("Credentials present, poller ready");
    Ok(StatusPoller::new(config, statuses, messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PRACTICUM_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_TOKEN, test_config};
    use crate::repository::memory::{RecordingMessages, ScriptedStatuses};
    use crate::scheduler::poller::PollerState;

    #[test]
    fn test_complete_configuration_passes() {
        assert!(check_required_configuration(&test_config()));
    }

    #[test]
    fn test_each_missing_secret_fails() {
        for name in [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID] {
            let mut config = test_config();
            match name {
                PRACTICUM_TOKEN => config.practicum_token.clear(),
                TELEGRAM_TOKEN => config.telegram_token.clear(),
                _ => config.telegram_chat_id.clear(),
            }
            assert!(!check_required_configuration(&config), "{name}");
        }
    }

    #[test]
    fn test_missing_secret_never_connects() {
        let mut config = test_config();
        config.practicum_token.clear();

        let mut connected = false;
        let result = start(&config, |_| {
            connected = true;
            (
                Arc::new(ScriptedStatuses::default()) as Arc<dyn StatusRepository>,
                Arc::new(RecordingMessages::new()) as Arc<dyn MessageRepository>,
            )
        });

        let err = result.err().unwrap();
        assert_eq!(err.missing, vec![PRACTICUM_TOKEN]);
        assert!(!connected);
    }

    #[tokio::test]
    async fn test_start_builds_poller() {
        let statuses = Arc::new(ScriptedStatuses::default());
        let messages = Arc::new(RecordingMessages::new());

        let mut poller = start(&test_config(), |_| {
            (
                statuses.clone() as Arc<dyn StatusRepository>,
                messages.clone() as Arc<dyn MessageRepository>,
            )
        })
        .unwrap();

        assert_eq!(poller.state(), PollerState::Starting);
        poller.run_once().await.unwrap();
        assert_eq!(statuses.calls().len(), 1);
    }
}
