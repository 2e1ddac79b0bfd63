//! Refresh scheduling.
//!
//! Every service has its own one-shot timer. When it fires the
//! orchestrator fetches and asks for the next one, so intervals are
//! measured from the previous firing rather than a fixed grid.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::config::{GlobalConfig, ServiceSpec};
use crate::util::parse_duration;

use super::event::Event;

/// Interval used when nothing is configured or the configured value is
/// unusable.
pub const FALLBACK_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Spinner animation cadence.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Effective refresh interval for a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterval {
    pub interval: Duration,
    /// Set when a configured value had to be replaced by the fallback.
    pub warning: Option<String>,
}

/// Resolves the refresh interval of `service`: its own override, else the
/// global default, else [`FALLBACK_REFRESH_INTERVAL`].
///
/// A value that is set but does not parse, or is not positive, falls back
/// to 30 seconds with a warning.
pub fn resolve_interval(service: &ServiceSpec, config: &GlobalConfig) -> ResolvedInterval {
    let configured = non_empty(service.refresh_interval.as_deref())
        .or_else(|| non_empty(config.refresh_interval.as_deref()));

    let Some(raw) = configured else {
        return ResolvedInterval {
            interval: FALLBACK_REFRESH_INTERVAL,
            warning: None,
        };
    };

    let reason = match parse_duration(raw) {
        Ok(interval) if !interval.is_zero() => {
            return ResolvedInterval {
                interval,
                warning: None,
            };
        }
        Ok(_) => "must be positive".to_string(),
        Err(e) => e.message,
    };

    ResolvedInterval {
        interval: FALLBACK_REFRESH_INTERVAL,
        warning: Some(format!(
            "Invalid refresh interval '{}' for service {} ({}). Defaulting to {}s.",
            raw,
            service.title,
            reason,
            FALLBACK_REFRESH_INTERVAL.as_secs()
        )),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Sends `event` on `tx` once, `after` from now, unless `shutdown` is
/// cancelled first.
pub fn arm_timer(
    tx: UnboundedSender<Event>,
    after: Duration,
    event: Event,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = tokio::time::sleep(after) => {
                trace!(?event, "timer fired");
                // Receiver gone means the dashboard is shutting down.
                let _ = tx.send(event);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn service(interval: Option<&str>) -> ServiceSpec {
        ServiceSpec {
            url: "http://localhost".to_string(),
            title: "svc".to_string(),
            refresh_interval: interval.map(str::to_string),
            ..ServiceSpec::default()
        }
    }

    fn global(interval: Option<&str>) -> GlobalConfig {
        GlobalConfig {
            refresh_interval: interval.map(str::to_string),
            services: Vec::new(),
        }
    }

    #[test]
    fn test_service_override_wins() {
        let r = resolve_interval(&service(Some("5s")), &global(Some("1m")));
        assert_eq!(r.interval, Duration::from_secs(5));
        assert!(r.warning.is_none());
    }

    #[test]
    fn test_global_default_used_when_unset() {
        let r = resolve_interval(&service(None), &global(Some("1m")));
        assert_eq!(r.interval, Duration::from_secs(60));

        let r = resolve_interval(&service(Some("")), &global(Some("2s")));
        assert_eq!(r.interval, Duration::from_secs(2));
    }

    #[test]
    fn test_nothing_configured_is_silent_fallback() {
        let r = resolve_interval(&service(None), &global(None));
        assert_eq!(r.interval, FALLBACK_REFRESH_INTERVAL);
        assert!(r.warning.is_none());

        let r = resolve_interval(&service(Some("")), &global(Some("  ")));
        assert_eq!(r.interval, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warning() {
        for bad in ["not-a-duration", "-5s", "0s", "0", "10"] {
            let r = resolve_interval(&service(Some(bad)), &global(Some("1m")));
            assert_eq!(r.interval, Duration::from_secs(30), "input {:?}", bad);
            let warning = r.warning.expect("warning expected");
            assert!(warning.contains(bad), "{}", warning);
            assert!(warning.contains("svc"), "{}", warning);
        }
    }

    #[test]
    fn test_resolution_is_per_service() {
        let config = global(Some("10s"));
        let bad = resolve_interval(&service(Some("bogus")), &config);
        let good = resolve_interval(&service(None), &config);
        assert_eq!(bad.interval, Duration::from_secs(30));
        assert_eq!(good.interval, Duration::from_secs(10));
        assert!(good.warning.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_once_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        arm_timer(
            tx,
            Duration::from_secs(5),
            Event::RefreshDue { index: 2 },
            token,
        );

        let early = tokio::time::timeout(Duration::from_millis(4_900), rx.recv()).await;
        assert!(early.is_err(), "timer fired early");

        match rx.recv().await {
            Some(Event::RefreshDue { index }) => assert_eq!(index, 2),
            other => panic!("unexpected {:?}", other),
        }
        // Sender dropped with the task: exactly one event.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let handle = arm_timer(tx, Duration::from_secs(1), Event::SpinnerTick, token.clone());

        token.cancel();
        handle.await.unwrap();
        assert!(rx.recv().await.is_none());
    }
}
