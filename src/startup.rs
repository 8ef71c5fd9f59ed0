use std::io::Write;

use crate::configuration::Settings;
use crate::error::CollectorError;
use crate::health::HealthCollector;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 2;

/// Run one check with already-resolved settings and report the outcome.
///
/// Prints `ok` to `stdout` on success. Any error that escaped the run, or a
/// failure to print `ok`, is printed to `stderr` as `error <message>` and
/// yields `EXIT_FAILURE`.
pub fn run(
    settings: Result<Settings, CollectorError>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> u8 {
    let outcome = settings
        .and_then(|settings| HealthCollector::from_settings(&settings))
        .and_then(|collector| collector.run());

    let reported = outcome.and_then(|timestamp| {
        tracing::debug!(timestamp, "Synthetic check finished");
        writeln!(stdout, "ok")
            .and_then(|_| stdout.flush())
            .map_err(CollectorError::Io)
    });

    match reported {
        Ok(()) => EXIT_OK,
        Err(e) => {
            tracing::error!(error = %e, "Synthetic check failed");
            let _ = writeln!(stderr, "error {e}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn test_unreachable_backend_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_health.prom");
        let settings = Settings::new(&closed_port_url(), path.clone());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = run(Ok(settings), &mut out, &mut err);

        assert_eq!(code, EXIT_OK);
        assert_eq!(String::from_utf8(out).unwrap(), "ok\n");
        assert!(err.is_empty());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("system_health_liveness 0 "));
        assert!(text.contains("system_health_last_check_seconds "));
    }

    #[test]
    fn test_write_failure_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("metrics");
        std::fs::write(&blocker, "file in the way").unwrap();
        let settings = Settings::new(&closed_port_url(), blocker.join("system_health.prom"));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = run(Ok(settings), &mut out, &mut err);

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(String::from_utf8(err).unwrap().starts_with("error "));
    }

    struct ClosedStdout;

    impl Write for ClosedStdout {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_ok_write_exits_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(&closed_port_url(), dir.path().join("system_health.prom"));
        let mut err = Vec::new();

        let code = run(Ok(settings), &mut ClosedStdout, &mut err);

        assert_eq!(code, EXIT_FAILURE);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("error "));
        assert!(err.contains("stdout closed"));
    }

    #[test]
    fn test_configuration_error_exits_with_two() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let settings = Err(CollectorError::Config(config::ConfigError::NotFound(
            "backend_url".to_string(),
        )));

        let code = run(settings, &mut out, &mut err);

        assert_eq!(code, EXIT_FAILURE);
        assert!(String::from_utf8(err).unwrap().contains("backend_url"));
    }
}
