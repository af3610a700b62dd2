//! `tracing` events for statement construction.
//!
//! Enable via the crate feature: `dbqb = { features = ["tracing"] }` (on by
//! default). Without the feature every function here compiles to nothing.
//!
//! Targets:
//! - `dbqb.sql`: built statements (debug) and build failures (debug)
//! - `dbqb.sanitize`: rejected input (warn). The raw input is never logged.

use crate::action::Action;
use crate::config::LogConfig;
use crate::error::QbError;
use crate::sanitize::InputKind;

#[cfg(feature = "tracing")]
pub(crate) fn statement_built(log: &LogConfig, action: Action, conditions: usize, sql: &str) {
    if !log.enabled {
        return;
    }
    let sql = log.truncate_sql(sql);
    tracing::debug!(
        target: "dbqb.sql",
        action = %action,
        conditions,
        sql = %sql,
        "statement built"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_log: &LogConfig, _action: Action, _conditions: usize, _sql: &str) {}

#[cfg(feature = "tracing")]
pub(crate) fn build_failed(log: &LogConfig, action: Action, err: &QbError) {
    if !log.enabled {
        return;
    }
    tracing::debug!(
        target: "dbqb.sql",
        action = %action,
        code = err.code(),
        error = %err,
        "statement build failed"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn build_failed(_log: &LogConfig, _action: Action, _err: &QbError) {}

#[cfg(feature = "tracing")]
pub(crate) fn input_rejected(log: &LogConfig, kind: InputKind, err: &QbError) {
    if !log.enabled {
        return;
    }
    let reason = match err {
        QbError::UnsafeInput { reason, .. } => reason.as_str(),
        _ => "sanitizer failed",
    };
    tracing::warn!(
        target: "dbqb.sanitize",
        kind = %kind,
        reason,
        "input rejected"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn input_rejected(_log: &LogConfig, _kind: InputKind, _err: &QbError) {}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records formatted events.
    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rejection_logs_reason_without_raw_input() {
        let err = QbError::unsafe_input(InputKind::Value, "s3cr3t-payload", "contains ';'");
        let logged = capture(|| input_rejected(&LogConfig::default(), InputKind::Value, &err));
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("dbqb.sanitize"), "{logged}");
        assert!(logged.contains("input rejected"), "{logged}");
        assert!(logged.contains("contains ';'"), "{logged}");
        assert!(!logged.contains("s3cr3t-payload"), "{logged}");
    }

    #[test]
    fn built_statement_is_truncated() {
        let log = LogConfig::new().max_sql_length(10);
        let logged = capture(|| {
            statement_built(&log, Action::Select, 2, "select * from `Users` where `a`='1'")
        });
        assert!(logged.contains("DEBUG"), "{logged}");
        assert!(logged.contains("dbqb.sql"), "{logged}");
        assert!(logged.contains("select * f..."), "{logged}");
        assert!(!logged.contains("`Users`"), "{logged}");
        assert!(logged.contains("conditions=2"), "{logged}");
    }

    #[test]
    fn build_failure_logs_error_code() {
        let log = LogConfig::default();
        let logged = capture(|| build_failed(&log, Action::Insert, &QbError::MissingTable));
        assert!(logged.contains("statement build failed"), "{logged}");
        assert!(logged.contains("code=6"), "{logged}");
    }

    #[test]
    fn disabled_logging_emits_nothing() {
        let log = LogConfig::new().enabled(false);
        let err = QbError::unsafe_input(InputKind::Table, "t`", "backtick");
        let logged = capture(|| {
            statement_built(&log, Action::Delete, 0, "delete from `t`");
            build_failed(&log, Action::None, &QbError::MissingAction);
            input_rejected(&log, InputKind::Table, &err);
        });
        assert!(logged.is_empty(), "{logged}");
    }
}
