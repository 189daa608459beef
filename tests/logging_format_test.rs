//! Integration tests for logging initialization.

use walletscope::core::logging::{self, LogFormat, LogLevel, LogSettings};

#[test]
fn init_human_then_json_is_a_no_op_the_second_time() {
    logging::init(&LogSettings {
        level: LogLevel::Debug,
        format: LogFormat::Human,
        file: None,
    });
    logging::init(&LogSettings {
        level: LogLevel::Trace,
        format: LogFormat::Json,
        file: None,
    });
    tracing::debug!(network = "ethereum", "logging initialized");
}

#[test]
fn filter_directive_is_scoped_to_crate() {
    let settings = LogSettings {
        level: LogLevel::Info,
        format: LogFormat::Compact,
        file: None,
    };
    assert_eq!(settings.filter_directive(), "walletscope=info");
}

#[test]
fn json_output_flag_forces_json_format() {
    let settings = LogSettings::resolve(Some("error"), true, false);
    assert_eq!(settings.format, LogFormat::Json);
    assert_eq!(settings.level, LogLevel::Error);
}
