use sn_logger::{Logger, LoggerError, LoggingConfig};

#[test]
fn only_the_first_install_wins() {
    let logger = Logger::from_config("first", &LoggingConfig::default())
        .expect("console-only config should install");
    assert!(logger.guard().is_none());

    let second = Logger::builder().name("second").init();
    assert!(matches!(second, Err(LoggerError::Subscriber { .. })), "got {second:?}");

    let unknown_level = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    let invalid = Logger::from_config("third", &unknown_level);
    assert!(
        matches!(invalid, Err(LoggerError::InvalidConfiguration { .. })),
        "configuration errors are reported before the subscriber check, got {invalid:?}"
    );
}
