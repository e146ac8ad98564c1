// Tests for CLI argument parsing and configuration mapping

use eepmap::commands::command_argument_builder;
use eepmap::settings::config_from_matches;
use std::time::Duration;

#[test]
fn test_command_builder_is_well_formed() {
    command_argument_builder().debug_assert();
}

#[test]
fn test_default_configuration_matches_stock_crawl() {
    let matches = command_argument_builder().get_matches_from(["eepmap"]);
    let config = config_from_matches(&matches);

    // the url value parser canonicalizes the default (trailing slash)
    assert_eq!(config.start_url, "http://identiguy.i2p/");
    assert_eq!(config.proxy.as_deref(), Some("127.0.0.1:4444"));
    assert_eq!(config.max_depth, 5);
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.retry_base_delay, Duration::from_secs(5));
    assert_eq!(config.politeness_delay, Duration::from_secs(1));
    assert_eq!(config.request_timeout, Duration::from_secs(240));
    assert_eq!(config.state_dir.to_str(), Some("."));
}

#[test]
fn test_no_proxy_disables_the_proxy() {
    let matches = command_argument_builder().get_matches_from(["eepmap", "--no-proxy"]);
    let config = config_from_matches(&matches);
    assert!(config.proxy.is_none());
}

#[test]
fn test_overridden_values_flow_through() {
    let matches = command_argument_builder().get_matches_from([
        "eepmap",
        "-u",
        "http://stats.i2p",
        "-p",
        "10.0.0.2:4444",
        "-d",
        "0",
        "-r",
        "5",
        "--retry-delay",
        "2",
        "--delay",
        "0",
        "--timeout",
        "30",
        "-s",
        "/var/lib/eepmap",
    ]);
    let config = config_from_matches(&matches);

    assert_eq!(config.start_url, "http://stats.i2p/");
    assert_eq!(config.proxy.as_deref(), Some("10.0.0.2:4444"));
    assert_eq!(config.max_depth, 0);
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.retry_base_delay, Duration::from_secs(2));
    assert_eq!(config.politeness_delay, Duration::from_secs(0));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.state_dir.to_str(), Some("/var/lib/eepmap"));
}

#[test]
fn test_quiet_flag_parses() {
    let matches = command_argument_builder().get_matches_from(["eepmap", "-q"]);
    assert!(matches.get_flag("quiet"));
}
