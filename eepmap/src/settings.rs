use clap::ArgMatches;
use eepmap_core::CrawlConfig;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Builds the crawl configuration from parsed CLI arguments. Every field
/// has a clap default, so the unwraps cannot fire.
pub fn config_from_matches(matches: &ArgMatches) -> CrawlConfig {
    let start_url = matches.get_one::<Url>("url").unwrap().to_string();

    let proxy = if matches.get_flag("no-proxy") {
        None
    } else {
        matches.get_one::<String>("proxy").cloned()
    };

    let state_dir = PathBuf::from(
        shellexpand::tilde(matches.get_one::<String>("state-dir").unwrap()).as_ref(),
    );

    CrawlConfig {
        start_url,
        proxy,
        max_depth: *matches.get_one::<i64>("max-depth").unwrap(),
        max_attempts: *matches.get_one::<u32>("retries").unwrap(),
        retry_base_delay: Duration::from_secs(*matches.get_one::<u64>("retry-delay").unwrap()),
        politeness_delay: Duration::from_secs(*matches.get_one::<u64>("delay").unwrap()),
        request_timeout: Duration::from_secs(*matches.get_one::<u64>("timeout").unwrap()),
        state_dir,
    }
}
