use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("eepmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("eepmap")
        .styles(CLAP_STYLING)
        .about(
            "Crash-resumable BFS link crawler for the I2P overlay network. Harvests \
            .onion and clearweb links along the way without following them.",
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("The eepsite to start crawling from")
                .value_parser(clap::value_parser!(Url))
                .default_value("http://identiguy.i2p"),
        )
        .arg(
            arg!(-p --"proxy" <ADDR>)
                .required(false)
                .help("HTTP proxy of the local I2P router, as host:port")
                .default_value("127.0.0.1:4444"),
        )
        .arg(
            arg!(--"no-proxy")
                .required(false)
                .help("Connect directly instead of through the I2P proxy (debugging only)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-d --"max-depth" <DEPTH>)
                .required(false)
                .help("Maximum BFS depth from the start URL; 0 or negative crawls without limit")
                .value_parser(clap::value_parser!(i64))
                .default_value("5"),
        )
        .arg(
            arg!(-r --"retries" <ATTEMPTS>)
                .required(false)
                .help("Fetch attempts per URL before it is dropped for the run")
                .value_parser(clap::value_parser!(u32))
                .default_value("3"),
        )
        .arg(
            arg!(--"retry-delay" <SECONDS>)
                .required(false)
                .help("Base delay between retries; grows linearly with the attempt number")
                .value_parser(clap::value_parser!(u64))
                .default_value("5"),
        )
        .arg(
            arg!(--"delay" <SECONDS>)
                .required(false)
                .help("Pause between page fetches")
                .value_parser(clap::value_parser!(u64))
                .default_value("1"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout; I2P tunnels are slow, keep this generous")
                .value_parser(clap::value_parser!(u64))
                .default_value("240"),
        )
        .arg(
            arg!(-s --"state-dir" <PATH>)
                .required(false)
                .help("Directory holding the frontier and record files")
                .default_value("."),
        )
}
