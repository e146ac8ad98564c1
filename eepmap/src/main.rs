use clap::ArgMatches;
use eepmap::commands::command_argument_builder;
use eepmap::settings::config_from_matches;
use eepmap_core::{Crawler, print_banner};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();
    let quiet = matches.get_flag("quiet");

    tracing_subscriber::fmt::init();

    if !quiet {
        print_banner();
    }

    // Persistence failures are the only fatal path: once durable state
    // cannot be trusted, continuing would break crash-resume.
    if let Err(e) = run_crawl(&matches, quiet).await {
        eprintln!("✗ Crawl failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_crawl(matches: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let config = config_from_matches(matches);

    if !quiet {
        println!("Start URL: {}", config.start_url);
        match &config.proxy {
            Some(proxy) => println!("Proxy: http://{}", proxy),
            None => println!("Proxy: disabled (direct connections)"),
        }
        if config.max_depth > 0 {
            println!("Max depth: {}", config.max_depth);
        } else {
            println!("Max depth: unlimited");
        }
        println!("State dir: {}", config.state_dir.display());
        println!("Ensure your I2P router is running and fully bootstrapped.\n");
    }

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("starting crawl...");
        Some(pb)
    };

    let mut crawler = Crawler::new(config)?;
    if let Some(pb) = &spinner {
        let pb = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |url: String, depth: u32| {
            pb.set_message(format!("depth {}: {}", depth, url));
        }));
    }

    let summary = crawler.run().await?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    println!("\n✓ Crawl complete - the frontier is empty.\n");
    println!("  Pages visited:        {}", summary.pages_visited);
    println!("  Eepsites queued:      {}", summary.eepsites_queued);
    println!("  Onion links found:    {}", summary.onion_links_found);
    println!("  Clearweb links found: {}", summary.clearweb_links_found);
    println!("  Fetch failures:       {}", summary.fetch_failures);
    println!("\nRun again to resume: failed URLs are retried once another page links to them.");

    Ok(())
}
