pub mod classify;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod normalize;
pub mod store;

pub use classify::LinkKind;
pub use crawler::{CrawlConfig, CrawlSummary, Crawler};
pub use error::CrawlError;
pub use fetch::FetchResponse;
pub use frontier::{Frontier, FrontierEntry};
pub use store::RecordStore;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!("{}", "  eepmap".cyan().bold());
    println!("{}", "  BFS link crawler for the I2P overlay network".cyan());
    println!();
}
