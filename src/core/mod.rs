//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod enrich;
pub mod exclusions;
pub mod log;
pub mod pacing;
pub mod price;
pub mod resolver;
pub mod wallet;

// Re-export main types for cleaner imports
pub use cache::QuoteCache;
pub use enrich::{EnrichedPortfolio, EnrichedRow, PortfolioEnricher};
pub use exclusions::ExclusionRegistry;
pub use pacing::RequestPacer;
pub use price::{PriceSource, QuoteOutcome, Symbol};
pub use resolver::PriceResolver;
pub use wallet::{WalletRow, WalletSource};
