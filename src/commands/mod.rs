//! Command implementations for the CLI
//!
//! - serve: Start the quote API server
//! - quote: Price a single job from the command line
//! - inspect: Show G-code metadata
//! - ledger: List saved quotes
//! - config: Configuration display and validation

pub mod config;
pub mod inspect;
pub mod ledger;
pub mod quote;
pub mod serve;
