//! SQLite storage implementation for portfolios.

mod model;
mod repository;

pub use model::{NewPortfolioDB, PortfolioDB};
pub use repository::PortfolioRepository;
