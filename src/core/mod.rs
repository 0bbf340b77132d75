pub mod aggregator;
pub mod catalog;
pub mod rating;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{NewRating, Phase, Rating, SortKey, Tool};
pub use crate::domain::ports::{CatalogStore, ConfigProvider};
pub use crate::utils::error::Result;
