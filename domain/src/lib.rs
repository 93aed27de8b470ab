pub mod allocation;
pub mod core;
pub mod dataset;
pub mod holding;
pub mod integrity;
pub mod performance;
mod sample;
pub mod summary;

pub use crate::{
    core::PortfolioStore,
    dataset::{DatasetError, PortfolioDataset},
    integrity::IntegrityError,
};
