//! Remote classifier client and response normalization.

mod client;
mod normalize;

pub use client::ClassifierClient;
pub use normalize::{normalize, Sentiment};
