pub mod client;
pub mod rate_limiter;
pub mod retry;

pub use client::{PokeApiClient, PokeApiClientConfig};
pub use rate_limiter::UpstreamRateLimiter;
pub use retry::RetryPolicy;
