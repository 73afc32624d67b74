use thiserror::Error;

/// Failures that abort bootstrap and trigger the empty fallback
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to fetch current user: {0:#}")]
    IdentityFetch(#[source] anyhow::Error),

    #[error("failed to fetch properties: {0:#}")]
    PropertyFetch(#[source] anyhow::Error),
}
