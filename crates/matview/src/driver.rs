use crate::Result;

pub use matview_core::driver::{
    operation::{self, Operation},
    Driver, Response,
};

use matview_core::bail;
use std::sync::Arc;
use url::Url;

/// Connects a driver by URL scheme.
pub(crate) async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let url = Url::parse(url).map_err(anyhow::Error::from)?;

    match url.scheme() {
        "memory" => connect_memory(),
        "postgresql" => connect_postgresql(url.as_str()).await,
        scheme => bail!("unsupported database; scheme={scheme}; url={url}"),
    }
}

#[cfg(feature = "memory")]
fn connect_memory() -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(matview_driver_memory::Memory::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory() -> Result<Arc<dyn Driver>> {
    bail!("`memory` feature not enabled")
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = matview_driver_postgresql::PostgreSQL::connect(url).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &str) -> Result<Arc<dyn Driver>> {
    bail!("`postgresql` feature not enabled")
}
