use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::storage::Storage;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

fn create_cache() -> Arc<dyn ObjectCache> {
    let config = &AppConfig::get().cache;
    warn!(
        "Using Moka (in-memory) cache, capacity {}, ttl {}s",
        config.max_capacity, config.default_ttl
    );
    Arc::new(MokaCacheWrapper::new(config))
}

/// 上传目录不存在时创建
fn ensure_upload_dir() -> Result<()> {
    let dir = &AppConfig::get().upload.dir;
    std::fs::create_dir_all(dir)
        .map_err(|e| PortalError::file_operation(format!("无法创建上传目录 {dir}: {e}")))?;
    info!("Upload directory ready at {}", dir);
    Ok(())
}

/// 准备服务器启动所需的存储与缓存，数据库迁移在此完成
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    ensure_upload_dir()?;

    let cache = create_cache();

    Ok(StartupContext { storage, cache })
}
