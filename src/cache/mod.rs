pub mod object_cache;
pub mod register;
pub mod traits;

use std::sync::Arc;

pub use traits::{CacheResult, ObjectCache, get_object, insert_object};

use crate::config::AppConfig;
use crate::errors::{CourseStudioError, Result};

/// 注册缓存插件，插件在进程启动前通过 ctor 自动登记
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CourseStudioError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// 按配置创建缓存，失败时回退到内存缓存
pub async fn init_object_cache() -> Result<Arc<dyn ObjectCache>> {
    register::debug_object_cache_registry();

    let cache_type = AppConfig::get().cache.cache_type.as_str();
    let constructor = register::get_object_cache_plugin(cache_type).ok_or_else(|| {
        CourseStudioError::cache_plugin_not_found(format!("缓存插件 {cache_type} 未注册"))
    });

    let cache = match constructor {
        Ok(constructor) => match constructor().await {
            Ok(cache) => cache,
            Err(e) if cache_type != "moka" => {
                tracing::warn!("{}，回退到 moka", e);
                fallback_cache().await?
            }
            Err(e) => return Err(e),
        },
        Err(e) => {
            tracing::warn!("{}，回退到 moka", e);
            fallback_cache().await?
        }
    };

    tracing::info!("Object cache initialized: {}", cache_type);
    Ok(Arc::from(cache))
}

async fn fallback_cache() -> Result<Box<dyn ObjectCache>> {
    let constructor = register::get_object_cache_plugin("moka")
        .ok_or_else(|| CourseStudioError::cache_plugin_not_found("moka 缓存插件未注册"))?;
    constructor().await
}
