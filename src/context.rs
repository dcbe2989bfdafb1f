use crate::compiler::RouteCompiler;
use crate::config::RouterConfig;
use crate::registry::ViewRegistry;

/// 路由核心的只读上下文：配置 + 视图注册表
///
/// 启动时构建一次，之后在守卫、会话和导航器之间共享。
#[derive(Debug, Clone)]
pub struct RouterContext<V> {
    config: RouterConfig,
    registry: ViewRegistry<V>,
}

impl<V: Clone> RouterContext<V> {
    pub fn new(config: RouterConfig, registry: ViewRegistry<V>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn registry(&self) -> &ViewRegistry<V> {
        &self.registry
    }

    pub fn compiler(&self) -> RouteCompiler<'_, V> {
        RouteCompiler::new(&self.registry, &self.config)
    }
}
