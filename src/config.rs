//! 路由运行时配置
//!
//! 所有字段都有默认值，缺省即为管理控制台的约定目录结构。

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_HOME_PATH: &str = "/home";
const DEFAULT_REDIRECT_QUERY_KEY: &str = "redirect";
const DEFAULT_SOURCE_ROOT: &str = "/src";
const DEFAULT_FEATURE_VIEW_DIR: &str = "/src/views";
const DEFAULT_LAYOUT_VIEW_DIR: &str = "/src/components";
const DEFAULT_VIEW_INDEX_SUFFIX: &str = "/index.vue";
const DEFAULT_NOT_FOUND_VIEW: &str = "/src/views/404/index.vue";
const DEFAULT_NOT_FOUND_TITLE: &str = "404";
const DEFAULT_MAX_DEPTH: usize = 32;
const DEFAULT_MAX_REDIRECTS: usize = 8;

/// 路由配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// 登录页路径
    pub login_path: String,
    /// 首页路径（已登录用户访问登录页时的去向）
    pub home_path: String,
    /// 携带原始目标地址的查询参数名
    pub redirect_query_key: String,
    /// 组件地址的根命名空间，对应 `component` 字段的查找前缀
    pub source_root: String,
    /// 业务视图目录
    pub feature_view_dir: String,
    /// 布局视图目录
    pub layout_view_dir: String,
    /// 约定的视图入口文件后缀
    pub view_index_suffix: String,
    /// 规范的 404 视图
    pub not_found_view: String,
    pub not_found_title: String,
    /// 路由编译的最大递归深度
    pub max_depth: usize,
    /// 单次导航允许的最大重定向次数
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            redirect_query_key: DEFAULT_REDIRECT_QUERY_KEY.to_string(),
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            feature_view_dir: DEFAULT_FEATURE_VIEW_DIR.to_string(),
            layout_view_dir: DEFAULT_LAYOUT_VIEW_DIR.to_string(),
            view_index_suffix: DEFAULT_VIEW_INDEX_SUFFIX.to_string(),
            not_found_view: DEFAULT_NOT_FOUND_VIEW.to_string(),
            not_found_title: DEFAULT_NOT_FOUND_TITLE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RouterConfig {
    /// 从 TOML 文本加载配置并校验
    pub fn from_toml_str(text: &str) -> RouterResult<Self> {
        let config: RouterConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RouterResult<()> {
        let absolute = [
            ("login_path", &self.login_path),
            ("home_path", &self.home_path),
            ("source_root", &self.source_root),
            ("feature_view_dir", &self.feature_view_dir),
            ("layout_view_dir", &self.layout_view_dir),
            ("view_index_suffix", &self.view_index_suffix),
            ("not_found_view", &self.not_found_view),
        ];
        for (field, value) in absolute {
            if !value.starts_with('/') {
                return Err(RouterError::config(format!(
                    "{field} must start with '/', got '{value}'"
                )));
            }
        }

        if self.login_path == self.home_path {
            return Err(RouterError::config("login_path and home_path must differ"));
        }
        if self.redirect_query_key.trim().is_empty() {
            return Err(RouterError::config("redirect_query_key cannot be empty"));
        }
        if self.max_depth == 0 {
            return Err(RouterError::config("max_depth must be positive"));
        }
        if self.max_redirects == 0 {
            return Err(RouterError::config("max_redirects must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RouterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.not_found_view, "/src/views/404/index.vue");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RouterConfig::from_toml_str(
            r#"
            home_path = "/dashboard"
            max_redirects = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.home_path, "/dashboard");
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let err = RouterConfig::from_toml_str(r#"login_path = "login""#).unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
        assert!(err.to_string().contains("login_path"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = RouterConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = RouterConfig {
            max_depth: 0,
            ..RouterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
