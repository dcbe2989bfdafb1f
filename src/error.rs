//! 路由核心的错误类型
//!
//! 路由编译与视图查找从不失败（缺失组件会降级为 404 视图），
//! 这里只覆盖认证协作方、配置加载、注册表构建和导航重定向的失败。

use console_shared::ApiFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// 令牌无效或已过期，认证协作方拒绝了请求
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 后端返回了要求重新登录的业务码
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// 网络错误或非成功的响应
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid router config: {0}")]
    Config(String),

    /// 视图注册表中缺少规范的 404 视图
    #[error("view registry has no not-found view at '{0}'")]
    MissingNotFoundView(String),

    /// 重定向链超过上限，通常意味着配置形成了环
    #[error("navigation to '{path}' exceeded {limit} redirects")]
    RedirectLimit { path: String, limit: usize },
}

pub type RouterResult<T> = std::result::Result<T, RouterError>;

impl RouterError {
    // --- Convenience constructors ---

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// 非成功的 HTTP 响应；401 表示令牌已被后端拒绝
    pub fn from_http_status(status: u16, request: &str) -> Self {
        let message = format!("{request} failed: HTTP {status}");
        match status {
            401 => Self::unauthorized(message),
            _ => Self::upstream(message),
        }
    }

    // --- Accessors ---

    /// 对应的 HTTP 状态语义
    pub fn status_code(&self) -> u16 {
        match self {
            RouterError::Unauthorized(_) | RouterError::SessionExpired(_) => 401,
            RouterError::Serialization(_) | RouterError::Config(_) => 400,
            RouterError::Upstream(_) => 502,
            RouterError::MissingNotFoundView(_) | RouterError::RedirectLimit { .. } => 500,
        }
    }

    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            RouterError::Unauthorized(_) => "UNAUTHORIZED",
            RouterError::SessionExpired(_) => "SESSION_EXPIRED",
            RouterError::Upstream(_) => "UPSTREAM_ERROR",
            RouterError::Serialization(_) => "JSON_PARSE_ERROR",
            RouterError::Config(_) => "INVALID_CONFIG",
            RouterError::MissingNotFoundView(_) => "MISSING_NOT_FOUND_VIEW",
            RouterError::RedirectLimit { .. } => "REDIRECT_LIMIT",
        }
    }

    /// 该错误是否意味着需要重新登录
    pub fn requires_relogin(&self) -> bool {
        matches!(
            self,
            RouterError::Unauthorized(_) | RouterError::SessionExpired(_)
        )
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<ApiFailure> for RouterError {
    fn from(e: ApiFailure) -> Self {
        if e.requires_relogin() {
            RouterError::SessionExpired(e.to_string())
        } else {
            RouterError::Upstream(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(e: serde_json::Error) -> Self {
        RouterError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RouterError {
    fn from(e: toml::de::Error) -> Self {
        RouterError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relogin_failures_map_to_session_expired() {
        let err: RouterError = ApiFailure::Business {
            code: 102,
            message: "kicked out".into(),
        }
        .into();
        assert!(matches!(err, RouterError::SessionExpired(_)));
        assert!(err.requires_relogin());
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_other_failures_map_to_upstream() {
        let err: RouterError = ApiFailure::Business {
            code: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
        assert!(!err.requires_relogin());

        let err: RouterError = ApiFailure::MissingData.into();
        assert_eq!(err.to_string(), "upstream error: response carried no data");
    }

    #[test]
    fn test_redirect_limit_message() {
        let err = RouterError::RedirectLimit {
            path: "/a".into(),
            limit: 8,
        };
        assert_eq!(err.to_string(), "navigation to '/a' exceeded 8 redirects");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_http_status_mapping() {
        let err = RouterError::from_http_status(401, "GET /sys/queryDetailByToken");
        assert!(matches!(err, RouterError::Unauthorized(_)));
        assert!(err.requires_relogin());
        assert_eq!(
            err.to_string(),
            "unauthorized: GET /sys/queryDetailByToken failed: HTTP 401"
        );

        let err = RouterError::from_http_status(503, "POST /sys/doLogin");
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
        assert!(!err.requires_relogin());
    }

    #[test]
    fn test_decode_failures_are_serialization_errors() {
        let err: RouterError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.error_code(), "JSON_PARSE_ERROR");
        assert_eq!(err.status_code(), 400);
        assert!(!err.requires_relogin());
    }
}
