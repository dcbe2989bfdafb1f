//! 管理控制台前后端共享的数据模型
//!
//! - `model`: 权限树、登录用户详情等领域模型
//! - `protocol`: 统一响应包装与认证接口定义

pub mod model;
pub mod protocol;

pub use model::{LoginReq, LoginUserDetail, PermissionNode, PermissionType, SysRole};
pub use protocol::{
    ApiFailure, ApiRequest, ApiResult, HttpMethod, LogoutRequest, UserDetailRequest,
};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 存放认证令牌的 Cookie 名称
pub const TOKEN_COOKIE: &str = "Authorization";

/// 根节点的父 ID
pub const ROOT_PID: &str = "0";

/// 业务成功码
pub const SUCCESS_CODE: i32 = 0;

/// 需要重新登录的业务码（令牌失效 / 被挤下线）
pub const RELOGIN_CODES: [i32; 2] = [101, 102];

/// 认证相关接口的前缀
pub const AUTH_PREFIX: &str = "/sys";
