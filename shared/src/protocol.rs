use crate::model::null_as_default;
use crate::{LoginReq, LoginUserDetail, RELOGIN_CODES, SUCCESS_CODE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The payload carried in `ApiResult::data`.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API base url.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Response Envelope
// =========================================================

/// 统一响应体
///
/// 除文件下载外，后端所有接口都以该结构返回，`code == 0` 表示成功。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub code: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// 耗时（毫秒）
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: u64,
    #[serde(default)]
    pub data: Option<T>,
}

/// Non-success envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    #[error("[{code}] {message}")]
    Business { code: i32, message: String },
    #[error("response carried no data")]
    MissingData,
}

impl ApiFailure {
    /// 该失败是否要求重新登录
    pub fn requires_relogin(&self) -> bool {
        matches!(self, ApiFailure::Business { code, .. } if RELOGIN_CODES.contains(code))
    }
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            success: true,
            message: String::new(),
            time: 0,
            data: Some(data),
        }
    }

    pub fn fail(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            success: false,
            message: message.into(),
            time: 0,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn requires_relogin(&self) -> bool {
        RELOGIN_CODES.contains(&self.code)
    }

    /// 剥离通用字段，只保留 `data`；业务失败转换为 `ApiFailure`
    pub fn into_data(self) -> Result<Option<T>, ApiFailure> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiFailure::Business {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// 同 `into_data`，但要求 `data` 必须存在
    pub fn require_data(self) -> Result<T, ApiFailure> {
        self.into_data()?.ok_or(ApiFailure::MissingData)
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// 登录
impl ApiRequest for LoginReq {
    type Response = LoginUserDetail;
    const PATH: &'static str = "/sys/doLogin";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// 根据令牌查询在线用户详情
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDetailRequest;

impl ApiRequest for UserDetailRequest {
    type Response = LoginUserDetail;
    const PATH: &'static str = "/sys/queryDetailByToken";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 退出登录
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = String;
    const PATH: &'static str = "/sys/logout";
    const METHOD: HttpMethod = HttpMethod::Get;
}
