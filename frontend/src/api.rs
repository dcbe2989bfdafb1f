use async_trait::async_trait;
use console_router::{AuthApi, RouterError, RouterResult};
use console_shared::{
    ApiFailure, ApiRequest, ApiResult, HttpMethod, LoginReq, LoginUserDetail, LogoutRequest,
    UserDetailRequest,
};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleApi {
    pub base_url: String,
}

impl ConsoleApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送请求并剥离响应体，业务失败转换为 `RouterError`
    ///
    /// Cookie 随请求一起发送，令牌由浏览器携带。
    pub async fn call<R: ApiRequest>(&self, req: &R) -> RouterResult<Option<R::Response>> {
        let url = self.url(R::PATH);
        let res = match R::METHOD {
            HttpMethod::Get => Request::get(&url)
                .credentials(RequestCredentials::Include)
                .send()
                .await,
            HttpMethod::Post => Request::post(&url)
                .credentials(RequestCredentials::Include)
                .json(req)
                .map_err(|e| RouterError::serialization(e.to_string()))?
                .send()
                .await,
        }
        .map_err(|e| RouterError::upstream(e.to_string()))?;

        if !res.ok() {
            let method = match R::METHOD {
                HttpMethod::Get => "GET",
                HttpMethod::Post => "POST",
            };
            return Err(RouterError::from_http_status(
                res.status(),
                &format!("{method} {}", R::PATH),
            ));
        }

        let envelope = res
            .json::<ApiResult<R::Response>>()
            .await
            .map_err(|e| RouterError::serialization(e.to_string()))?;
        Ok(envelope.into_data()?)
    }

    async fn require<R: ApiRequest>(&self, req: &R) -> RouterResult<R::Response> {
        self.call(req)
            .await?
            .ok_or_else(|| RouterError::from(ApiFailure::MissingData))
    }

    /// 登录
    pub async fn login(&self, req: &LoginReq) -> RouterResult<LoginUserDetail> {
        self.require(req).await
    }
}

/// 基于 HTTP 的认证协作方
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    api: ConsoleApi,
}

impl HttpAuthApi {
    pub fn new(api: ConsoleApi) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn fetch_user_detail(&self) -> RouterResult<LoginUserDetail> {
        self.api.require(&UserDetailRequest).await
    }

    async fn logout(&self) -> RouterResult<()> {
        self.api.call(&LogoutRequest).await.map(|_| ())
    }
}
