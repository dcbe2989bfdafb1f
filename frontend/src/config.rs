//! 浏览器外壳配置

use console_shared::TOKEN_COOKIE;

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_COOKIE_MAX_AGE_DAYS: u32 = 7;
const DEFAULT_APP_TITLE: &str = "Admin Console";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// 后端接口的根地址
    pub api_base_url: String,
    pub token_cookie: String,
    pub cookie_max_age_days: u32,
    /// 文档标题后缀
    pub app_title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_cookie: TOKEN_COOKIE.to_string(),
            cookie_max_age_days: DEFAULT_COOKIE_MAX_AGE_DAYS,
            app_title: DEFAULT_APP_TITLE.to_string(),
        }
    }
}
