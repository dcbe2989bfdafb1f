//! Cookie 令牌存储
//!
//! 直接读写 `document.cookie`，令牌通常由后端 `Set-Cookie` 写入。

use console_router::TokenStore;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config::ShellConfig;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

pub struct CookieTokenStore {
    name: String,
    max_age_days: u32,
}

impl CookieTokenStore {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            name: config.token_cookie.clone(),
            max_age_days: config.cookie_max_age_days,
        }
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    fn write(&self, cookie: &str) {
        if let Some(doc) = Self::document() {
            if doc.set_cookie(cookie).is_err() {
                web_sys::console::error_1(&"[Cookie] Failed to write token cookie.".into());
            }
        }
    }
}

/// 在 `a=1; b=2` 形式的 Cookie 串中查找指定名称的值
fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| {
            js_sys::decode_uri_component(value)
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| value.to_string())
        })
    })
}

impl TokenStore for CookieTokenStore {
    fn get_token(&self) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        find_cookie(&cookies, &self.name).filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) {
        let value = js_sys::encode_uri_component(token)
            .as_string()
            .unwrap_or_else(|| token.to_string());
        self.write(&format!(
            "{}={}; max-age={}; path=/",
            self.name,
            value,
            self.max_age_days * SECONDS_PER_DAY
        ));
    }

    fn remove_token(&self) {
        self.write(&format!(
            "{}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/",
            self.name
        ));
    }
}
