//! 导航副作用：加载指示器与文档标题

use console_router::NavigationHooks;
use leptos::prelude::*;

pub struct BrowserHooks {
    loading: RwSignal<bool>,
    app_title: String,
}

impl BrowserHooks {
    pub fn new(loading: RwSignal<bool>, app_title: impl Into<String>) -> Self {
        Self {
            loading,
            app_title: app_title.into(),
        }
    }
}

impl NavigationHooks for BrowserHooks {
    fn progress_start(&self) {
        self.loading.set(true);
    }

    fn progress_finish(&self) {
        self.loading.set(false);
    }

    fn set_title(&self, title: &str) {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(&format!("{} | {}", title, self.app_title));
        }
    }
}
