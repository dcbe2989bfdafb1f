//! 把路由核心的 `tracing` 事件输出到浏览器控制台

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// 按事件级别选择 `console.error/warn/info/debug`
pub struct ConsoleWriter {
    level: Level,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end();
        if !line.is_empty() {
            let msg = JsValue::from_str(line);
            if self.level == Level::ERROR {
                console::error_1(&msg);
            } else if self.level == Level::WARN {
                console::warn_1(&msg);
            } else if self.level == Level::INFO {
                console::info_1(&msg);
            } else {
                console::debug_1(&msg);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { level: Level::INFO }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
        }
    }
}

/// 安装全局订阅者；wasm 环境没有系统时钟，不输出时间戳
pub fn init_tracing() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .without_time()
        .try_init();

    if let Err(e) = result {
        console::error_1(&format!("[Router] Failed to install tracing subscriber: {}", e).into());
    }
}
