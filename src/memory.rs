//! 内存路由器
//!
//! 不依赖浏览器的 [`RouterPort`] 实现，历史记录保存在内存中。
//! 用于测试与非浏览器环境下驱动导航流程。

use std::cell::RefCell;

use crate::location::Location;
use crate::navigator::{HistoryMode, RouterPort};
use crate::route::RouteDef;
use crate::table::{RouteMatch, RouteTable};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<V> {
    pub location: Location,
    pub mode: HistoryMode,
    /// 提交时匹配到的叶子视图
    pub view: Option<V>,
}

#[derive(Debug)]
pub struct MemoryRouter<V> {
    table: RefCell<RouteTable<V>>,
    history: RefCell<Vec<HistoryEntry<V>>>,
}

impl<V> Default for MemoryRouter<V> {
    fn default() -> Self {
        Self {
            table: RefCell::new(RouteTable::default()),
            history: RefCell::new(Vec::new()),
        }
    }
}

impl<V: Clone> MemoryRouter<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<HistoryEntry<V>> {
        self.history.borrow().clone()
    }

    /// 已登记的顶层路由数（不含兜底路由）
    pub fn route_count(&self) -> usize {
        self.table.borrow().len()
    }

    /// 当前渲染的视图
    pub fn current_view(&self) -> Option<V> {
        self.history
            .borrow()
            .last()
            .and_then(|entry| entry.view.clone())
    }
}

impl<V: Clone> RouterPort<V> for MemoryRouter<V> {
    fn add_route(&self, route: RouteDef<V>) {
        self.table.borrow_mut().add(route);
    }

    fn resolve(&self, path: &str) -> Option<RouteMatch<V>> {
        self.table.borrow().resolve(path)
    }

    fn commit(&self, location: &Location, mode: HistoryMode, matched: Option<&RouteMatch<V>>) {
        let entry = HistoryEntry {
            location: location.clone(),
            mode,
            view: matched
                .and_then(|m| m.leaf())
                .map(|leaf| leaf.component.clone()),
        };

        let mut history = self.history.borrow_mut();
        if mode == HistoryMode::Replace {
            history.pop();
        }
        history.push(entry);
    }

    fn current(&self) -> Option<Location> {
        self.history
            .borrow()
            .last()
            .map(|entry| entry.location.clone())
    }
}
