//! 侧边栏菜单
//!
//! 由合并后的权限树生成：只保留可见的页面节点，同级按 `sort` 稳定排序，
//! 未设置排序的节点排在最后。

use console_shared::{PermissionNode, PermissionType};
use tracing::warn;

use crate::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    /// 规范化后的路由路径
    pub path: String,
    pub title: String,
    pub icon: Option<String>,
    pub children: Vec<MenuItem>,
}

pub fn build_menu(nodes: &[PermissionNode], max_depth: usize) -> Vec<MenuItem> {
    build_level(nodes, 0, max_depth)
}

fn build_level(nodes: &[PermissionNode], depth: usize, max_depth: usize) -> Vec<MenuItem> {
    if nodes.is_empty() {
        return Vec::new();
    }
    if depth >= max_depth {
        warn!(depth, "menu tree too deep, truncated");
        return Vec::new();
    }

    let mut shown: Vec<&PermissionNode> = nodes.iter().filter(|node| is_menu_entry(node)).collect();
    shown.sort_by_key(|node| node.sort.map_or((1, 0), |sort| (0, sort)));

    shown
        .into_iter()
        .map(|node| MenuItem {
            id: node.id.clone(),
            path: normalize_path(&node.permission_code),
            title: node.permission_name.clone(),
            icon: node.icon.clone().filter(|icon| !icon.is_empty()),
            children: build_level(&node.children, depth + 1, max_depth),
        })
        .collect()
}

// 接口与按钮级权限不进菜单；隐藏节点连同子树一起隐藏
fn is_menu_entry(node: &PermissionNode) -> bool {
    node.visible
        && !matches!(
            node.permission_type,
            Some(PermissionType::Interface | PermissionType::Element)
        )
}
