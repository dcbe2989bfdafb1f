//! 会话/权限存储
//!
//! 保存当前登录用户的资料与合并后的权限树（静态 + 动态）。
//! 存储本身不触碰路由器：更新权限时返回新解析出的动态路由，
//! 由导航器负责登记。

use console_shared::{LoginUserDetail, PermissionNode, SysRole};
use tracing::info;

use crate::compiler::RouteCompiler;
use crate::constant::constant_permissions;
use crate::path::normalize_path;
use crate::route::{RouteDef, count_routes};

/// 用户资料
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub real_name: String,
    pub avatar: String,
    pub phone: String,
    pub email: String,
    pub remark: String,
    pub depart_code: String,
    pub depart_name: String,
    pub roles: Vec<SysRole>,
}

/// 本次更新解析出的动态路由，等待登记到路由器
#[derive(Debug, Clone, PartialEq)]
pub struct RoutesResolved<V> {
    pub routes: Vec<RouteDef<V>>,
}

impl<V> RoutesResolved<V> {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<V> IntoIterator for RoutesResolved<V> {
    type Item = RouteDef<V>;
    type IntoIter = std::vec::IntoIter<RouteDef<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    profile: UserProfile,
    permissions: Vec<PermissionNode>,
    tables: Vec<PermissionNode>,
    forms: Vec<PermissionNode>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内存中的权限树是否有效
    ///
    /// 页面刷新后存储为空，与首次登录同样处理。
    pub fn is_fresh(&self) -> bool {
        !self.permissions.is_empty()
    }

    /// 更新权限
    ///
    /// 存储的权限树为 `静态权限 + dynamic`；只编译 `dynamic`，静态路由在启动时
    /// 已经登记过。
    pub fn update_permissions<V: Clone>(
        &mut self,
        dynamic: Vec<PermissionNode>,
        compiler: &RouteCompiler<'_, V>,
    ) -> RoutesResolved<V> {
        let routes = compiler.compile(&dynamic);

        let mut merged = constant_permissions(compiler.config());
        merged.extend(dynamic);
        self.permissions = merged;

        info!(
            nodes = self.permissions.len(),
            routes = count_routes(&routes),
            "permissions updated"
        );
        RoutesResolved { routes }
    }

    /// 用登录/令牌查询返回的用户详情填充存储
    pub fn apply_user_detail<V: Clone>(
        &mut self,
        detail: LoginUserDetail,
        compiler: &RouteCompiler<'_, V>,
    ) -> RoutesResolved<V> {
        self.profile = UserProfile {
            id: detail.id,
            user_name: detail.user_name,
            real_name: detail.real_name,
            avatar: detail.avatar,
            phone: detail.phone,
            email: detail.email,
            remark: detail.remark,
            depart_code: detail.depart_code,
            depart_name: detail.depart_name,
            roles: detail.roles,
        };
        self.tables = detail.tables;
        self.forms = detail.forms;
        self.update_permissions(detail.menus, compiler)
    }

    /// 清空存储；已登记到路由器的路由不会被撤销
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// 合并后的权限树
    pub fn permissions(&self) -> &[PermissionNode] {
        &self.permissions
    }

    pub fn tables(&self) -> &[PermissionNode] {
        &self.tables
    }

    pub fn forms(&self) -> &[PermissionNode] {
        &self.forms
    }

    /// 合并权限树中是否存在某个权限编码（按规范化后的编码比较）
    ///
    /// `tables` 与 `forms` 只做透传，不参与判断。
    pub fn has_permission(&self, code: &str) -> bool {
        contains_code(&self.permissions, &normalize_path(code))
    }
}

fn contains_code(nodes: &[PermissionNode], wanted: &str) -> bool {
    nodes.iter().any(|node| {
        normalize_path(&node.permission_code) == wanted || contains_code(&node.children, wanted)
    })
}
