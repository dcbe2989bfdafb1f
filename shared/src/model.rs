use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::ROOT_PID;

// =========================================================
// 权限类型
// =========================================================

/// 资源类型，后端以数字编码传输：1-接口、2-页面、3-页面元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PermissionType {
    Interface,
    Page,
    Element,
}

impl PermissionType {
    pub fn code(&self) -> u8 {
        match self {
            PermissionType::Interface => 1,
            PermissionType::Page => 2,
            PermissionType::Element => 3,
        }
    }
}

impl TryFrom<u8> for PermissionType {
    type Error = UnknownPermissionType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PermissionType::Interface),
            2 => Ok(PermissionType::Page),
            3 => Ok(PermissionType::Element),
            other => Err(UnknownPermissionType(other)),
        }
    }
}

impl From<PermissionType> for u8 {
    fn from(value: PermissionType) -> Self {
        value.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission type code: {0}")]
pub struct UnknownPermissionType(pub u8);

// =========================================================
// 权限节点
// =========================================================

/// 系统资源（权限树节点）
///
/// 一个节点代表一个可导航或可授权的单元：页面、接口或页面元素。
/// `permission_code` 同时作为路由路径和权限标识使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionNode {
    pub id: String,
    /// 父资源 ID，"0" 表示根节点
    #[serde(default = "root_pid", deserialize_with = "null_as_root_pid")]
    pub pid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pname: Option<String>,
    pub permission_code: String,
    pub permission_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_type: Option<PermissionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_permission_type: Option<PermissionType>,
    /// 前端组件地址（页面类型时生效）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// 元数据，原样透传
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<PermissionNode>,
}

fn root_pid() -> String {
    ROOT_PID.to_string()
}

fn null_as_root_pid<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(root_pid))
}

/// `null` 与缺省字段一样按默认值处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PermissionNode {
    /// 创建一个页面类型的根节点
    pub fn page(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pid: root_pid(),
            pname: None,
            permission_code: code.into(),
            permission_name: name.into(),
            permission_type: Some(PermissionType::Page),
            parent_permission_type: None,
            component: None,
            icon: None,
            meta: None,
            visible: true,
            sort: None,
            redirect: None,
            children: Vec::new(),
        }
    }

    // --- Builder helpers ---

    pub fn with_type(mut self, permission_type: PermissionType) -> Self {
        self.permission_type = Some(permission_type);
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_sort(mut self, sort: i32) -> Self {
        self.sort = Some(sort);
        self
    }

    /// 追加子节点，并把子节点的 `pid` 指向当前节点
    pub fn with_child(mut self, mut child: PermissionNode) -> Self {
        child.pid = self.id.clone();
        child.parent_permission_type = self.permission_type;
        self.children.push(child);
        self
    }

    // --- Accessors ---

    pub fn is_root(&self) -> bool {
        self.pid == ROOT_PID
    }

    /// `component` 是否为非空字符串
    pub fn has_component(&self) -> bool {
        self.component.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn is_page(&self) -> bool {
        self.permission_type == Some(PermissionType::Page)
    }

    /// 以当前节点为根的子树节点总数
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(PermissionNode::subtree_len).sum::<usize>()
    }
}

impl fmt::Display for PermissionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.permission_name, self.permission_code)
    }
}

// =========================================================
// 登录用户
// =========================================================

/// 角色
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SysRole {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_code: Option<String>,
    /// 为空表示系统角色，否则为部门角色
    #[serde(deserialize_with = "null_as_default")]
    pub role_depart_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// 在线用户详情，由登录接口和令牌查询接口返回
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginUserDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub real_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub depart_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub depart_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remark: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<SysRole>,
    /// 该用户拥有的菜单（动态权限树）
    #[serde(deserialize_with = "null_as_default")]
    pub menus: Vec<PermissionNode>,
    /// 该用户拥有的 TABLE 组件
    #[serde(deserialize_with = "null_as_default")]
    pub tables: Vec<PermissionNode>,
    /// 该用户拥有的 FORM 组件
    #[serde(deserialize_with = "null_as_default")]
    pub forms: Vec<PermissionNode>,
}

/// 登录请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginReq {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
    #[serde(default, rename = "captchaUUID", skip_serializing_if = "Option::is_none")]
    pub captcha_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
