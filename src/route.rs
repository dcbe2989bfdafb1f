//! 路由定义：路由编译器的输出，交给路由器登记

/// 路由元信息
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// 导航标题，取自 `permission_name`
    pub title: String,
    /// 是否在导航菜单中隐藏，取 `visible` 的反值
    pub hidden: bool,
}

/// 路由器可直接登记的路由定义
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDef<V> {
    pub name: String,
    pub path: String,
    pub component: V,
    pub children: Vec<RouteDef<V>>,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
}

impl<V> RouteDef<V> {
    /// 子树中的路由总数（含自身）
    pub fn count(&self) -> usize {
        1 + count_routes(&self.children)
    }

    /// 先序展开子树
    pub fn flatten(&self) -> Vec<&RouteDef<V>> {
        let mut out = Vec::with_capacity(self.count());
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a RouteDef<V>>) {
        out.push(self);
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// 路由森林中的路由总数
pub fn count_routes<V>(routes: &[RouteDef<V>]) -> usize {
    routes.iter().map(RouteDef::count).sum()
}

/// 先序展开路由森林
pub fn flatten_routes<V>(routes: &[RouteDef<V>]) -> Vec<&RouteDef<V>> {
    routes.iter().flat_map(RouteDef::flatten).collect()
}
