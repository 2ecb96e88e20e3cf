//! 设备标识与端口记录
//!
//! 每条记录描述一个设备及其全部端口；端口号从 1 开始。

use std::fmt;

use serde::Serialize;

/// 设备标识，`Display` 输出拓扑文件中使用的名字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceId {
    /// 主机，全局顺序编号
    Node { idx: usize },
    /// 边缘交换机，slot ∈ [0, k/2)
    Edge { pod: usize, slot: usize },
    /// 汇聚交换机，slot ∈ [k/2, k)
    Aggr { pod: usize, slot: usize },
    /// 核心交换机，group/index 均从 1 开始
    Core { k: usize, group: usize, index: usize },
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DeviceId::Node { idx } => write!(f, "Node({idx})"),
            DeviceId::Edge { pod, slot } => write!(f, "Edge({pod} {slot} 1)"),
            DeviceId::Aggr { pod, slot } => write!(f, "Aggr({pod} {slot} 1)"),
            DeviceId::Core { k, group, index } => write!(f, "Core({k} {group} {index})"),
        }
    }
}

/// 一个本地端口到对端端口的连接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortLink {
    pub port: usize,
    pub peer: DeviceId,
    pub peer_port: usize,
}

impl PortLink {
    pub fn new(port: usize, peer: DeviceId, peer_port: usize) -> Self {
        Self {
            port,
            peer,
            peer_port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchKind {
    Edge,
    Aggregation,
    Core,
}

/// 主机记录：只有一个上行端口
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    pub idx: usize,
    pub uplink: PortLink,
}

impl HostRecord {
    pub fn id(&self) -> DeviceId {
        DeviceId::Node { idx: self.idx }
    }
}

/// 交换机记录：按本地端口号顺序列出全部端口
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchRecord {
    pub kind: SwitchKind,
    pub id: DeviceId,
    pub ports: Vec<PortLink>,
}

/// 按文档顺序遍历时使用的借用视图
#[derive(Debug, Clone, Copy)]
pub enum TopoRecord<'a> {
    Host(&'a HostRecord),
    Switch(&'a SwitchRecord),
}

impl<'a> TopoRecord<'a> {
    pub fn id(&self) -> DeviceId {
        match self {
            TopoRecord::Host(h) => h.id(),
            TopoRecord::Switch(s) => s.id,
        }
    }

    pub fn ports(&self) -> &'a [PortLink] {
        match *self {
            TopoRecord::Host(h) => std::slice::from_ref(&h.uplink),
            TopoRecord::Switch(s) => &s.ports,
        }
    }
}
