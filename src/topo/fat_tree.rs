//! Fat-tree 拓扑构建
//!
//! 四个枚举过程各自独立地套用同一组下标公式，跨层的端口引用因此两两一致：
//! - 主机挂在所属边缘交换机的偶数端口 2,4,6,…
//! - 边缘交换机奇数端口上联汇聚交换机，第 t 个上联口连到 slot k/2 + t/2
//! - 汇聚交换机奇数端口上联核心交换机 (group = j, index = m/2 + 1)，偶数端口下联边缘交换机
//! - 核心交换机第 m 个端口连到 pod m-1 中 slot 为 k/2 + group - 1 的汇聚交换机

use tracing::{debug, info};

use super::device::{DeviceId, HostRecord, PortLink, SwitchKind, SwitchRecord, TopoRecord};
use super::params::FatTreeParams;

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub params: FatTreeParams,
    pub hosts: Vec<HostRecord>,
    pub edge_switches: Vec<SwitchRecord>,
    pub agg_switches: Vec<SwitchRecord>,
    pub core_switches: Vec<SwitchRecord>,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.params.half()
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> &HostRecord {
        &self.hosts[host_index(&self.params, pod, edge, host)]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> &SwitchRecord {
        let idx = pod * self.half() + edge;
        &self.edge_switches[idx]
    }

    /// `slot` 为汇聚交换机在 pod 内的规范编号，取值 [k/2, k)
    pub fn agg(&self, pod: usize, slot: usize) -> &SwitchRecord {
        let half = self.half();
        let idx = pod * half + (slot - half);
        &self.agg_switches[idx]
    }

    /// `group` 与 `index` 均从 1 开始
    pub fn core(&self, group: usize, index: usize) -> &SwitchRecord {
        let half = self.half();
        let idx = (group - 1) * half + (index - 1);
        &self.core_switches[idx]
    }

    /// 按标识查找记录；越界的标识返回 None
    pub fn find(&self, id: DeviceId) -> Option<TopoRecord<'_>> {
        let p = &self.params;
        let half = self.half();
        match id {
            DeviceId::Node { idx } => self.hosts.get(idx).map(TopoRecord::Host),
            DeviceId::Edge { pod, slot } if pod < p.pods && slot < p.edge_per_pod => {
                Some(TopoRecord::Switch(self.edge(pod, slot)))
            }
            DeviceId::Aggr { pod, slot } if pod < p.pods && (half..p.k).contains(&slot) => {
                Some(TopoRecord::Switch(self.agg(pod, slot)))
            }
            DeviceId::Core { k, group, index }
                if k == p.k && (1..=half).contains(&group) && (1..=half).contains(&index) =>
            {
                Some(TopoRecord::Switch(self.core(group, index)))
            }
            _ => None,
        }
    }

    /// 文档顺序：主机、边缘、汇聚、核心
    pub fn records(&self) -> impl Iterator<Item = TopoRecord<'_>> {
        self.hosts
            .iter()
            .map(TopoRecord::Host)
            .chain(
                self.edge_switches
                    .iter()
                    .chain(&self.agg_switches)
                    .chain(&self.core_switches)
                    .map(TopoRecord::Switch),
            )
    }
}

/// 主机全局编号：pod 优先，其次 edge slot，最后本地序号
fn host_index(p: &FatTreeParams, pod: usize, edge: usize, host: usize) -> usize {
    (pod * p.edge_per_pod + edge) * p.hosts_per_edge + host
}

pub fn enumerate_hosts(p: &FatTreeParams) -> Vec<HostRecord> {
    let mut hosts = Vec::with_capacity(p.total_hosts());
    for pod in 0..p.pods {
        for slot in 0..p.edge_per_pod {
            for t in 0..p.hosts_per_edge {
                hosts.push(HostRecord {
                    idx: host_index(p, pod, slot, t),
                    uplink: PortLink::new(1, DeviceId::Edge { pod, slot }, (t + 1) * 2),
                });
            }
        }
    }
    hosts
}

pub fn enumerate_edge_switches(p: &FatTreeParams) -> Vec<SwitchRecord> {
    let mut switches = Vec::with_capacity(p.total_edge_switches());
    for pod in 0..p.pods {
        for slot in 0..p.edge_per_pod {
            let ports = (0..p.ports)
                .map(|t| {
                    if t % 2 == 0 {
                        let aggr = DeviceId::Aggr {
                            pod,
                            slot: p.pods / 2 + t / 2,
                        };
                        PortLink::new(t + 1, aggr, (slot + 1) * 2)
                    } else {
                        let node = DeviceId::Node {
                            idx: host_index(p, pod, slot, t / 2),
                        };
                        PortLink::new(t + 1, node, 1)
                    }
                })
                .collect();
            switches.push(SwitchRecord {
                kind: SwitchKind::Edge,
                id: DeviceId::Edge { pod, slot },
                ports,
            });
        }
    }
    switches
}

pub fn enumerate_agg_switches(p: &FatTreeParams) -> Vec<SwitchRecord> {
    let k = p.k;
    let half = p.half();
    let mut switches = Vec::with_capacity(p.total_agg_switches());
    // pod 与 j 从 1 开始
    for pod in 1..=p.pods {
        for j in 1..=p.agg_per_pod {
            let ports = (1..=p.ports)
                .map(|m| {
                    if m % 2 == 1 {
                        let core = DeviceId::Core {
                            k,
                            group: j,
                            index: m / 2 + 1,
                        };
                        PortLink::new(m, core, pod)
                    } else {
                        let edge = DeviceId::Edge {
                            pod: pod - 1,
                            slot: m / 2 - 1,
                        };
                        PortLink::new(m, edge, j * 2 - 1)
                    }
                })
                .collect();
            switches.push(SwitchRecord {
                kind: SwitchKind::Aggregation,
                id: DeviceId::Aggr {
                    pod: pod - 1,
                    slot: j + half - 1,
                },
                ports,
            });
        }
    }
    switches
}

pub fn enumerate_core_switches(p: &FatTreeParams) -> Vec<SwitchRecord> {
    let k = p.k;
    let half = p.half();
    let mut switches = Vec::with_capacity(p.total_core_switches());
    for group in 1..=half {
        for index in 1..=half {
            let ports = (1..=p.ports)
                .map(|m| {
                    let aggr = DeviceId::Aggr {
                        pod: m - 1,
                        slot: half + group - 1,
                    };
                    PortLink::new(m, aggr, 2 * index - 1)
                })
                .collect();
            switches.push(SwitchRecord {
                kind: SwitchKind::Core,
                id: DeviceId::Core { k, group, index },
                ports,
            });
        }
    }
    switches
}

#[tracing::instrument(skip(params), fields(k = params.k))]
pub fn build_fat_tree(params: &FatTreeParams) -> FatTreeTopology {
    let hosts = enumerate_hosts(params);
    debug!(count = hosts.len(), "enumerated hosts");
    let edge_switches = enumerate_edge_switches(params);
    debug!(count = edge_switches.len(), "enumerated edge switches");
    let agg_switches = enumerate_agg_switches(params);
    debug!(count = agg_switches.len(), "enumerated aggregation switches");
    let core_switches = enumerate_core_switches(params);
    debug!(count = core_switches.len(), "enumerated core switches");

    info!(
        hosts = hosts.len(),
        edge = edge_switches.len(),
        aggr = agg_switches.len(),
        core = core_switches.len(),
        "built fat-tree"
    );

    FatTreeTopology {
        params: *params,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
    }
}
