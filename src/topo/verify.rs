//! 拓扑结构自检
//!
//! 检查端口引用的双向一致性、度数、重复/悬空端口以及任意两个 pod 之间的核心连通性。

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use super::device::{DeviceId, SwitchRecord, TopoRecord};
use super::fat_tree::FatTreeTopology;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{owner} lists {found} ports, expected {expected}")]
    WrongDegree {
        owner: DeviceId,
        expected: usize,
        found: usize,
    },
    #[error("{owner} port {port} is listed more than once")]
    DuplicatePort { owner: DeviceId, port: usize },
    #[error("{owner} port {port} is outside 1..={max}")]
    PortOutOfRange {
        owner: DeviceId,
        port: usize,
        max: usize,
    },
    #[error("{owner}[{port}] points to unknown device {peer}")]
    DanglingPeer {
        owner: DeviceId,
        port: usize,
        peer: DeviceId,
    },
    #[error("{owner}[{port}] -> {peer}[{peer_port}] has no matching reverse reference")]
    Asymmetric {
        owner: DeviceId,
        port: usize,
        peer: DeviceId,
        peer_port: usize,
    },
    #[error("no core switch joins pod {a} and pod {b}")]
    NoSharedCore { a: usize, b: usize },
}

fn expected_degree(topo: &FatTreeTopology, rec: &TopoRecord<'_>) -> usize {
    match rec {
        TopoRecord::Host(_) => 1,
        TopoRecord::Switch(_) => topo.params.ports,
    }
}

fn check_ports(topo: &FatTreeTopology, rec: &TopoRecord<'_>, out: &mut Vec<Violation>) {
    let owner = rec.id();
    let expected = expected_degree(topo, rec);
    let ports = rec.ports();
    if ports.len() != expected {
        out.push(Violation::WrongDegree {
            owner,
            expected,
            found: ports.len(),
        });
    }

    let mut seen = HashSet::new();
    for link in ports {
        if !(1..=expected).contains(&link.port) {
            out.push(Violation::PortOutOfRange {
                owner,
                port: link.port,
                max: expected,
            });
        }
        if !seen.insert(link.port) {
            out.push(Violation::DuplicatePort {
                owner,
                port: link.port,
            });
        }

        let Some(peer) = topo.find(link.peer) else {
            out.push(Violation::DanglingPeer {
                owner,
                port: link.port,
                peer: link.peer,
            });
            continue;
        };
        let back = peer
            .ports()
            .iter()
            .find(|l| l.port == link.peer_port)
            .is_some_and(|l| l.peer == owner && l.peer_port == link.port);
        if !back {
            out.push(Violation::Asymmetric {
                owner,
                port: link.port,
                peer: link.peer,
                peer_port: link.peer_port,
            });
        }
    }
}

fn reaches_pod(core: &SwitchRecord, pod: usize) -> bool {
    core.ports
        .iter()
        .any(|l| matches!(l.peer, DeviceId::Aggr { pod: p, .. } if p == pod))
}

/// 返回同时连到两个 pod 的第一个核心交换机
pub fn shared_core(topo: &FatTreeTopology, a: usize, b: usize) -> Option<DeviceId> {
    topo.core_switches
        .iter()
        .find(|c| reaches_pod(c, a) && reaches_pod(c, b))
        .map(|c| c.id)
}

/// 运行全部检查；返回空列表表示拓扑一致
pub fn verify(topo: &FatTreeTopology) -> Vec<Violation> {
    let mut out = Vec::new();
    for rec in topo.records() {
        check_ports(topo, &rec, &mut out);
    }

    let pods = topo.params.pods;
    for a in 0..pods {
        for b in (a + 1)..pods {
            if shared_core(topo, a, b).is_none() {
                out.push(Violation::NoSharedCore { a, b });
            }
        }
    }

    if out.is_empty() {
        debug!(k = topo.params.k, "topology verified");
    } else {
        warn!(k = topo.params.k, violations = out.len(), "topology verification failed");
    }
    out
}
