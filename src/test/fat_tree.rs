use crate::topo::fat_tree::{
    enumerate_agg_switches, enumerate_core_switches, enumerate_edge_switches, enumerate_hosts,
};
use crate::topo::{DeviceId, FatTreeParams, PortLink, SwitchKind, TopoRecord, build_fat_tree};
use std::collections::HashSet;

fn params(k: usize) -> FatTreeParams {
    FatTreeParams::new(k).expect("valid k")
}

#[test]
fn fat_tree_k4_has_expected_counts() {
    let topo = build_fat_tree(&params(4));
    assert_eq!(topo.hosts.len(), 16);
    assert_eq!(topo.edge_switches.len(), 8);
    assert_eq!(topo.agg_switches.len(), 8);
    assert_eq!(topo.core_switches.len(), 4);
    assert_eq!(topo.records().count(), 16 + 8 + 8 + 4);
}

#[test]
fn fat_tree_counts_scale_with_k() {
    for k in [4, 6, 8, 10, 12] {
        let p = params(k);
        let half = k / 2;
        let topo = build_fat_tree(&p);
        assert_eq!(topo.hosts.len(), half * half * k, "k={k}");
        assert_eq!(topo.edge_switches.len(), k * half, "k={k}");
        assert_eq!(topo.agg_switches.len(), k * half, "k={k}");
        assert_eq!(topo.core_switches.len(), half * half, "k={k}");
    }
}

#[test]
fn hosts_are_numbered_pod_major_on_even_edge_ports() {
    let p = params(6);
    let hosts = enumerate_hosts(&p);
    for (i, h) in hosts.iter().enumerate() {
        assert_eq!(h.idx, i);
        assert_eq!(h.uplink.port, 1);
        assert_eq!(h.uplink.peer_port % 2, 0);
    }
    // 第 2 个 pod、第 1 个边缘交换机上的第 3 台主机
    let h = &hosts[(2 * 3 + 1) * 3 + 2];
    assert_eq!(h.uplink.peer, DeviceId::Edge { pod: 2, slot: 1 });
    assert_eq!(h.uplink.peer_port, 6);
}

#[test]
fn edge_ports_alternate_aggregation_and_hosts() {
    let p = params(4);
    let edges = enumerate_edge_switches(&p);
    let e = &edges[1];
    assert_eq!(e.kind, SwitchKind::Edge);
    assert_eq!(e.id, DeviceId::Edge { pod: 0, slot: 1 });
    assert_eq!(
        e.ports,
        vec![
            PortLink::new(1, DeviceId::Aggr { pod: 0, slot: 2 }, 4),
            PortLink::new(2, DeviceId::Node { idx: 2 }, 1),
            PortLink::new(3, DeviceId::Aggr { pod: 0, slot: 3 }, 4),
            PortLink::new(4, DeviceId::Node { idx: 3 }, 1),
        ]
    );
}

#[test]
fn edge_level_consumes_hosts_in_host_enumeration_order() {
    let p = params(8);
    let from_edges: Vec<usize> = enumerate_edge_switches(&p)
        .iter()
        .flat_map(|s| s.ports.iter())
        .filter_map(|l| match l.peer {
            DeviceId::Node { idx } => Some(idx),
            _ => None,
        })
        .collect();
    let from_hosts: Vec<usize> = enumerate_hosts(&p).iter().map(|h| h.idx).collect();
    assert_eq!(from_edges, from_hosts);
}

#[test]
fn aggregation_slots_are_offset_past_edge_slots() {
    let p = params(4);
    let aggs = enumerate_agg_switches(&p);
    let last = aggs.last().unwrap();
    assert_eq!(last.id, DeviceId::Aggr { pod: 3, slot: 3 });
    assert_eq!(
        last.ports,
        vec![
            PortLink::new(1, DeviceId::Core { k: 4, group: 2, index: 1 }, 4),
            PortLink::new(2, DeviceId::Edge { pod: 3, slot: 0 }, 3),
            PortLink::new(3, DeviceId::Core { k: 4, group: 2, index: 2 }, 4),
            PortLink::new(4, DeviceId::Edge { pod: 3, slot: 1 }, 3),
        ]
    );

    let slots: HashSet<usize> = aggs
        .iter()
        .map(|a| match a.id {
            DeviceId::Aggr { slot, .. } => slot,
            other => panic!("unexpected id {other}"),
        })
        .collect();
    assert_eq!(slots, HashSet::from([2, 3]));
}

#[test]
fn core_switches_reach_every_pod_once() {
    let p = params(6);
    let cores = enumerate_core_switches(&p);
    assert_eq!(cores[0].id, DeviceId::Core { k: 6, group: 1, index: 1 });
    for c in &cores {
        assert_eq!(c.kind, SwitchKind::Core);
        let pods: Vec<usize> = c
            .ports
            .iter()
            .map(|l| match l.peer {
                DeviceId::Aggr { pod, .. } => pod,
                other => panic!("core linked to {other}"),
            })
            .collect();
        assert_eq!(pods, (0..6).collect::<Vec<_>>());
    }
}

#[test]
fn accessors_and_find_agree_with_records() {
    let topo = build_fat_tree(&params(4));
    assert_eq!(topo.host(1, 1, 0).idx, 6);
    assert_eq!(topo.edge(2, 1).id, DeviceId::Edge { pod: 2, slot: 1 });
    assert_eq!(topo.agg(2, 3).id, DeviceId::Aggr { pod: 2, slot: 3 });
    assert_eq!(topo.core(2, 1).id, DeviceId::Core { k: 4, group: 2, index: 1 });

    for rec in topo.records() {
        let found = topo.find(rec.id()).expect("record must be findable");
        assert_eq!(found.id(), rec.id());
    }
    assert!(topo.find(DeviceId::Node { idx: 16 }).is_none());
    assert!(topo.find(DeviceId::Aggr { pod: 0, slot: 1 }).is_none());
    assert!(topo.find(DeviceId::Edge { pod: 4, slot: 0 }).is_none());
    assert!(topo.find(DeviceId::Core { k: 6, group: 1, index: 1 }).is_none());
    assert!(matches!(
        topo.find(DeviceId::Node { idx: 0 }),
        Some(TopoRecord::Host(_))
    ));
}

#[test]
fn identities_render_with_fixed_templates() {
    assert_eq!(DeviceId::Node { idx: 12 }.to_string(), "Node(12)");
    assert_eq!(DeviceId::Edge { pod: 3, slot: 0 }.to_string(), "Edge(3 0 1)");
    assert_eq!(DeviceId::Aggr { pod: 0, slot: 2 }.to_string(), "Aggr(0 2 1)");
    assert_eq!(
        DeviceId::Core { k: 4, group: 2, index: 1 }.to_string(),
        "Core(4 2 1)"
    );
}
