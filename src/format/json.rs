//! JSON 格式输出
//!
//! 与文本格式携带相同字段：每个设备一条记录，按文档顺序排列。

use std::io::Write;

use serde::Serialize;

use crate::error::TopoError;
use crate::topo::{DeviceId, FatTreeParams, FatTreeTopology, SwitchKind, TopoRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonDeviceKind {
    Host,
    Edge,
    Aggregation,
    Core,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonPort {
    pub port: usize,
    pub peer_name: String,
    pub peer: DeviceId,
    pub peer_port: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonDevice {
    pub name: String,
    pub kind: JsonDeviceKind,
    pub id: DeviceId,
    pub ports: Vec<JsonPort>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonTopology {
    pub format: &'static str,
    pub params: FatTreeParams,
    pub total_hosts: usize,
    pub devices: Vec<JsonDevice>,
}

impl JsonTopology {
    pub fn from_topology(topo: &FatTreeTopology) -> Self {
        let devices = topo
            .records()
            .map(|rec| {
                let kind = match rec {
                    TopoRecord::Host(_) => JsonDeviceKind::Host,
                    TopoRecord::Switch(s) => match s.kind {
                        SwitchKind::Edge => JsonDeviceKind::Edge,
                        SwitchKind::Aggregation => JsonDeviceKind::Aggregation,
                        SwitchKind::Core => JsonDeviceKind::Core,
                    },
                };
                let id = rec.id();
                JsonDevice {
                    name: id.to_string(),
                    kind,
                    id,
                    ports: rec
                        .ports()
                        .iter()
                        .map(|l| JsonPort {
                            port: l.port,
                            peer_name: l.peer.to_string(),
                            peer: l.peer,
                            peer_port: l.peer_port,
                        })
                        .collect(),
                }
            })
            .collect();
        Self {
            format: "fat-tree",
            params: topo.params,
            total_hosts: topo.params.total_hosts(),
            devices,
        }
    }
}

pub fn write_json<W: Write>(topo: &FatTreeTopology, w: &mut W) -> Result<(), TopoError> {
    serde_json::to_writer_pretty(&mut *w, &JsonTopology::from_topology(topo))?;
    writeln!(w)?;
    Ok(())
}
