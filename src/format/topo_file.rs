//! 拓扑描述文件（文本格式）
//!
//! 与下游仿真器约定的逐行格式：
//! ```text
//! Hca	1	"Node(0)"
//! [1]  "Edge(0 0 1)"[2]
//! Switch		4	"Edge(0 0 1)"
//! [1] "Aggr(0 2 1)"[2]
//! ```
//! 边缘交换机的端口行在 `]` 之后只有一个空格，其余记录为两个空格。

use std::io::Write;

use crate::error::TopoError;
use crate::topo::{FatTreeTopology, PortLink, SwitchKind, TopoRecord};

const RULE: &str = "####################################################";

fn write_header<W: Write>(topo: &FatTreeTopology, w: &mut W) -> Result<(), TopoError> {
    let p = &topo.params;
    writeln!(w, "#fat tree topology file.")?;
    writeln!(w, "#Value of k = {}", p.k)?;
    writeln!(w, "#Total number of hosts = {}", p.total_hosts())?;
    writeln!(w, "#Number of hosts under each switch = {}", p.hosts_per_edge)?;
    writeln!(w, "{RULE}")?;
    writeln!(w)?;
    Ok(())
}

fn write_port<W: Write>(w: &mut W, sep: &str, link: &PortLink) -> Result<(), TopoError> {
    writeln!(
        w,
        "[{}]{sep}\"{}\"[{}]",
        link.port, link.peer, link.peer_port
    )?;
    Ok(())
}

pub fn write_topo_file<W: Write>(topo: &FatTreeTopology, w: &mut W) -> Result<(), TopoError> {
    write_header(topo, w)?;
    for rec in topo.records() {
        match rec {
            TopoRecord::Host(h) => {
                writeln!(w, "Hca\t1\t\"{}\"", h.id())?;
                write_port(w, "  ", &h.uplink)?;
            }
            TopoRecord::Switch(s) => {
                writeln!(w, "Switch\t\t{}\t\"{}\"", topo.params.ports, s.id)?;
                let sep = match s.kind {
                    SwitchKind::Edge => " ",
                    SwitchKind::Aggregation | SwitchKind::Core => "  ",
                };
                for link in &s.ports {
                    write_port(w, sep, link)?;
                }
            }
        }
    }
    Ok(())
}

/// 渲染为字符串
pub fn render_topo_file(topo: &FatTreeTopology) -> Result<String, TopoError> {
    let mut buf = Vec::new();
    write_topo_file(topo, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
