//! 拓扑输出格式

mod json;
mod topo_file;

use std::io::Write;

use clap::ValueEnum;

use crate::error::TopoError;
use crate::topo::FatTreeTopology;

pub use json::{JsonDevice, JsonDeviceKind, JsonPort, JsonTopology, write_json};
pub use topo_file::{render_topo_file, write_topo_file};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 逐行文本格式（兼容下游仿真器）
    #[default]
    Topo,
    Json,
}

pub fn write_topology<W: Write>(
    topo: &FatTreeTopology,
    format: OutputFormat,
    w: &mut W,
) -> Result<(), TopoError> {
    match format {
        OutputFormat::Topo => write_topo_file(topo, w),
        OutputFormat::Json => write_json(topo, w),
    }
}
