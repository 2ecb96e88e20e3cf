//! 拓扑生成模块
//!
//! 由单个参数 k 推导 fat-tree 的全部设备与端口连接。

mod device;
pub mod fat_tree;
mod params;
pub mod verify;

pub use device::{DeviceId, HostRecord, PortLink, SwitchKind, SwitchRecord, TopoRecord};
pub use fat_tree::{FatTreeTopology, build_fat_tree};
pub use params::{FatTreeParams, parse_k, validate_k};
pub use verify::{Violation, shared_core, verify};
