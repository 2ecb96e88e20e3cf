//! Fat-tree 参数推导

use serde::Serialize;

use crate::error::TopoError;

/// 由 k 推导出的全部拓扑常量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FatTreeParams {
    pub k: usize,
    pub pods: usize,
    pub edge_per_pod: usize,
    pub agg_per_pod: usize,
    pub hosts_per_edge: usize,
    pub ports: usize,
}

/// 校验 k：必须是偶数且 >= 4，且主机总数 (k/2)²·k 不溢出 usize
pub fn validate_k(k: usize) -> Result<usize, TopoError> {
    let invalid = || TopoError::InvalidParameter {
        value: k.to_string(),
    };
    if k < 4 || k % 2 == 1 {
        return Err(invalid());
    }
    let half = k / 2;
    half.checked_mul(half)
        .and_then(|n| n.checked_mul(k))
        .ok_or_else(invalid)?;
    Ok(k)
}

/// 解析命令行给出的 k；非整数输入视为非法参数
pub fn parse_k(raw: Option<&str>) -> Result<usize, TopoError> {
    let raw = raw.ok_or(TopoError::MissingParameter)?;
    // 严格解析：带尾随字符的输入（如 "4abc"）直接拒绝，不做前缀截取
    let k = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| TopoError::InvalidParameter {
            value: raw.to_string(),
        })?;
    validate_k(k)
}

impl FatTreeParams {
    pub fn new(k: usize) -> Result<Self, TopoError> {
        validate_k(k).map(Self::derive)
    }

    /// Total over already validated k.
    pub(crate) fn derive(k: usize) -> Self {
        let half = k / 2;
        Self {
            k,
            pods: k,
            edge_per_pod: half,
            agg_per_pod: half,
            hosts_per_edge: half,
            ports: k,
        }
    }

    pub fn half(&self) -> usize {
        self.k / 2
    }

    pub fn total_hosts(&self) -> usize {
        self.pods * self.edge_per_pod * self.hosts_per_edge
    }

    pub fn total_edge_switches(&self) -> usize {
        self.pods * self.edge_per_pod
    }

    pub fn total_agg_switches(&self) -> usize {
        self.pods * self.agg_per_pod
    }

    pub fn total_core_switches(&self) -> usize {
        self.half() * self.half()
    }
}
