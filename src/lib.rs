pub mod error;
pub mod format;
pub mod topo;

#[cfg(test)]
mod test;
