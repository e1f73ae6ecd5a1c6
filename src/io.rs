//! Read logic networks from files and write simulation results

mod bench;
mod report;
mod verilog;

use std::fs::File;
use std::path::Path;

pub use bench::read_bench;
pub use report::{write_fault_report, write_truth_table};
pub use verilog::read_verilog;

use crate::error::{Error, Result};
use crate::Network;

/// Read a logic network from a file
///
/// Following extensions are supported: .bench, .v
pub fn read_network_file(path: &Path) -> Result<Network> {
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match ext.as_str() {
        "bench" => read_bench(File::open(path)?),
        "v" => read_verilog(File::open(path)?),
        _ => Err(Error::UnknownExtension(ext)),
    }
}
