//! Host description for diagnostics.
//!
//! Not part of the platform tag: distribution names and kernel versions do
//! not affect artifact compatibility.

use once_cell::sync::Lazy;
use sysinfo::System;

static HOST_INFO: Lazy<HostInfo> = Lazy::new(HostInfo::load);

#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub name:           Option<String>,
    pub os_version:     Option<String>,
    pub kernel_version: Option<String>,
    pub cpu_arch:       String,
    pub host_name:      Option<String>,
}

impl HostInfo {
    fn load() -> Self {
        Self {
            name:           System::name(),
            os_version:     System::os_version(),
            kernel_version: System::kernel_version(),
            cpu_arch:       System::cpu_arch(),
            host_name:      System::host_name(),
        }
    }

    /// Cached description of the running host.
    pub fn current() -> &'static HostInfo { &HOST_INFO }
}
