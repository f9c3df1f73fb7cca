//! Architecture detection.

use std::fmt;

/// CPU architecture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X86_64,
    ARM,
    ARM64,
    PowerPC64,
    S390X,
    RiscV64,
    Unknown,
}

impl Arch {
    /// Runtime-style architecture name used in platform tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "ia32",
            Arch::X86_64 => "x64",
            Arch::ARM => "arm",
            Arch::ARM64 => "arm64",
            Arch::PowerPC64 => "ppc64",
            Arch::S390X => "s390x",
            Arch::RiscV64 => "riscv64",
            Arch::Unknown => "unknown",
        }
    }

    pub(crate) fn from_target(arch: &str) -> Self {
        match arch {
            "x86" | "i386" | "i686" => Arch::X86,
            "x86_64" => Arch::X86_64,
            "arm" | "armv7l" => Arch::ARM,
            "aarch64" | "arm64" => Arch::ARM64,
            "powerpc64" => Arch::PowerPC64,
            "s390x" => Arch::S390X,
            "riscv64" => Arch::RiscV64,
            _ => Arch::Unknown,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Detect the architecture this process was built for.
pub fn detect() -> Arch { Arch::from_target(std::env::consts::ARCH) }
