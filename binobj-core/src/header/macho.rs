use serde::Serialize;

use crate::header::Header;
use crate::Section;

pub const MH_EXECUTE: u32 = 0x2;

const CPU_ARCH_ABI64: u32 = 0x0100_0000;

/// Facts pulled out of a single-architecture Mach-O image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachOBinary {
    pub cputype: u32,
    pub filetype: u32,
    pub entry: u64,
    /// Install name of a dylib (`LC_ID_DYLIB`).
    pub name: Option<String>,
    pub sections: Vec<Section>,
}

pub fn filetype_name(filetype: u32) -> &'static str {
    match filetype {
        0x1 => "OBJECT",
        MH_EXECUTE => "EXECUTE",
        0x3 => "FVMLIB",
        0x4 => "CORE",
        0x5 => "PRELOAD",
        0x6 => "DYLIB",
        0x7 => "DYLINKER",
        0x8 => "BUNDLE",
        0x9 => "DYLIB_STUB",
        0xa => "DSYM",
        0xb => "KEXT_BUNDLE",
        _ => "UNKNOWN",
    }
}

pub fn cpu_name(cputype: u32) -> String {
    let name = match cputype {
        7 => "x86",
        12 => "arm",
        18 => "powerpc",
        t if t == 7 | CPU_ARCH_ABI64 => "x86_64",
        t if t == 12 | CPU_ARCH_ABI64 => "arm64",
        t if t == 18 | CPU_ARCH_ABI64 => "powerpc64",
        other => return format!("cpu_{other:#x}"),
    };
    name.to_string()
}

impl MachOBinary {
    pub fn filetype_name(&self) -> &'static str {
        filetype_name(self.filetype)
    }
}

impl Header for MachOBinary {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}
