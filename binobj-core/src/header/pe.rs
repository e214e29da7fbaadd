use serde::Serialize;

use crate::header::Header;
use crate::Section;

pub const IMAGE_FILE_EXECUTABLE_IMAGE: u16 = 0x0002;
pub const IMAGE_FILE_DLL: u16 = 0x2000;
pub const IMAGE_SUBSYSTEM_NATIVE: u16 = 1;

/// Facts pulled out of a PE image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeBinary {
    pub characteristics: u16,
    pub time_date_stamp: u32,
    /// Relative virtual address of the entry point.
    pub entry: u64,
    pub image_base: u64,
    /// `None` for images without an optional header.
    pub subsystem: Option<u16>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeKind {
    Dll,
    Driver,
    Exe,
    Unknown,
}

impl PeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PeKind::Dll => "dll",
            PeKind::Driver => "driver",
            PeKind::Exe => "exe",
            PeKind::Unknown => "unknown",
        }
    }
}

impl PeBinary {
    pub fn has_characteristic(&self, flag: u16) -> bool {
        self.characteristics & flag != 0
    }

    pub fn kind(&self) -> PeKind {
        if self.has_characteristic(IMAGE_FILE_DLL) {
            PeKind::Dll
        } else if self.subsystem == Some(IMAGE_SUBSYSTEM_NATIVE) {
            PeKind::Driver
        } else if self.has_characteristic(IMAGE_FILE_EXECUTABLE_IMAGE) {
            PeKind::Exe
        } else {
            PeKind::Unknown
        }
    }
}

impl Header for PeBinary {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}
