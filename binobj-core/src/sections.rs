use serde::Serialize;

/// Format-specific facts a section carries besides its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SectionDetail {
    Pe,
    Elf { sh_type: u32 },
    /// `PT_LOAD` segment standing in for sections of a stripped ELF.
    ElfSegment { index: usize },
    MachO { segment: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub vma: u64,
    /// Size as the format reports it (raw size for PE).
    pub size: u64,
    /// Size once mapped; differs from `size` for PE and NOBITS-like sections.
    pub virtual_size: u64,
    pub file_offset: u64,
    pub flags: u64,
    pub detail: SectionDetail,
    /// Bytes backing the section that actually lie inside the input.
    #[serde(skip)]
    pub raw_data: Vec<u8>,
}

impl Section {
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// True when `addr` falls inside `[vma, vma + virtual_size)`.
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.vma && addr - self.vma < self.virtual_size
    }
}

/// Slice `len` bytes at `offset`, clamped to the end of `data`.
///
/// Truncated binaries still yield the part of a section that is present.
pub fn file_range(data: &[u8], offset: u64, len: u64) -> &[u8] {
    let Ok(start) = usize::try_from(offset) else {
        return &[];
    };
    if start >= data.len() {
        return &[];
    }
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(data.len());
    &data[start..end]
}
