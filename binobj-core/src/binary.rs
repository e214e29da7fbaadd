use std::fmt;

use serde::Serialize;

use crate::header::elf::ElfBinary;
use crate::header::macho::MachOBinary;
use crate::header::pe::PeBinary;
use crate::header::Header;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryFormat {
    Pe,
    Elf,
    MachO,
}

impl BinaryFormat {
    /// Name used in reference comments, e.g. "PE indicators".
    pub fn label(self) -> &'static str {
        match self {
            BinaryFormat::Pe => "PE",
            BinaryFormat::Elf => "ELF",
            BinaryFormat::MachO => "MachO",
        }
    }

    /// Record template name for the format object.
    pub fn object_name(self) -> &'static str {
        match self {
            BinaryFormat::Pe => "pe",
            BinaryFormat::Elf => "elf",
            BinaryFormat::MachO => "macho",
        }
    }

    /// Record template name for the format's sections.
    pub fn section_object_name(self) -> &'static str {
        match self {
            BinaryFormat::Pe => "pe-section",
            BinaryFormat::Elf => "elf-section",
            BinaryFormat::MachO => "macho-section",
        }
    }
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A binary the parser recognized, owning everything the record builders need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParsedBinary {
    Pe(PeBinary),
    Elf(ElfBinary),
    MachO(MachOBinary),
}

impl ParsedBinary {
    pub fn format(&self) -> BinaryFormat {
        match self {
            ParsedBinary::Pe(_) => BinaryFormat::Pe,
            ParsedBinary::Elf(_) => BinaryFormat::Elf,
            ParsedBinary::MachO(_) => BinaryFormat::MachO,
        }
    }

    pub fn header(&self) -> &dyn Header {
        match self {
            ParsedBinary::Pe(pe) => pe,
            ParsedBinary::Elf(elf) => elf,
            ParsedBinary::MachO(macho) => macho,
        }
    }
}
