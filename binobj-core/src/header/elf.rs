use serde::Serialize;

use crate::header::Header;
use crate::Section;

/// Facts pulled out of an ELF file.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElfBinary {
    /// Object file type (`e_type`).
    pub e_type: u16,
    /// Target architecture (`e_machine`).
    pub e_machine: u16,
    /// `e_ident[EI_OSABI]`.
    pub os_abi: u8,
    pub entry: u64,
    pub interpreter: Option<String>,
    pub sections: Vec<Section>,
}

pub const SHT_NOBITS: u32 = 8;

pub fn e_type_name(e_type: u16) -> &'static str {
    match e_type {
        0 => "NONE",
        1 => "REL",
        2 => "EXEC",
        3 => "DYN",
        4 => "CORE",
        _ => "UNKNOWN",
    }
}

pub fn machine_name(e_machine: u16) -> String {
    let name = match e_machine {
        2 => "SPARC",
        3 => "i386",
        8 => "MIPS",
        20 => "PPC",
        21 => "PPC64",
        40 => "ARM",
        43 => "SPARCV9",
        50 => "IA_64",
        62 => "x86_64",
        183 => "AARCH64",
        243 => "RISCV",
        258 => "LOONGARCH",
        other => return format!("EM_{other}"),
    };
    name.to_string()
}

pub fn os_abi_name(os_abi: u8) -> String {
    let name = match os_abi {
        0 => "SYSTEMV",
        1 => "HPUX",
        2 => "NETBSD",
        3 => "LINUX",
        6 => "SOLARIS",
        9 => "FREEBSD",
        12 => "OPENBSD",
        97 => "ARM",
        255 => "STANDALONE",
        other => return format!("OSABI_{other}"),
    };
    name.to_string()
}

pub fn section_type_name(sh_type: u32) -> String {
    let name = match sh_type {
        0 => "NULL",
        1 => "PROGBITS",
        2 => "SYMTAB",
        3 => "STRTAB",
        4 => "RELA",
        5 => "HASH",
        6 => "DYNAMIC",
        7 => "NOTE",
        SHT_NOBITS => "NOBITS",
        9 => "REL",
        11 => "DYNSYM",
        14 => "INIT_ARRAY",
        15 => "FINI_ARRAY",
        16 => "PREINIT_ARRAY",
        17 => "GROUP",
        18 => "SYMTAB_SHNDX",
        0x6fff_fff6 => "GNU_HASH",
        0x6fff_fffd => "GNU_VERDEF",
        0x6fff_fffe => "GNU_VERNEED",
        0x6fff_ffff => "GNU_VERSYM",
        other => return format!("{other:#x}"),
    };
    name.to_string()
}

const SECTION_FLAGS: &[(u64, &str)] = &[
    (0x1, "WRITE"),
    (0x2, "ALLOC"),
    (0x4, "EXECINSTR"),
    (0x10, "MERGE"),
    (0x20, "STRINGS"),
    (0x40, "INFO_LINK"),
    (0x80, "LINK_ORDER"),
    (0x200, "GROUP"),
    (0x400, "TLS"),
    (0x800, "COMPRESSED"),
];

/// Names of the `SHF_*` bits set in `flags`, lowest bit first.
pub fn section_flag_names(flags: u64) -> Vec<&'static str> {
    SECTION_FLAGS
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}

impl ElfBinary {
    pub fn type_name(&self) -> &'static str {
        e_type_name(self.e_type)
    }
}

impl Header for ElfBinary {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}
