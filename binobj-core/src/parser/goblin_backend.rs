use goblin::elf::program_header::PT_LOAD;
use goblin::elf::Elf;
use goblin::mach::{Mach, MachO, MultiArch, SingleArch};
use goblin::pe::PE;
use goblin::Object;

use crate::header::elf::{ElfBinary, SHT_NOBITS};
use crate::header::macho::MachOBinary;
use crate::header::pe::PeBinary;
use crate::sections::file_range;
use crate::{
    BinaryParser, ParseErrorKind, ParseFailure, ParseResult, ParsedBinary, Section, SectionDetail,
};

/// [`BinaryParser`] backed by `goblin::Object::parse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoblinParser;

impl BinaryParser for GoblinParser {
    fn parse(&self, data: &[u8], name: &str) -> ParseResult<Option<ParsedBinary>> {
        let obj = Object::parse(data).map_err(|e| goblin_failure(e, data))?;

        let parsed = match obj {
            Object::PE(pe) => ParsedBinary::Pe(pe_binary(&pe, data)?),
            Object::Elf(elf) => ParsedBinary::Elf(elf_binary(&elf, data)),
            Object::Mach(Mach::Binary(macho)) => ParsedBinary::MachO(macho_binary(&macho)?),
            Object::Mach(Mach::Fat(fat)) => match first_fat_macho(&fat, data)? {
                Some(macho) => ParsedBinary::MachO(macho),
                None => return Ok(None),
            },
            Object::Archive(_) => {
                log::debug!("{name}: static archive, no indicators to extract");
                return Ok(None);
            }
            _ => return Ok(None),
        };

        log::debug!(
            "{name}: parsed as {} with {} sections",
            parsed.format(),
            parsed.header().sections().len()
        );
        Ok(Some(parsed))
    }
}

fn goblin_failure(err: goblin::error::Error, data: &[u8]) -> ParseFailure {
    use goblin::error::Error;

    let kind = match &err {
        Error::Malformed(_) if data.starts_with(b"MZ") => ParseErrorKind::Pe,
        Error::Malformed(_) | Error::BadMagic(_) => ParseErrorKind::BadFormat,
        Error::Scroll(_) => ParseErrorKind::Parser,
        Error::IO(_) => ParseErrorKind::BadFile,
        #[allow(unreachable_patterns)]
        _ => ParseErrorKind::Exception,
    };
    ParseFailure::new(kind, err.to_string())
}

fn conversion_failure(what: &str, err: goblin::error::Error) -> ParseFailure {
    ParseFailure::new(ParseErrorKind::Conversion, format!("{what}: {err}"))
}

fn pe_binary(pe: &PE, data: &[u8]) -> ParseResult<PeBinary> {
    let coff = &pe.header.coff_header;

    let mut sections = Vec::with_capacity(pe.sections.len());
    for s in &pe.sections {
        let name = s
            .name()
            .map_err(|e| conversion_failure("PE section name", e))?
            .to_string();
        let raw_size = u64::from(s.size_of_raw_data);
        let virtual_size = match s.virtual_size {
            0 => raw_size,
            v => u64::from(v),
        };
        let raw = file_range(data, u64::from(s.pointer_to_raw_data), raw_size);
        sections.push(Section {
            name,
            vma: u64::from(s.virtual_address),
            size: raw_size,
            virtual_size,
            file_offset: u64::from(s.pointer_to_raw_data),
            flags: u64::from(s.characteristics),
            detail: SectionDetail::Pe,
            raw_data: raw.to_vec(),
        });
    }

    Ok(PeBinary {
        characteristics: coff.characteristics,
        time_date_stamp: coff.time_date_stamp,
        entry: pe.entry as u64,
        image_base: pe.image_base as u64,
        subsystem: pe
            .header
            .optional_header
            .as_ref()
            .map(|oh| oh.windows_fields.subsystem),
        sections,
    })
}

fn elf_binary(elf: &Elf, data: &[u8]) -> ElfBinary {
    // goblin resolves extended numbering (e_shnum == 0) from section 0
    let sections = if !elf.section_headers.is_empty() {
        elf.section_headers
            .iter()
            .map(|sh| {
                let name = elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("").to_string();
                let raw = if sh.sh_type == SHT_NOBITS {
                    &[][..]
                } else {
                    file_range(data, sh.sh_offset, sh.sh_size)
                };
                Section {
                    name,
                    vma: sh.sh_addr,
                    size: sh.sh_size,
                    virtual_size: sh.sh_size,
                    file_offset: sh.sh_offset,
                    flags: sh.sh_flags,
                    detail: SectionDetail::Elf {
                        sh_type: sh.sh_type,
                    },
                    raw_data: raw.to_vec(),
                }
            })
            .collect()
    } else {
        log::info!("no section headers (stripped); using PT_LOAD segments");
        load_segments(elf, data)
    };

    ElfBinary {
        e_type: elf.header.e_type,
        e_machine: elf.header.e_machine,
        os_abi: elf.header.e_ident[goblin::elf::header::EI_OSABI],
        entry: elf.entry,
        interpreter: elf.interpreter.map(str::to_string),
        sections,
    }
}

fn load_segments(elf: &Elf, data: &[u8]) -> Vec<Section> {
    elf.program_headers
        .iter()
        .enumerate()
        .filter(|(_, ph)| ph.p_type == PT_LOAD && ph.p_filesz > 0)
        .map(|(i, ph)| Section {
            name: format!(".segment_{i}"),
            vma: ph.p_vaddr,
            size: ph.p_filesz,
            virtual_size: ph.p_memsz,
            file_offset: ph.p_offset,
            flags: u64::from(ph.p_flags),
            detail: SectionDetail::ElfSegment { index: i },
            raw_data: file_range(data, ph.p_offset, ph.p_filesz).to_vec(),
        })
        .collect()
}

fn macho_binary(macho: &MachO) -> ParseResult<MachOBinary> {
    let mut sections = Vec::new();
    for segment in macho.segments.iter() {
        let segment_sections = segment.sections().map_err(|e| {
            ParseFailure::new(ParseErrorKind::Integrity, format!("Mach-O segment: {e}"))
        })?;
        for (section, section_data) in segment_sections {
            let name = section
                .name()
                .map_err(|e| conversion_failure("Mach-O section name", e))?
                .to_string();
            let segname = section
                .segname()
                .map_err(|e| conversion_failure("Mach-O segment name", e))?
                .to_string();
            sections.push(Section {
                name,
                vma: section.addr,
                size: section.size,
                virtual_size: section.size,
                file_offset: u64::from(section.offset),
                flags: u64::from(section.flags),
                detail: SectionDetail::MachO { segment: segname },
                raw_data: section_data.to_vec(),
            });
        }
    }

    Ok(MachOBinary {
        cputype: macho.header.cputype,
        filetype: macho.header.filetype,
        entry: macho.entry,
        name: macho.name.map(str::to_string),
        sections,
    })
}

/// Universal binaries contribute their first Mach-O slice.
fn first_fat_macho(fat: &MultiArch, data: &[u8]) -> ParseResult<Option<MachOBinary>> {
    let arches = fat.arches().map_err(|e| goblin_failure(e, data))?;
    for (i, arch) in arches.iter().enumerate() {
        match fat.get(i).map_err(|e| goblin_failure(e, data))? {
            SingleArch::MachO(macho) => {
                log::debug!(
                    "universal binary: using slice {i} of {} (cputype {:#x})",
                    arches.len(),
                    arch.cputype
                );
                return macho_binary(&macho).map(Some);
            }
            SingleArch::Archive(_) => continue,
        }
    }
    Ok(None)
}
