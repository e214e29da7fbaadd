//! Turns a binary into `file` + format + section records.
//!
//! [`make_binary_objects`] never fails: when the binary cannot be parsed the
//! caller still gets the `file` object, and [`BinaryObjects::outcome`] says
//! why nothing else was produced.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::header::elf::ElfBinary;
use crate::header::macho::MachOBinary;
use crate::header::pe::PeBinary;
use crate::objects::{self, FormatRecord, MispObject, ObjectOptions};
use crate::parser::{default_parser, BinaryParser};
use crate::{BinaryFormat, ParseErrorKind, ParseFailure, ParsedBinary};

/// Where the bytes come from: a path, or a buffer with a declared filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinarySource {
    pub filepath: Option<PathBuf>,
    pub pseudofile: Option<Vec<u8>>,
    pub filename: Option<String>,
}

impl BinarySource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            filepath: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_buffer(data: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            filepath: None,
            pseudofile: Some(data.into()),
            filename: Some(filename.into()),
        }
    }

    /// Empty paths and filenames count as absent.
    fn path(&self) -> Option<&Path> {
        self.filepath
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn declared_name(&self) -> Option<&str> {
        self.filename.as_deref().filter(|n| !n.is_empty())
    }

    /// Declared filename, else the last component of the path.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.declared_name() {
            return Some(name.to_string());
        }
        self.path().map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
    }

    /// `None` unless there is a path, or both a buffer and a filename.
    fn load(&self) -> Option<Result<Cow<'_, [u8]>, ParseFailure>> {
        if let Some(path) = self.path() {
            return Some(fs::read(path).map(Cow::Owned).map_err(|err| {
                ParseFailure::new(
                    ParseErrorKind::BadFile,
                    format!("{}: {err}", path.display()),
                )
            }));
        }
        match (&self.pseudofile, self.declared_name()) {
            (Some(data), Some(_)) => Some(Ok(Cow::Borrowed(data.as_slice()))),
            _ => None,
        }
    }
}

/// The format object produced for a recognized binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormatObject {
    Pe(MispObject),
    Elf(MispObject),
    MachO(MispObject),
}

impl FormatObject {
    fn new(format: BinaryFormat, object: MispObject) -> Self {
        match format {
            BinaryFormat::Pe => FormatObject::Pe(object),
            BinaryFormat::Elf => FormatObject::Elf(object),
            BinaryFormat::MachO => FormatObject::MachO(object),
        }
    }

    pub fn format(&self) -> BinaryFormat {
        match self {
            FormatObject::Pe(_) => BinaryFormat::Pe,
            FormatObject::Elf(_) => BinaryFormat::Elf,
            FormatObject::MachO(_) => BinaryFormat::MachO,
        }
    }

    pub fn object(&self) -> &MispObject {
        match self {
            FormatObject::Pe(obj) | FormatObject::Elf(obj) | FormatObject::MachO(obj) => obj,
        }
    }

    pub fn into_object(self) -> MispObject {
        match self {
            FormatObject::Pe(obj) | FormatObject::Elf(obj) | FormatObject::MachO(obj) => obj,
        }
    }
}

/// Why a call did or did not produce a format object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ParseOutcome {
    Parsed(BinaryFormat),
    ParserUnavailable,
    MissingSource,
    /// The parser did not recognize the bytes as PE, ELF or Mach-O.
    Unrecognized,
    Failed(ParseFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryObjects {
    pub file: MispObject,
    pub binary: Option<FormatObject>,
    pub sections: Vec<MispObject>,
    pub outcome: ParseOutcome,
}

impl BinaryObjects {
    fn file_only(file: MispObject, outcome: ParseOutcome) -> Self {
        Self {
            file,
            binary: None,
            sections: Vec::new(),
            outcome,
        }
    }

    pub fn into_parts(self) -> (MispObject, Option<FormatObject>, Vec<MispObject>) {
        (self.file, self.binary, self.sections)
    }
}

fn include(mut file: MispObject, format: BinaryFormat, record: FormatRecord) -> BinaryObjects {
    file.add_reference(
        record.object.uuid,
        "includes",
        &format!("{} indicators", format.label()),
    );
    log::debug!(
        "file {} includes {format} object {} with {} sections",
        file.uuid,
        record.object.uuid,
        record.sections.len()
    );
    BinaryObjects {
        file,
        binary: Some(FormatObject::new(format, record.object)),
        sections: record.sections,
        outcome: ParseOutcome::Parsed(format),
    }
}

pub fn make_pe_objects(pe: &PeBinary, file: MispObject, options: &ObjectOptions) -> BinaryObjects {
    include(file, BinaryFormat::Pe, objects::pe::build(pe, options))
}

pub fn make_elf_objects(elf: &ElfBinary, file: MispObject, options: &ObjectOptions) -> BinaryObjects {
    include(file, BinaryFormat::Elf, objects::elf::build(elf, options))
}

pub fn make_macho_objects(
    macho: &MachOBinary,
    file: MispObject,
    options: &ObjectOptions,
) -> BinaryObjects {
    include(file, BinaryFormat::MachO, objects::macho::build(macho, options))
}

/// Builds the records for `source` using `parser`, absorbing every failure.
pub fn make_binary_objects(
    source: &BinarySource,
    options: &ObjectOptions,
    parser: Option<&dyn BinaryParser>,
) -> BinaryObjects {
    let name = source.display_name();
    let loaded = source.load();
    let data = match &loaded {
        Some(Ok(data)) => Some(&**data),
        _ => None,
    };
    let file = objects::file::build(name.as_deref(), data, options);

    let Some(parser) = parser else {
        log::warn!("no binary parser available; enable the `goblin-parser` feature of binobj-core");
        return BinaryObjects::file_only(file, ParseOutcome::ParserUnavailable);
    };
    let Some(loaded) = loaded else {
        log::warn!("need either a filepath, or a buffer and a filename");
        return BinaryObjects::file_only(file, ParseOutcome::MissingSource);
    };
    let data = match loaded {
        Ok(data) => data,
        Err(failure) => {
            log::warn!("{failure}");
            return BinaryObjects::file_only(file, ParseOutcome::Failed(failure));
        }
    };

    let name = name.as_deref().unwrap_or_default();
    match parser.parse(&data, name) {
        Ok(Some(ParsedBinary::Pe(pe))) => make_pe_objects(&pe, file, options),
        Ok(Some(ParsedBinary::Elf(elf))) => make_elf_objects(&elf, file, options),
        Ok(Some(ParsedBinary::MachO(macho))) => make_macho_objects(&macho, file, options),
        Ok(None) => BinaryObjects::file_only(file, ParseOutcome::Unrecognized),
        Err(failure) => {
            log::warn!("{failure}");
            BinaryObjects::file_only(file, ParseOutcome::Failed(failure))
        }
    }
}

/// [`make_binary_objects`] with the parser compiled into this crate.
pub fn make_binary_objects_default(source: &BinarySource, options: &ObjectOptions) -> BinaryObjects {
    make_binary_objects(source, options, default_parser())
}
