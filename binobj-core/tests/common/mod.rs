#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use binobj_core::{BinaryParser, ParseResult, ParsedBinary};
use log::{Level, LevelFilter, Log, Metadata, Record};
use object::write::Object;
use object::{Architecture, BinaryFormat, Endianness, SectionKind};

pub const PE_TIMESTAMP: u32 = 1_600_000_000;
pub const PE_IMAGE_BASE: u32 = 0x0040_0000;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Start capturing log records for the current test thread.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("install capture logger");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// Warnings logged on this thread since `capture_logs`.
pub fn warnings() -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}

/// Parser returning a canned result and counting calls.
pub struct MockParser {
    pub result: ParseResult<Option<ParsedBinary>>,
    pub calls: AtomicUsize,
}

impl MockParser {
    pub fn new(result: ParseResult<Option<ParsedBinary>>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BinaryParser for MockParser {
    fn parse(&self, _data: &[u8], _name: &str) -> ParseResult<Option<ParsedBinary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Relocatable x86_64 ELF with `.text` and `.data`.
pub fn elf_fixture() -> Vec<u8> {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let text = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    obj.section_mut(text)
        .set_data(vec![0x55, 0x48, 0x89, 0xe5, 0x5d, 0xc3], 16);
    let data = obj.add_section(Vec::new(), b".data".to_vec(), SectionKind::Data);
    obj.section_mut(data).set_data(b"hello world\0".to_vec(), 8);
    obj.write().expect("write ELF fixture")
}

/// x86_64 Mach-O object with `__TEXT,__text` and `__DATA,__data`.
pub fn macho_fixture() -> Vec<u8> {
    let mut obj = Object::new(BinaryFormat::MachO, Architecture::X86_64, Endianness::Little);
    let text_segment = obj
        .segment_name(object::write::StandardSegment::Text)
        .to_vec();
    let data_segment = obj
        .segment_name(object::write::StandardSegment::Data)
        .to_vec();
    let text = obj.add_section(text_segment, b"__text".to_vec(), SectionKind::Text);
    obj.section_mut(text).set_data(vec![0x55, 0x48, 0x89, 0xe5, 0x5d, 0xc3], 16);
    let data = obj.add_section(data_segment, b"__data".to_vec(), SectionKind::Data);
    obj.section_mut(data).set_data(b"hello world\0".to_vec(), 8);
    obj.write().expect("write Mach-O fixture")
}

/// Offset of the first section header in `macho_fixture()`: after the
/// 32-byte `mach_header_64` and the 72-byte `segment_command_64`.
pub const MACHO_FIRST_SECTION: usize = 32 + 72;
/// `nsects` of the single segment in `macho_fixture()`.
pub const MACHO_SEGMENT_NSECTS: usize = 32 + 64;

/// Wraps `slice` in a one-architecture universal (fat) container.
pub fn fat_macho(slice: &[u8]) -> Vec<u8> {
    const SLICE_OFFSET: usize = 0x1000;
    let mut buf = Vec::with_capacity(SLICE_OFFSET + slice.len());
    for word in [
        0xcafe_babe,
        1,
        0x0100_0007,
        3,
        SLICE_OFFSET as u32,
        slice.len() as u32,
        12,
    ] {
        buf.extend_from_slice(&u32::to_be_bytes(word));
    }
    buf.resize(SLICE_OFFSET, 0);
    buf.extend_from_slice(slice);
    buf
}

pub const STRIPPED_ELF_BASE: u64 = 0x40_0000;
pub const STRIPPED_ELF_ENTRY: u64 = STRIPPED_ELF_BASE + 120;

/// x86_64 executable with one PT_LOAD segment and no section headers.
pub fn stripped_elf_fixture() -> Vec<u8> {
    const EHDR: usize = 64;
    const PHDR: usize = 56;
    let code = [0x48, 0x31, 0xff, 0xb8, 0x3c, 0x00, 0x00, 0x00, 0x0f, 0x05];
    let total = (EHDR + PHDR + code.len()) as u64;

    let mut buf = vec![0u8; EHDR + PHDR];
    buf[0..4].copy_from_slice(b"\x7fELF");
    buf[4] = 2; // ELFCLASS64
    buf[5] = 1; // little endian
    buf[6] = 1;
    put_u16(&mut buf, 16, 2); // ET_EXEC
    put_u16(&mut buf, 18, 62); // EM_X86_64
    put_u32(&mut buf, 20, 1);
    put_u64(&mut buf, 24, STRIPPED_ELF_ENTRY);
    put_u64(&mut buf, 32, EHDR as u64);
    put_u16(&mut buf, 52, EHDR as u16);
    put_u16(&mut buf, 54, PHDR as u16);
    put_u16(&mut buf, 56, 1);
    put_u16(&mut buf, 58, 64);

    put_u32(&mut buf, EHDR, 1); // PT_LOAD
    put_u32(&mut buf, EHDR + 4, 5); // R+X
    put_u64(&mut buf, EHDR + 16, STRIPPED_ELF_BASE);
    put_u64(&mut buf, EHDR + 24, STRIPPED_ELF_BASE);
    put_u64(&mut buf, EHDR + 32, total);
    put_u64(&mut buf, EHDR + 40, total);
    put_u64(&mut buf, EHDR + 48, 0x1000);

    buf.extend_from_slice(&code);
    buf
}

/// `elf_fixture()` rewritten to extended section numbering: `e_shnum` is 0
/// and the real count lives in the null section header's `sh_size`.
pub fn extended_numbering_elf() -> Vec<u8> {
    let mut buf = elf_fixture();
    let shoff = u64::from_le_bytes(buf[40..48].try_into().unwrap()) as usize;
    let shnum = u16::from_le_bytes(buf[60..62].try_into().unwrap());
    put_u64(&mut buf, shoff + 32, u64::from(shnum));
    put_u16(&mut buf, 60, 0);
    buf
}

fn put_u64(buf: &mut [u8], at: usize, v: u64) {
    buf[at..at + 8].copy_from_slice(&v.to_le_bytes());
}

fn put_u16(buf: &mut [u8], at: usize, v: u16) {
    buf[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut [u8], at: usize, v: u32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

/// Offset of the first PE32 section header in `pe32_fixture` output.
pub const PE_FIRST_SECTION: usize = 0x80 + 4 + 20 + 224;

/// Minimal PE32 console executable. The entry point is the start of the
/// first section.
pub fn pe32_fixture(sections: &[(&str, &[u8], u32)]) -> Vec<u8> {
    const PE_OFFSET: usize = 0x80;
    const FILE_ALIGN: usize = 0x200;
    const SECTION_ALIGN: u32 = 0x1000;
    let coff = PE_OFFSET + 4;
    let opt = coff + 20;
    let win = opt + 28;
    let table = opt + 224;
    assert!(table + 40 * sections.len() <= FILE_ALIGN, "too many sections");

    let mut buf = vec![0u8; FILE_ALIGN];
    buf[0..2].copy_from_slice(b"MZ");
    put_u32(&mut buf, 0x3c, PE_OFFSET as u32);
    buf[PE_OFFSET..PE_OFFSET + 4].copy_from_slice(b"PE\0\0");

    // COFF file header
    put_u16(&mut buf, coff, 0x14c);
    put_u16(&mut buf, coff + 2, sections.len() as u16);
    put_u32(&mut buf, coff + 4, PE_TIMESTAMP);
    put_u16(&mut buf, coff + 16, 224);
    put_u16(&mut buf, coff + 18, 0x0102);

    // standard fields
    put_u16(&mut buf, opt, 0x10b);
    buf[opt + 2] = 14;
    put_u32(&mut buf, opt + 16, SECTION_ALIGN);
    put_u32(&mut buf, opt + 20, SECTION_ALIGN);

    // windows fields
    put_u32(&mut buf, win, PE_IMAGE_BASE);
    put_u32(&mut buf, win + 4, SECTION_ALIGN);
    put_u32(&mut buf, win + 8, FILE_ALIGN as u32);
    put_u16(&mut buf, win + 12, 4);
    put_u16(&mut buf, win + 20, 4);
    put_u32(&mut buf, win + 28, SECTION_ALIGN * (sections.len() as u32 + 1));
    put_u32(&mut buf, win + 32, FILE_ALIGN as u32);
    put_u16(&mut buf, win + 40, 3);
    put_u32(&mut buf, win + 44, 0x10_0000);
    put_u32(&mut buf, win + 48, 0x1000);
    put_u32(&mut buf, win + 52, 0x10_0000);
    put_u32(&mut buf, win + 56, 0x1000);
    put_u32(&mut buf, win + 64, 16);

    for (i, (name, data, characteristics)) in sections.iter().enumerate() {
        let header = table + 40 * i;
        let raw_size = data.len().div_ceil(FILE_ALIGN) * FILE_ALIGN;
        let raw_offset = buf.len();

        let name = name.as_bytes();
        buf[header..header + name.len().min(8)].copy_from_slice(&name[..name.len().min(8)]);
        put_u32(&mut buf, header + 8, data.len() as u32);
        put_u32(&mut buf, header + 12, SECTION_ALIGN * (i as u32 + 1));
        put_u32(&mut buf, header + 16, raw_size as u32);
        put_u32(&mut buf, header + 20, raw_offset as u32);
        put_u32(&mut buf, header + 36, *characteristics);

        buf.extend_from_slice(data);
        buf.resize(raw_offset + raw_size, 0);
    }
    buf
}

pub const TEXT_CHARACTERISTICS: u32 = 0x6000_0020;
pub const DATA_CHARACTERISTICS: u32 = 0xc000_0040;

pub fn default_pe() -> Vec<u8> {
    pe32_fixture(&[
        (".text", &b"\x55\x8b\xec\x33\xc0\x5d\xc3"[..], TEXT_CHARACTERISTICS),
        (".data", &b"hello from the data section\0"[..], DATA_CHARACTERISTICS),
    ])
}

/// Bytes no supported format claims: a text prefix, then LCG noise.
pub fn noise(len: usize) -> Vec<u8> {
    let mut out = b"RANDOM-NOISE:".to_vec();
    let mut state: u32 = 0x1234_5678;
    while out.len() < len {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        out.push((state >> 24) as u8);
    }
    out
}
