use crate::binary::BinaryFormat;
use crate::header::elf::{machine_name, os_abi_name, ElfBinary};
use crate::objects::{section, FormatRecord, MispObject, ObjectOptions};

pub fn build(elf: &ElfBinary, options: &ObjectOptions) -> FormatRecord {
    let mut obj = MispObject::new(BinaryFormat::Elf.object_name(), options);

    obj.add_attribute("type", "text", elf.type_name())
        .add_attribute("arch", "text", machine_name(elf.e_machine))
        .add_attribute("os_abi", "text", os_abi_name(elf.os_abi))
        .add_attribute("entrypoint-address", "text", format!("{:#x}", elf.entry));
    if let Some(interpreter) = &elf.interpreter {
        obj.add_attribute("interpreter", "text", interpreter);
    }
    obj.add_attribute("number-sections", "counter", elf.sections.len());

    let sections = section::build_all(&mut obj, BinaryFormat::Elf, &elf.sections, options);
    FormatRecord {
        object: obj,
        sections,
    }
}
