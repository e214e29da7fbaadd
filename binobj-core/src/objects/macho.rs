use crate::binary::BinaryFormat;
use crate::header::macho::{cpu_name, MachOBinary};
use crate::objects::{section, FormatRecord, MispObject, ObjectOptions};

pub fn build(macho: &MachOBinary, options: &ObjectOptions) -> FormatRecord {
    let mut obj = MispObject::new(BinaryFormat::MachO.object_name(), options);

    obj.add_attribute("type", "text", macho.filetype_name());
    if let Some(name) = &macho.name {
        obj.add_attribute("name", "text", name);
    }
    obj.add_attribute("arch", "text", cpu_name(macho.cputype));
    // object files carry no entry point
    if macho.entry != 0 {
        obj.add_attribute("entrypoint-address", "text", format!("{:#x}", macho.entry));
    }
    obj.add_attribute("number-sections", "counter", macho.sections.len());

    let sections = section::build_all(&mut obj, BinaryFormat::MachO, &macho.sections, options);
    FormatRecord {
        object: obj,
        sections,
    }
}
