use crate::binary::BinaryFormat;
use crate::hashes::{entropy, md5_hex, sha256_hex, sha512_hex};
use crate::header::elf::{section_flag_names, section_type_name};
use crate::objects::{MispObject, ObjectOptions};
use crate::{Section, SectionDetail};

pub fn build(format: BinaryFormat, section: &Section, options: &ObjectOptions) -> MispObject {
    let mut obj = MispObject::new(format.section_object_name(), options);
    obj.add_attribute("name", "text", &section.name);

    match &section.detail {
        SectionDetail::Elf { sh_type } => {
            obj.add_attribute("type", "text", section_type_name(*sh_type));
            for flag in section_flag_names(section.flags) {
                obj.add_attribute("flag", "text", flag);
            }
        }
        SectionDetail::ElfSegment { .. } => {
            obj.add_attribute("type", "text", "LOAD");
        }
        SectionDetail::MachO { segment } => {
            obj.add_attribute("segment", "text", segment);
        }
        SectionDetail::Pe => {}
    }

    obj.add_attribute("size-in-bytes", "size-in-bytes", section.size);
    let data = section.raw_data();
    if !data.is_empty() {
        obj.add_attribute("entropy", "float", entropy(data))
            .add_attribute("md5", "md5", md5_hex(data))
            .add_attribute("sha256", "sha256", sha256_hex(data))
            .add_attribute("sha512", "sha512", sha512_hex(data));
    }
    obj
}

/// Builds one object per section and links each from `parent` in order.
pub fn build_all(
    parent: &mut MispObject,
    format: BinaryFormat,
    sections: &[Section],
    options: &ObjectOptions,
) -> Vec<MispObject> {
    sections
        .iter()
        .enumerate()
        .map(|(pos, section)| {
            let obj = build(format, section, options);
            parent.add_reference(
                obj.uuid,
                "includes",
                &format!("Section {pos} of {}", format.label()),
            );
            obj
        })
        .collect()
}
