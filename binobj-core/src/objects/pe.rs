use chrono::DateTime;

use crate::binary::BinaryFormat;
use crate::header::pe::PeBinary;
use crate::header::Header;
use crate::objects::{section, FormatRecord, MispObject, ObjectOptions};

pub fn build(pe: &PeBinary, options: &ObjectOptions) -> FormatRecord {
    let mut obj = MispObject::new(BinaryFormat::Pe.object_name(), options);

    obj.add_attribute("type", "text", pe.kind().as_str())
        .add_attribute(
            "entrypoint-address",
            "text",
            format!("{:#x}", pe.image_base.wrapping_add(pe.entry)),
        );
    if let Some(compiled) = DateTime::from_timestamp(i64::from(pe.time_date_stamp), 0) {
        obj.add_attribute("compilation-timestamp", "datetime", compiled.to_rfc3339());
    }
    if let Some((pos, ep_section)) = pe.entry_section() {
        obj.add_attribute(
            "entrypoint-section-at-position",
            "text",
            format!("{}|{pos}", ep_section.name),
        );
    }
    obj.add_attribute("number-sections", "counter", pe.sections.len());

    let sections = section::build_all(&mut obj, BinaryFormat::Pe, &pe.sections, options);
    FormatRecord {
        object: obj,
        sections,
    }
}
