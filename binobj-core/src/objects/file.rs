use crate::hashes::{entropy, md5_hex, sha256_hex, sha512_hex};
use crate::objects::{MispObject, ObjectOptions};

/// Builds the `file` object for the input.
///
/// `data` is `None` when the bytes could not be obtained; the object then
/// only names the file.
pub fn build(filename: Option<&str>, data: Option<&[u8]>, options: &ObjectOptions) -> MispObject {
    let mut obj = MispObject::new("file", options);
    if let Some(filename) = filename {
        obj.add_attribute("filename", "filename", filename);
    }
    if let Some(data) = data {
        obj.add_attribute("size-in-bytes", "size-in-bytes", data.len());
        if !data.is_empty() {
            obj.add_attribute("entropy", "float", entropy(data))
                .add_attribute("md5", "md5", md5_hex(data))
                .add_attribute("sha256", "sha256", sha256_hex(data))
                .add_attribute("sha512", "sha512", sha512_hex(data));
        }
    }
    obj
}
