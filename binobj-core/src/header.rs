pub mod elf;
pub mod macho;
pub mod pe;

use crate::Section;

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the entry point as the format reports it (an RVA for PE).
    fn entry_point(&self) -> u64;

    /// Sections in the order the binary declares them.
    fn sections(&self) -> &[Section];

    /// First section whose virtual range holds the entry point, with its index.
    fn entry_section(&self) -> Option<(usize, &Section)> {
        let entry = self.entry_point();
        self.sections()
            .iter()
            .enumerate()
            .find(|(_, s)| s.contains(entry))
    }
}
