//! Fixed byte layout of solver output files.
//!
//! Every quantity in the file is a four-byte little-endian word: `i32` for
//! counts and flags, `f32` for results. The file is laid out as a prologue,
//! per-element metadata tables, one result block per reporting period, and
//! a short epilogue. The functions here locate those regions from the five
//! element counts alone, without touching the file.

use std::fmt;

/// Size in bytes of every scalar stored in an output file.
pub const WORD_SIZE: u64 = 4;

/// Size in bytes of the prologue: fifteen words, three 80-byte title lines,
/// two 260-byte file names, and two 32-byte chemical names.
pub const PROLOGUE_SIZE: u64 = 884;

/// Width in bytes of one element ID slot, including NUL padding.
pub const MAX_ID_BYTES: u64 = 32;

/// Number of attributes recorded per node in each result block.
pub const NODE_ATTRIBUTES: usize = 4;

/// Number of attributes recorded per link in each result block.
pub const LINK_ATTRIBUTES: usize = 8;

/// Network element categories whose results are recorded per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Link,
}

impl ElementKind {
    /// Number of attributes recorded per element of this kind.
    pub fn attribute_count(self) -> usize {
        match self {
            ElementKind::Node => NODE_ATTRIBUTES,
            ElementKind::Link => LINK_ATTRIBUTES,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Link => write!(f, "link"),
        }
    }
}

/// The five element counts read from the prologue.
///
/// Tanks are a subset of nodes and pumps and valves are subsets of links,
/// so only `nodes` and `links` size the result arrays. The subset counts
/// still shift the metadata tables and therefore where result data begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCounts {
    pub nodes: usize,
    pub tanks: usize,
    pub links: usize,
    pub pumps: usize,
    pub valves: usize,
}

impl ElementCounts {
    /// Number of elements of `kind`, and so the length of its result arrays.
    pub fn of(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Node => self.nodes,
            ElementKind::Link => self.links,
        }
    }
}

/// Byte offset of the first result block.
///
/// The terms walk the regions between the prologue and the result data in
/// file order: node IDs, link IDs, link connectivity (three words per link),
/// tank index and area (two words per tank), node elevations, link lengths
/// and diameters (two words per link), the pump energy table (seven words
/// per pump), and a single peak-energy word.
pub fn data_start_offset(counts: &ElementCounts) -> u64 {
    let nodes = counts.nodes as u64;
    let tanks = counts.tanks as u64;
    let links = counts.links as u64;
    let pumps = counts.pumps as u64;

    PROLOGUE_SIZE
        + MAX_ID_BYTES * nodes
        + MAX_ID_BYTES * links
        + 3 * WORD_SIZE * links
        + 2 * WORD_SIZE * tanks
        + WORD_SIZE * nodes
        + 2 * WORD_SIZE * links
        + 7 * WORD_SIZE * pumps
        + WORD_SIZE
}

/// Size in bytes of one reporting period's result block.
pub fn bytes_per_period(counts: &ElementCounts) -> u64 {
    (NODE_ATTRIBUTES as u64 * counts.nodes as u64 + LINK_ATTRIBUTES as u64 * counts.links as u64)
        * WORD_SIZE
}

/// Byte offset of one attribute's array relative to the start of its
/// period block. Node arrays come first, link arrays after all of them.
pub fn attribute_offset(counts: &ElementCounts, element: ElementKind, attribute: usize) -> u64 {
    let within = match element {
        ElementKind::Node => attribute as u64 * counts.nodes as u64,
        ElementKind::Link => {
            NODE_ATTRIBUTES as u64 * counts.nodes as u64 + attribute as u64 * counts.links as u64
        }
    };
    within * WORD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counts() -> ElementCounts {
        ElementCounts {
            nodes: 11,
            tanks: 2,
            links: 13,
            pumps: 1,
            valves: 0,
        }
    }

    #[test]
    fn data_start_for_sample_network() {
        // 884 + 32*11 + 32*13 + 12*13 + 8*2 + 4*11 + 8*13 + 28*1 + 4
        let expected = 884 + 352 + 416 + 156 + 16 + 44 + 104 + 28 + 4;
        assert_eq!(data_start_offset(&sample_counts()), expected);
    }

    #[test]
    fn data_start_for_empty_network() {
        let counts = ElementCounts {
            nodes: 0,
            tanks: 0,
            links: 0,
            pumps: 0,
            valves: 0,
        };
        assert_eq!(data_start_offset(&counts), PROLOGUE_SIZE + WORD_SIZE);
    }

    #[test]
    fn period_block_size() {
        // (4*11 + 8*13) * 4
        assert_eq!(bytes_per_period(&sample_counts()), (44 + 104) * 4);
    }

    #[test]
    fn attribute_offsets_within_period() {
        let counts = sample_counts();
        assert_eq!(attribute_offset(&counts, ElementKind::Node, 0), 0);
        assert_eq!(attribute_offset(&counts, ElementKind::Node, 3), 3 * 11 * 4);
        assert_eq!(attribute_offset(&counts, ElementKind::Link, 0), 4 * 11 * 4);
        assert_eq!(
            attribute_offset(&counts, ElementKind::Link, 7),
            (4 * 11 + 7 * 13) * 4
        );
    }

    #[test]
    fn attribute_counts_per_kind() {
        assert_eq!(ElementKind::Node.attribute_count(), 4);
        assert_eq!(ElementKind::Link.attribute_count(), 8);
    }

    #[test]
    fn element_kind_display() {
        assert_eq!(ElementKind::Node.to_string(), "node");
        assert_eq!(ElementKind::Link.to_string(), "link");
    }

    #[test]
    fn counts_of_kind() {
        let counts = sample_counts();
        assert_eq!(counts.of(ElementKind::Node), 11);
        assert_eq!(counts.of(ElementKind::Link), 13);
    }
}
