//! Decoder for solver binary output files.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::debug;

use crate::error::OutputError;
use crate::layout::{
    self, ElementCounts, ElementKind, LINK_ATTRIBUTES, MAX_ID_BYTES, NODE_ATTRIBUTES,
    PROLOGUE_SIZE, WORD_SIZE,
};

// Word positions inside the prologue. The first two words are the magic
// number and the solver version, which are read past but not validated.
const COUNTS_WORD: u64 = 2;
const REPORT_START_WORD: u64 = 12;

// The reporting period count sits three words before end of file, followed
// by a warning flag and the closing magic number.
const EPILOGUE_TAIL_WORDS: u64 = 3;

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Decoder over any seekable byte source containing a solver output file.
///
/// Opening reads the element counts from the prologue and the reporting
/// period count from the epilogue, then computes where result data begins.
/// All result access afterwards seeks to absolute offsets derived from
/// those counts, so streamed and direct reads can be freely interleaved.
#[derive(Debug)]
pub struct OutputReader<R> {
    source: R,
    len: u64,
    counts: ElementCounts,
    report_start: i32,
    report_step: i32,
    periods: usize,
    data_start: u64,
    bytes_per_period: u64,
}

impl<R: Read + Seek> OutputReader<R> {
    /// Open a solver output file.
    ///
    /// Fails with [`OutputError::Truncated`] when the source is shorter than
    /// the prologue, and with [`OutputError::InvalidCount`] when any element
    /// count or the reporting period count decodes to a negative value.
    pub fn open(mut source: R) -> Result<Self, OutputError> {
        let len = source.seek(SeekFrom::End(0))?;
        if len < PROLOGUE_SIZE {
            return Err(OutputError::Truncated {
                offset: 0,
                needed: PROLOGUE_SIZE,
            });
        }

        source.seek(SeekFrom::Start(COUNTS_WORD * WORD_SIZE))?;
        let counts = ElementCounts {
            nodes: read_count(&mut source, "node")?,
            tanks: read_count(&mut source, "tank")?,
            links: read_count(&mut source, "link")?,
            pumps: read_count(&mut source, "pump")?,
            valves: read_count(&mut source, "valve")?,
        };

        source.seek(SeekFrom::Start(REPORT_START_WORD * WORD_SIZE))?;
        let report_start = source.read_i32::<LittleEndian>()?;
        let report_step = source.read_i32::<LittleEndian>()?;

        source.seek(SeekFrom::End(-((EPILOGUE_TAIL_WORDS * WORD_SIZE) as i64)))?;
        let periods = read_count(&mut source, "reporting period")?;

        let data_start = layout::data_start_offset(&counts);
        let bytes_per_period = layout::bytes_per_period(&counts);
        debug!(
            nodes = counts.nodes,
            tanks = counts.tanks,
            links = counts.links,
            pumps = counts.pumps,
            valves = counts.valves,
            periods,
            data_start,
            "opened solver output"
        );

        Ok(Self {
            source,
            len,
            counts,
            report_start,
            report_step,
            periods,
            data_start,
            bytes_per_period,
        })
    }

    /// The five element counts from the prologue.
    pub fn counts(&self) -> ElementCounts {
        self.counts
    }

    /// Number of nodes, and so the length of every node result array.
    pub fn node_count(&self) -> usize {
        self.counts.nodes
    }

    /// Number of links, and so the length of every link result array.
    pub fn link_count(&self) -> usize {
        self.counts.links
    }

    /// Number of reporting periods recorded in the epilogue.
    pub fn period_count(&self) -> usize {
        self.periods
    }

    /// Seconds from simulation start to the first reporting period.
    pub fn report_start(&self) -> i32 {
        self.report_start
    }

    /// Seconds between consecutive reporting periods.
    pub fn report_step(&self) -> i32 {
        self.report_step
    }

    /// Byte offset of the first result block.
    pub fn data_start_offset(&self) -> u64 {
        self.data_start
    }

    /// Consume the reader and hand back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Decode the node ID table.
    pub fn node_ids(&mut self) -> Result<Vec<String>, OutputError> {
        self.read_id_table(PROLOGUE_SIZE, self.counts.nodes)
    }

    /// Decode the link ID table.
    pub fn link_ids(&mut self) -> Result<Vec<String>, OutputError> {
        let start = PROLOGUE_SIZE + self.counts.nodes as u64 * MAX_ID_BYTES;
        self.read_id_table(start, self.counts.links)
    }

    /// Decode the ID of a single element without reading its whole table.
    pub fn element_id(
        &mut self,
        element: ElementKind,
        index: usize,
    ) -> Result<String, OutputError> {
        let count = self.counts.of(element);
        if index >= count {
            return Err(OutputError::ElementOutOfRange {
                element,
                index,
                count,
            });
        }
        let table = match element {
            ElementKind::Node => PROLOGUE_SIZE,
            ElementKind::Link => PROLOGUE_SIZE + self.counts.nodes as u64 * MAX_ID_BYTES,
        };
        let offset = table + index as u64 * MAX_ID_BYTES;
        self.check_span(offset, MAX_ID_BYTES)?;
        self.source.seek(SeekFrom::Start(offset))?;
        let mut slot = [0u8; MAX_ID_BYTES as usize];
        self.source
            .read_exact(&mut slot)
            .map_err(|e| map_eof(e, offset, MAX_ID_BYTES))?;
        Ok(decode_id(&slot))
    }

    /// One attribute's array for every element of `element` at `period`.
    ///
    /// Seeks directly to the array, so periods can be fetched in any order
    /// and independently of [`OutputReader::results`].
    pub fn read_attribute(
        &mut self,
        element: ElementKind,
        period: usize,
        attribute: usize,
    ) -> Result<Vec<f32>, OutputError> {
        if period >= self.periods {
            return Err(OutputError::PeriodOutOfRange {
                period,
                periods: self.periods,
            });
        }
        let attributes = element.attribute_count();
        if attribute >= attributes {
            return Err(OutputError::AttributeOutOfRange {
                element,
                attribute,
                attributes,
            });
        }
        let offset = self
            .period_offset(period)
            .saturating_add(layout::attribute_offset(&self.counts, element, attribute));
        self.read_values(offset, self.counts.of(element))
    }

    /// Stream every result array in file order: for each period, the four
    /// node arrays then the eight link arrays. The iterator stops after the
    /// first error.
    pub fn results(&mut self) -> Results<'_, R> {
        Results {
            reader: self,
            period: 0,
            slot: 0,
            failed: false,
        }
    }

    fn period_offset(&self, period: usize) -> u64 {
        self.data_start
            .saturating_add(self.bytes_per_period.saturating_mul(period as u64))
    }

    /// A region is only read after this confirms it lies inside the file,
    /// so short reads surface as [`OutputError::Truncated`] with the exact
    /// region that fell off the end.
    fn check_span(&self, offset: u64, needed: u64) -> Result<(), OutputError> {
        match offset.checked_add(needed) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(OutputError::Truncated { offset, needed }),
        }
    }

    fn read_values(&mut self, offset: u64, count: usize) -> Result<Vec<f32>, OutputError> {
        let needed = count as u64 * WORD_SIZE;
        self.check_span(offset, needed)?;
        self.source.seek(SeekFrom::Start(offset))?;
        let mut values = vec![0.0f32; count];
        self.source
            .read_f32_into::<LittleEndian>(&mut values)
            .map_err(|e| map_eof(e, offset, needed))?;
        Ok(values)
    }

    fn read_id_table(&mut self, start: u64, count: usize) -> Result<Vec<String>, OutputError> {
        self.check_span(start, count as u64 * MAX_ID_BYTES)?;
        self.source.seek(SeekFrom::Start(start))?;
        let mut ids = Vec::with_capacity(count);
        let mut slot = [0u8; MAX_ID_BYTES as usize];
        for index in 0..count {
            self.source
                .read_exact(&mut slot)
                .map_err(|e| map_eof(e, start + index as u64 * MAX_ID_BYTES, MAX_ID_BYTES))?;
            ids.push(decode_id(&slot));
        }
        Ok(ids)
    }
}

fn read_count<R: Read>(source: &mut R, field: &'static str) -> Result<usize, OutputError> {
    let value = source.read_i32::<LittleEndian>()?;
    if value < 0 {
        return Err(OutputError::InvalidCount { field, value });
    }
    Ok(value as usize)
}

fn decode_id(slot: &[u8; MAX_ID_BYTES as usize]) -> String {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..end]).into_owned()
}

fn map_eof(e: std::io::Error, offset: u64, needed: u64) -> OutputError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        OutputError::Truncated { offset, needed }
    } else {
        OutputError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Streaming iterator
// ---------------------------------------------------------------------------

/// One decoded result array: the values of one attribute for every element
/// of one kind at one reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultArray {
    /// Whether the values belong to nodes or links.
    pub element: ElementKind,
    /// Zero-based reporting period the values were recorded at.
    pub period: usize,
    /// Zero-based attribute index within the element kind.
    pub attribute: usize,
    /// One value per element, in file order.
    pub values: Vec<f32>,
}

/// Iterator returned by [`OutputReader::results`].
///
/// Yields `period_count × 12` arrays for a well-formed file. After yielding
/// an error it is fused and returns `None` forever.
pub struct Results<'a, R> {
    reader: &'a mut OutputReader<R>,
    period: usize,
    slot: usize,
    failed: bool,
}

impl<R: Read + Seek> Iterator for Results<'_, R> {
    type Item = Result<ResultArray, OutputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.period >= self.reader.periods {
            return None;
        }

        let (element, attribute) = if self.slot < NODE_ATTRIBUTES {
            (ElementKind::Node, self.slot)
        } else {
            (ElementKind::Link, self.slot - NODE_ATTRIBUTES)
        };
        let period = self.period;
        let offset = self
            .reader
            .period_offset(period)
            .saturating_add(layout::attribute_offset(&self.reader.counts, element, attribute));

        match self.reader.read_values(offset, self.reader.counts.of(element)) {
            Ok(values) => {
                self.slot += 1;
                if self.slot == NODE_ATTRIBUTES + LINK_ATTRIBUTES {
                    self.slot = 0;
                    self.period += 1;
                }
                Some(Ok(ResultArray {
                    element,
                    period,
                    attribute,
                    values,
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_count_accepts_zero_and_positive() {
        let mut source = Cursor::new([0i32.to_le_bytes(), 42i32.to_le_bytes()].concat());
        assert_eq!(read_count(&mut source, "node").unwrap(), 0);
        assert_eq!(read_count(&mut source, "node").unwrap(), 42);
    }

    #[test]
    fn read_count_rejects_negative() {
        let mut source = Cursor::new((-3i32).to_le_bytes().to_vec());
        let err = read_count(&mut source, "tank").unwrap_err();
        assert!(matches!(
            err,
            OutputError::InvalidCount {
                field: "tank",
                value: -3
            }
        ));
    }

    #[test]
    fn decode_id_stops_at_first_nul() {
        let mut slot = [0u8; 32];
        slot[..4].copy_from_slice(b"J-12");
        assert_eq!(decode_id(&slot), "J-12");
    }

    #[test]
    fn decode_id_without_nul_uses_whole_slot() {
        let slot = [b'x'; 32];
        assert_eq!(decode_id(&slot), "x".repeat(32));
    }

    #[test]
    fn map_eof_translates_unexpected_eof() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        assert!(matches!(
            map_eof(eof, 100, 8),
            OutputError::Truncated {
                offset: 100,
                needed: 8
            }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Interrupted, "signal");
        assert!(matches!(map_eof(other, 0, 4), OutputError::Io(_)));
    }

    #[test]
    fn open_rejects_source_shorter_than_prologue() {
        let err = OutputReader::open(Cursor::new(vec![0u8; 883])).unwrap_err();
        assert!(matches!(
            err,
            OutputError::Truncated {
                offset: 0,
                needed: PROLOGUE_SIZE
            }
        ));
    }

    #[test]
    fn open_prologue_only_file_reports_zero_periods() {
        // 884 zero bytes: zero counts everywhere, and the epilogue window
        // lands inside the zeroed prologue.
        let reader = OutputReader::open(Cursor::new(vec![0u8; 884])).unwrap();
        assert_eq!(reader.period_count(), 0);
        assert_eq!(reader.node_count(), 0);
        assert_eq!(reader.link_count(), 0);
    }
}
