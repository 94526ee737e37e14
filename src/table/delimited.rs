//! Delimited-text tables backed by the `csv` crate

use super::traits::{
    AnnotationRecord, AnnotationSource, SegmentSink, TableError, TableLayout, TableResult,
    OUTPUT_COLUMNS, PHRASE_COLUMN,
};
use crate::identifier::IdentifiedSegment;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Reads annotation records from delimited text with a header row.
///
/// Columns other than the configured file and structure columns are
/// ignored, so a leading index column is harmless. Cells are trimmed.
/// Invalid UTF-8 inside a cell is replaced with U+FFFD so that only the
/// affected record fails validation.
pub struct CsvSource<R> {
    inner: R,
    layout: TableLayout,
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

impl CsvSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, layout: TableLayout) -> TableResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), layout))
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(inner: R, layout: TableLayout) -> Self {
        Self { inner, layout }
    }

    fn column_index(headers: &csv::ByteRecord, name: &str) -> Option<usize> {
        headers.iter().position(|header| {
            let header = header.strip_prefix(UTF8_BOM).unwrap_or(header);
            header == name.as_bytes()
        })
    }

    fn cell(row: &csv::ByteRecord, idx: usize) -> Cow<'_, str> {
        row.get(idx)
            .map(String::from_utf8_lossy)
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl<R: Read> AnnotationSource for CsvSource<R> {
    fn read_records(&mut self) -> TableResult<Vec<AnnotationRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.layout.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(&mut self.inner);

        let headers = reader.byte_headers()?.clone();
        let file_idx = Self::column_index(&headers, &self.layout.file_column);
        let structure_idx = Self::column_index(&headers, &self.layout.structure_column);

        let (file_idx, structure_idx) = match (file_idx, structure_idx) {
            (Some(f), Some(s)) => (f, s),
            (f, s) => {
                let mut missing = Vec::new();
                if f.is_none() {
                    missing.push(self.layout.file_column.clone());
                }
                if s.is_none() {
                    missing.push(self.layout.structure_column.clone());
                }
                return Err(TableError::MissingColumns(missing));
            }
        };

        let mut records = Vec::new();
        for row in reader.byte_records() {
            let row = row?;
            // Short rows leave the cell empty; validation rejects the record later.
            records.push(AnnotationRecord::new(
                Self::cell(&row, file_idx),
                Self::cell(&row, structure_idx),
            ));
        }

        Ok(records)
    }
}

/// Output file that is created (and truncated) on the first write.
///
/// A run that fails before producing rows leaves an existing file untouched.
#[derive(Debug)]
pub struct DeferredFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl DeferredFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn opened(&mut self) -> io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => BufWriter::new(File::create(&self.path)?),
        };
        Ok(self.file.insert(file))
    }
}

impl Write for DeferredFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.opened()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Writes the output table as delimited text.
pub struct CsvSink<W: Write> {
    inner: W,
    layout: TableLayout,
}

impl CsvSink<DeferredFile> {
    /// Sink for `path`. The file is not touched until rows are written.
    pub fn create(path: impl AsRef<Path>, layout: TableLayout) -> Self {
        Self::from_writer(DeferredFile::new(path.as_ref()), layout)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, layout: TableLayout) -> Self {
        Self { inner, layout }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SegmentSink for CsvSink<W> {
    fn write_rows(&mut self, rows: &[IdentifiedSegment]) -> TableResult<()> {
        let phrase = self.layout.include_phrase_column;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.layout.delimiter)
            .from_writer(&mut self.inner);

        let mut header: Vec<&str> = OUTPUT_COLUMNS.to_vec();
        if phrase {
            header.push(PHRASE_COLUMN);
        }
        writer.write_record(&header)?;

        for row in rows {
            let ipu_label = row.ipu_label();
            let mut fields = vec![
                row.file.as_str(),
                row.token.as_str(),
                ipu_label.as_str(),
                row.id.as_str(),
                row.id_ipu.as_str(),
            ];
            let phrase_label = row.phrase_label();
            if phrase {
                fields.push(phrase_label.as_str());
            }
            writer.write_record(&fields)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::identify;
    use crate::segment::Segment;

    fn read(input: &str, layout: TableLayout) -> TableResult<Vec<AnnotationRecord>> {
        CsvSource::from_reader(input.as_bytes(), layout).read_records()
    }

    fn row(file: &str, ipu_index: usize) -> IdentifiedSegment {
        identify(&Segment {
            file: file.to_string(),
            token: format!("s{}", ipu_index),
            ipu_index,
            phrase_index: 2,
        })
        .unwrap()
    }

    #[test]
    fn reads_configured_columns_and_ignores_others() {
        let input = ",file,structure,notes\n0,subj1_sess1_task,ssssps,x\n1,subj2_sess1_task, spspsps ,y\n";
        let records = read(input, TableLayout::default()).unwrap();
        assert_eq!(
            records,
            vec![
                AnnotationRecord::new("subj1_sess1_task", "ssssps"),
                AnnotationRecord::new("subj2_sess1_task", "spspsps"),
            ]
        );
    }

    #[test]
    fn missing_columns_are_all_named() {
        let err = read("name,value\na,b\n", TableLayout::default()).unwrap_err();
        match err {
            TableError::MissingColumns(cols) => assert_eq!(cols, vec!["file", "structure"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_single_column_message() {
        let err = read("file,other\na_b,s\n", TableLayout::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "input table is missing required column(s): structure"
        );
    }

    #[test]
    fn short_row_yields_empty_structure() {
        let records = read("file,structure\na_b\n", TableLayout::default()).unwrap();
        assert_eq!(records, vec![AnnotationRecord::new("a_b", "")]);
    }

    #[test]
    fn invalid_utf8_cell_only_affects_its_record() {
        let input = b"file,structure\nsubj1_sess1_a,ss\nsubj2_sess1_a,s\xffs\nsubj3_sess1_a,sps\n";
        let records = CsvSource::from_reader(&input[..], TableLayout::default())
            .read_records()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], AnnotationRecord::new("subj1_sess1_a", "ss"));
        assert_eq!(records[1].file, "subj2_sess1_a");
        assert_eq!(records[1].structure, "s\u{fffd}s");
        assert_eq!(records[2], AnnotationRecord::new("subj3_sess1_a", "sps"));
    }

    #[test]
    fn custom_layout_and_bom() {
        let layout = TableLayout {
            file_column: "recording".to_string(),
            structure_column: "ipus".to_string(),
            delimiter: b';',
            include_phrase_column: false,
        };
        let records = read("\u{feff}recording;ipus\nx_y;sps\n", layout).unwrap();
        assert_eq!(records, vec![AnnotationRecord::new("x_y", "sps")]);
    }

    #[test]
    fn writes_header_and_rows() {
        let mut sink = CsvSink::from_writer(Vec::new(), TableLayout::default());
        sink.write_rows(&[row("subj1_sess1_task", 1)]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "file,split_string,IPU_count,ID,ID_IPU\n\
             subj1_sess1_task,s1,IPU_1,subj1_sess1_s1,subj1_sess1_IPU_1\n"
        );
    }

    #[test]
    fn writes_phrase_column_when_enabled() {
        let layout = TableLayout {
            include_phrase_column: true,
            ..TableLayout::default()
        };
        let mut sink = CsvSink::from_writer(Vec::new(), layout);
        sink.write_rows(&[row("a_b", 1)]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("file,split_string,IPU_count,ID,ID_IPU,phrase"));
        assert_eq!(lines.next(), Some("a_b,s1,IPU_1,a_b_s1,a_b_IPU_1,phrase_2"));
    }

    #[test]
    fn file_sink_is_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = CsvSink::create(&path, TableLayout::default());
        assert!(!path.exists());

        sink.write_rows(&[row("a_b", 1)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("a_b,s1,IPU_1,a_b_s1,a_b_IPU_1\n"));
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut sink = CsvSink::from_writer(Vec::new(), TableLayout::default());
        sink.write_rows(&[]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "file,split_string,IPU_count,ID,ID_IPU\n");
    }
}
