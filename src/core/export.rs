//! Sheet-to-file orchestration shared by every book family.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::cell::{Row, Sheet, Workbook};
use super::error::{ExportError, Result};
use super::filter::RowFilter;
use super::keys::KeyGenerator;
use super::line::{LineBuilder, OutputLine, Terminator};
use super::params::BookParameters;

/// Maps one data row to one record.
pub trait LineConverter {
    /// Convert `row`; may advance internal counters.
    fn convert(&self, row: &Row) -> OutputLine;
}

/// Fills the book-specific fields of a record.
pub type Layout = fn(&mut LineBuilder<'_>, &BookParameters);

/// Builds the single record of a summary book from fixed sheet cells.
pub type SummaryLayout = fn(&Sheet, &BookParameters) -> OutputLine;

/// Leading key fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Period id only.
    Period,
    /// Period id, random token and `M` correlative.
    Primary,
    /// Period id and a bare correlative zero-padded to the given width.
    Sequence(usize),
    /// No key; the layout writes every field.
    None,
}

/// A [`LineConverter`] driven by a [`KeyStyle`] and a [`Layout`].
///
/// Each instance owns its correlative counter, so two converters built for
/// two sheets never share numbering.
pub struct BookConverter<'p> {
    params: &'p BookParameters,
    keys: KeyGenerator,
    style: KeyStyle,
    layout: Layout,
}

impl<'p> BookConverter<'p> {
    /// Create a converter with a fresh counter.
    pub fn new(params: &'p BookParameters, style: KeyStyle, layout: Layout) -> Self {
        Self {
            params,
            keys: KeyGenerator::new(params.period_id()),
            style,
            layout,
        }
    }

    /// Rows converted so far (only counted for keyed styles).
    pub fn issued(&self) -> u64 {
        self.keys.issued()
    }
}

impl LineConverter for BookConverter<'_> {
    fn convert(&self, row: &Row) -> OutputLine {
        let mut line = LineBuilder::new(row);
        match self.style {
            KeyStyle::Period => {
                line.push(self.keys.period());
            }
            KeyStyle::Primary => {
                line.key(&self.keys.next_key());
            }
            KeyStyle::Sequence(width) => {
                line.push(self.keys.period()).push(self.keys.next_sequence(width));
            }
            KeyStyle::None => {}
        }
        (self.layout)(&mut line, self.params);
        line.finish(Terminator::SeparatorCrlf)
    }
}

/// A family of books produced from one workbook.
pub trait BookProcessor {
    /// Human readable name of the book family.
    fn title(&self) -> &'static str;

    /// Write every file of the family into `target`.
    fn process(&self, workbook: &Workbook, target: &Path) -> Result<Vec<ExportedFile>>;
}

/// Fetches book content that lives outside the workbook (e.g. a PDF).
pub trait AttachmentSource {
    /// Write the document identified by `token` to `dest`, replacing it.
    fn fetch(&self, token: &str, dest: &Path) -> std::io::Result<()>;
}

/// What a book sheet turns into.
#[derive(Clone, Copy)]
pub enum BookContent {
    /// One record per surviving data row.
    Rows {
        /// Decoration rows to skip.
        header: usize,
        /// Eligibility of data rows.
        filter: RowFilter<'static>,
        /// Leading key fields.
        key: KeyStyle,
        /// Book-specific fields.
        layout: Layout,
    },
    /// A single record built from fixed cells.
    Summary(SummaryLayout),
    /// Always a zero-byte file declaring no information.
    AlwaysEmpty,
    /// A document fetched through an [`AttachmentSource`].
    Attachment {
        /// File extension of the document.
        extension: &'static str,
        /// Cell (row, column) holding the document token.
        token: (usize, usize),
    },
}

/// Dispatch entry: which sheet produces which book, and how.
#[derive(Clone, Copy)]
pub struct BookSpec {
    /// Sheet title.
    pub sheet: &'static str,
    /// Book code used in the file name.
    pub book_id: &'static str,
    /// Conversion recipe.
    pub content: BookContent,
}

/// Find the dispatch entry of a sheet.
pub fn find_book<'t>(table: &'t [BookSpec], sheet: &str) -> Option<&'t BookSpec> {
    table.iter().find(|spec| spec.sheet == sheet)
}

/// A file written by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Book or extract code.
    pub book_id: String,
    /// Full output path.
    pub path: PathBuf,
    /// Information flag encoded in the name.
    pub info: bool,
    /// Records written.
    pub lines: usize,
}

/// Export every sheet of `workbook` found in `table`, in workbook order.
///
/// Sheets without a dispatch entry are skipped.
pub fn export_books(
    workbook: &Workbook,
    table: &[BookSpec],
    params: &BookParameters,
    target: &Path,
    attachments: Option<&dyn AttachmentSource>,
) -> Result<Vec<ExportedFile>> {
    let mut written = Vec::new();
    for sheet in &workbook.sheets {
        match find_book(table, &sheet.name) {
            Some(spec) => written.push(export_book(spec, sheet, params, target, attachments)?),
            None => debug!(sheet = %sheet.name, "no book registered for sheet, skipping"),
        }
    }
    Ok(written)
}

/// Export a single book sheet.
pub fn export_book(
    spec: &BookSpec,
    sheet: &Sheet,
    params: &BookParameters,
    target: &Path,
    attachments: Option<&dyn AttachmentSource>,
) -> Result<ExportedFile> {
    let info = match spec.content {
        BookContent::AlwaysEmpty => false,
        _ => sheet.info_flag(),
    };
    let extension = match spec.content {
        BookContent::Attachment { extension, .. } => extension,
        _ => params.extension.as_str(),
    };
    let file_name = params
        .book_name(spec.book_id, info)
        .extension(extension)
        .build();

    let (path, lines) = if !info {
        (write_empty(target, &file_name)?, 0)
    } else {
        match spec.content {
            BookContent::Rows {
                header,
                filter,
                key,
                layout,
            } => {
                let converter = BookConverter::new(params, key, layout);
                write_lines(target, &file_name, convert_rows(sheet, header, filter, &converter))?
            }
            BookContent::Summary(summary) => {
                write_lines(target, &file_name, [summary(sheet, params)])?
            }
            BookContent::AlwaysEmpty => (write_empty(target, &file_name)?, 0),
            BookContent::Attachment { token, .. } => {
                let token = sheet.string_at(token.0, token.1)?;
                let path = fetch_attachment(spec.book_id, &token, target, &file_name, attachments)?;
                (path, 0)
            }
        }
    };

    info!(
        book = spec.book_id,
        info,
        lines,
        file = %path.display(),
        "book exported"
    );
    Ok(ExportedFile {
        book_id: spec.book_id.to_string(),
        path,
        info,
        lines,
    })
}

/// Lazily convert the data rows of `sheet` that pass `filter`.
pub fn convert_rows<'a, C: LineConverter + ?Sized>(
    sheet: &'a Sheet,
    header: usize,
    filter: RowFilter<'a>,
    converter: &'a C,
) -> impl Iterator<Item = OutputLine> + 'a {
    sheet
        .data_rows(header)
        .filter(move |row| filter.accepts(row))
        .map(move |row| converter.convert(row))
}

fn fetch_attachment(
    book_id: &str,
    token: &str,
    target: &Path,
    file_name: &str,
    attachments: Option<&dyn AttachmentSource>,
) -> Result<PathBuf> {
    let Some(source) = attachments else {
        warn!(book = book_id, "attachment book found but no attachment source configured");
        return Err(ExportError::AttachmentUnavailable {
            book_id: book_id.to_string(),
            reason: "no attachment source configured".into(),
        });
    };
    ensure_dir(target)?;
    let path = target.join(file_name);
    source
        .fetch(token, &path)
        .map_err(|e| ExportError::AttachmentUnavailable {
            book_id: book_id.to_string(),
            reason: e.to_string(),
        })?;
    Ok(path)
}

/// Write `lines` to `dir/file_name`, replacing any existing file.
///
/// Returns the path and the number of records written.
pub fn write_lines<I>(dir: &Path, file_name: &str, lines: I) -> Result<(PathBuf, usize)>
where
    I: IntoIterator<Item = OutputLine>,
{
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
    let mut out = BufWriter::new(file);
    let mut count = 0;
    for line in lines {
        out.write_all(line.render().as_bytes())
            .map_err(|e| ExportError::io(&path, e))?;
        count += 1;
    }
    out.flush().map_err(|e| ExportError::io(&path, e))?;
    debug!(file = %path.display(), lines = count, "file written");
    Ok((path, count))
}

/// Create (or truncate) a zero-byte file.
pub fn write_empty(dir: &Path, file_name: &str) -> Result<PathBuf> {
    write_lines(dir, file_name, std::iter::empty()).map(|(path, _)| path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))
}
