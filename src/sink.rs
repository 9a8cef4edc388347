use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::formats::ListingRecord;

/// Receives records in emission order.
pub trait RecordSink {
    fn write(&mut self, record: &ListingRecord) -> anyhow::Result<()>;

    fn finish(&mut self) -> anyhow::Result<()>;
}

impl RecordSink for Vec<ListingRecord> {
    fn write(&mut self, record: &ListingRecord) -> anyhow::Result<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonlSink<W: Write> {
    out: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn write(&mut self, record: &ListingRecord) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, record).context("write record json")?;
        self.out.write_all(b"\n").context("write record newline")?;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.out.flush().context("flush jsonl output")
    }
}

const CSV_HEADER: [&str; 13] = [
    "category",
    "url",
    "title",
    "subtitle",
    "authors",
    "narrators",
    "length_minutes",
    "release_date",
    "language",
    "star_rating",
    "rating_count",
    "price",
    "is_podcast",
];

/// Flat CSV row in `CSV_HEADER` order; name lists are joined with ", ".
#[derive(Serialize)]
struct CsvRow<'a> {
    category: &'a str,
    url: &'a str,
    title: &'a str,
    subtitle: &'a str,
    authors: String,
    narrators: String,
    length_minutes: Option<u32>,
    release_date: &'a str,
    language: &'a str,
    star_rating: &'a str,
    rating_count: &'a str,
    price: &'a str,
    is_podcast: bool,
}

impl<'a> From<&'a ListingRecord> for CsvRow<'a> {
    fn from(record: &'a ListingRecord) -> Self {
        Self {
            category: &record.category,
            url: &record.url,
            title: &record.title,
            subtitle: &record.subtitle,
            authors: record.authors.join(", "),
            narrators: record.narrators.join(", "),
            length_minutes: record.length_minutes,
            release_date: &record.release_date,
            language: &record.language,
            star_rating: &record.star_rating,
            rating_count: &record.rating_count,
            price: &record.price,
            is_podcast: record.is_podcast,
        }
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Writes the header row immediately so an empty crawl still yields a
    /// well-formed file.
    pub fn new(out: W) -> anyhow::Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(CSV_HEADER).context("write csv header")?;
        Ok(Self { writer })
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write(&mut self, record: &ListingRecord) -> anyhow::Result<()> {
        self.writer
            .serialize(CsvRow::from(record))
            .context("write csv row")
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("flush csv output")
    }
}

/// Opens `path` for export. Refuses to replace an existing file unless `force`.
pub fn create_file_sink(
    path: &Path,
    format: OutputFormat,
    force: bool,
) -> anyhow::Result<Box<dyn RecordSink>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let file: File = options
        .open(path)
        .with_context(|| format!("create output: {}", path.display()))?;
    let out = BufWriter::new(file);

    let sink: Box<dyn RecordSink> = match format {
        OutputFormat::Csv => Box::new(CsvSink::new(out)?),
        OutputFormat::Jsonl => Box::new(JsonlSink::new(out)),
    };
    Ok(sink)
}
