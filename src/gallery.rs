//! Provides the HTML contact-sheet writer.
//!
//! A gallery is a single HTML 4.01 page holding a table of thumbnails, one
//! `<td>` per rendered model: the image, then an ordinal and a link back to
//! the source file. Cells wrap to a new table row every `row_width` entries.
//! The page keeps the original sheet chrome: dark background, light gray
//! cell text.
//!
//! Rows are opened lazily and closed exactly once, so a cell count that is an
//! exact multiple of the row width does not leave an empty trailing `<tr>`,
//! and zero cells produce a valid document with an empty table.
//!
//! # Examples
//! ```
//! use modelsheet::gallery::GalleryWriter;
//!
//! let mut sheet = GalleryWriter::new(Vec::new(), "some stl files", 5).unwrap();
//! sheet.push_entry("a.stl.png", "a.stl").unwrap();
//! let html = String::from_utf8(sheet.finish().unwrap()).unwrap();
//! assert!(html.contains("<a href=\"a.stl\">a.stl</a>"));
//! ```

use std::io::{self, Write};
use std::path::Path;

/// Streams one gallery document to an output sink.
///
/// The writer owns its sink; dropping it mid-run releases the underlying
/// handle even when the run aborts before [`GalleryWriter::finish`].
pub struct GalleryWriter<W: Write> {
    out: W,
    row_width: usize,
    count: usize,
    row_open: bool,
}

impl<W: Write> GalleryWriter<W> {
    /// Writes the document head and returns the writer.
    ///
    /// `row_width` is the number of cells per table row and must be at least 1.
    ///
    /// # Errors
    /// Returns an error if the head cannot be written.
    pub fn new(mut out: W, title: &str, row_width: usize) -> io::Result<Self> {
        writeln!(out, "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\"")?;
        writeln!(out, "\"http://www.w3.org/TR/html4/loose.dtd\">")?;
        writeln!(out, "<html><head><title>{}</title>", title)?;
        writeln!(out, "<meta http-equiv=\"Content-type\" content=\"text/html;charset=UTF-8\">")?;
        writeln!(out, "</head><body bgcolor=\"#222222\">")?;
        writeln!(out, "<table>")?;
        Ok(GalleryWriter { out, row_width: row_width.max(1), count: 0, row_open: false })
    }

    /// Writes one cell: the thumbnail image, the next ordinal, and a link to
    /// the source file labeled with its final path segment.
    ///
    /// Returns the ordinal assigned to the cell (ordinals start at 1).
    ///
    /// # Errors
    /// Returns an error if the cell cannot be written.
    ///
    /// # Examples
    /// ```
    /// use modelsheet::gallery::GalleryWriter;
    ///
    /// let mut sheet = GalleryWriter::new(Vec::new(), "t", 5).unwrap();
    /// assert_eq!(sheet.push_entry("a.png", "a.stl").unwrap(), 1);
    /// assert_eq!(sheet.push_entry("b.png", "b.stl").unwrap(), 2);
    /// ```
    pub fn push_entry(&mut self, image_src: &str, link_target: &str) -> io::Result<usize> {
        if !self.row_open {
            writeln!(self.out, "<tr>")?;
            self.row_open = true;
        }

        self.count += 1;
        let label = file_label(link_target);

        writeln!(self.out, "<td><font color=\"#aaaaaa\">")?;
        writeln!(self.out, "<img src=\"{}\" alt=\"{}\"><br>", image_src, image_src)?;
        writeln!(
            self.out,
            "[{}] <a href=\"{}\">{}</a></font></td>",
            self.count, link_target, label
        )?;

        if self.count % self.row_width == 0 {
            writeln!(self.out, "</tr>")?;
            self.row_open = false;
        }

        Ok(self.count)
    }

    /// Returns the number of cells written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Closes any open row, writes the document foot, flushes, and returns
    /// the underlying sink.
    ///
    /// # Errors
    /// Returns an error if the foot cannot be written or the sink fails to
    /// flush.
    pub fn finish(mut self) -> io::Result<W> {
        if self.row_open {
            writeln!(self.out, "</tr>")?;
        }
        writeln!(self.out, "</table>")?;
        writeln!(self.out, "</body></html>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Returns the final path segment of a link target, used as the anchor label.
fn file_label(link_target: &str) -> &str {
    Path::new(link_target)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(link_target)
}
