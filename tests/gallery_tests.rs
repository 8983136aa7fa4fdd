//! Integration tests for the HTML contact-sheet writer.
//!
//! Exercises the table-shape guarantees: cell counts, row wrapping, ordinal
//! numbering, and the structure of empty documents.

use modelsheet::gallery::GalleryWriter;

fn sheet(entries: usize, row_width: usize) -> String {
    let mut writer = GalleryWriter::new(Vec::new(), "some model files", row_width).unwrap();
    for i in 0..entries {
        let link = format!("m{}.stl", i);
        let img = format!("m{}.stl.png", i);
        writer.push_entry(&img, &link).unwrap();
    }
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

// ===========================================================================
// Table shape
// ===========================================================================

#[test]
fn test_cells_group_into_ceil_rows() {
    for (entries, row_width) in [(1, 5), (4, 5), (5, 5), (6, 5), (12, 5), (7, 3)] {
        let html = sheet(entries, row_width);
        let expected_rows = entries.div_ceil(row_width);
        assert_eq!(html.matches("<td>").count(), entries, "cells for n={}", entries);
        assert_eq!(
            html.matches("<tr>").count(),
            expected_rows,
            "rows for n={} w={}",
            entries,
            row_width
        );
        assert_eq!(html.matches("</tr>").count(), expected_rows);
    }
}

#[test]
fn test_row_width_multiple_has_no_trailing_empty_row() {
    let html = sheet(10, 5);
    assert_eq!(html.matches("<tr>").count(), 2);
    assert!(!html.contains("<tr>\n</tr>"));
}

#[test]
fn test_empty_document_is_openable() {
    let html = sheet(0, 5);
    assert!(html.starts_with("<!DOCTYPE html PUBLIC"));
    assert!(html.contains("<html><head>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("</table>"));
    assert!(html.ends_with("</body></html>\n"));
    assert_eq!(html.matches("<td>").count(), 0);
}

// ===========================================================================
// Cell content
// ===========================================================================

#[test]
fn test_ordinals_count_up_from_one_in_input_order() {
    let html = sheet(7, 3);
    let mut last_pos = 0;
    for n in 1..=7 {
        let marker = format!("[{}] ", n);
        let pos = html.find(&marker).unwrap_or_else(|| panic!("missing ordinal {}", n));
        assert!(pos > last_pos, "ordinal {} out of order", n);
        last_pos = pos;
    }
    assert!(!html.contains("[0] "));
    assert!(!html.contains("[8] "));
}

#[test]
fn test_nested_path_sample_list() {
    let mut writer = GalleryWriter::new(Vec::new(), "some model files", 5).unwrap();
    writer.push_entry("a.stl.png", "a.stl").unwrap();
    writer.push_entry("sub/b.stl.png", "sub/b.stl").unwrap();
    let html = String::from_utf8(writer.finish().unwrap()).unwrap();

    assert_eq!(html.matches("<td>").count(), 2);
    assert!(html.contains("<a href=\"a.stl\">a.stl</a>"));
    assert!(html.contains("<a href=\"sub/b.stl\">b.stl</a>"));
}

#[test]
fn test_page_chrome_matches_sheet_style() {
    let html = sheet(1, 5);
    assert!(html.contains("bgcolor=\"#222222\""));
    assert!(html.contains("<font color=\"#aaaaaa\">"));
    assert!(html.contains("charset=UTF-8"));
}
