// A .docx file is a ZIP archive of XML parts. docx-rs parses it into a
// typed tree; the text lives at
//   Document -> Paragraph -> Run -> Text
// with tables, content controls (structured data tags) and tracked
// insertions nesting further paragraphs and runs.

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild, read_docx,
};

use super::ImportError;

/// Extract the raw text of a .docx, discarding all formatting.
///
/// Paragraphs are separated by a blank line; runs within a paragraph are
/// concatenated as-is. Tracked deletions are dropped, tracked insertions kept.
pub fn extract_raw_text(bytes: &[u8]) -> Result<String, ImportError> {
    let docx = read_docx(bytes).map_err(|e| ImportError::Docx(format!("{:?}", e)))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => paragraphs.push(paragraph_text(para)),
            DocumentChild::Table(table) => table_text(table, &mut paragraphs),
            DocumentChild::StructuredDataTag(sdt) => sdt_text(sdt, &mut paragraphs),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n\n"))
}

fn table_text(table: &Table, out: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => out.push(paragraph_text(para)),
                    TableCellContent::Table(inner) => table_text(inner, out),
                    TableCellContent::StructuredDataTag(sdt) => sdt_text(sdt, out),
                    _ => {}
                }
            }
        }
    }
}

/// Block-level content control: may hold paragraphs, tables or bare runs
fn sdt_text(sdt: &StructuredDataTag, out: &mut Vec<String>) {
    let mut inline = String::new();
    for child in &sdt.children {
        match child {
            StructuredDataTagChild::Paragraph(para) => out.push(paragraph_text(para)),
            StructuredDataTagChild::Table(table) => table_text(table, out),
            StructuredDataTagChild::StructuredDataTag(inner) => sdt_text(inner, out),
            StructuredDataTagChild::Run(run) => push_run(run, &mut inline),
            _ => {}
        }
    }
    if !inline.is_empty() {
        out.push(inline);
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&para.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for ic in &insert.children {
                    if let InsertChild::Run(run) = ic {
                        push_run(run, text);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(sdt) => {
                for sc in &sdt.children {
                    if let StructuredDataTagChild::Run(run) = sc {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Insert, TableCell, TableRow};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    fn build_docx(paragraphs: &[&[&str]]) -> Vec<u8> {
        let mut docx = Docx::new();
        for runs in paragraphs {
            let mut para = Paragraph::new();
            for run in runs.iter() {
                para = para.add_run(Run::new().add_text(*run));
            }
            docx = docx.add_paragraph(para);
        }
        pack(docx)
    }

    fn text_paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn test_extract_single_paragraph() {
        let bytes = build_docx(&[&["hello world"]]);
        assert_eq!(extract_raw_text(&bytes).unwrap().trim(), "hello world");
    }

    #[test]
    fn test_extract_joins_runs_and_paragraphs() {
        let bytes = build_docx(&[&["Split ", "runs"], &["Second paragraph"]]);
        let text = extract_raw_text(&bytes).unwrap();
        assert_eq!(text.trim(), "Split runs\n\nSecond paragraph");
    }

    #[test]
    fn test_extract_keeps_tracked_insertions() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("Before "))
            .add_insert(Insert::new(Run::new().add_text("inserted words")));
        let bytes = pack(Docx::new().add_paragraph(para));

        assert_eq!(
            extract_raw_text(&bytes).unwrap().trim(),
            "Before inserted words"
        );
    }

    #[test]
    fn test_extract_nested_table() {
        let inner = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(text_paragraph("nested cell")),
        ])]);
        let outer = Table::new(vec![TableRow::new(vec![
            TableCell::new()
                .add_paragraph(text_paragraph("outer cell"))
                .add_table(inner),
        ])]);
        let bytes = pack(Docx::new().add_table(outer));

        let text = extract_raw_text(&bytes).unwrap();
        assert!(text.contains("outer cell"), "got {:?}", text);
        assert!(text.contains("nested cell"), "got {:?}", text);
    }

    #[test]
    fn test_extract_body_content_control() {
        let sdt = StructuredDataTag::new().add_paragraph(text_paragraph("block sdt text"));
        let bytes = pack(
            Docx::new()
                .add_paragraph(text_paragraph("intro"))
                .add_structured_data_tag(sdt),
        );

        let text = extract_raw_text(&bytes).unwrap();
        assert!(text.contains("intro"), "got {:?}", text);
        assert!(text.contains("block sdt text"), "got {:?}", text);
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert!(matches!(
            extract_raw_text(b"plain bytes, not a zip"),
            Err(ImportError::Docx(_))
        ));
    }
}
