use std::io::BufWriter;

use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};
use tracing::debug;

use super::{Document, DrawOp};
use crate::error::{ReportError, Result};

fn pdf_error<E: std::fmt::Debug>(e: E) -> ReportError {
    ReportError::Pdf(format!("{e:?}"))
}

/// Write every page's content and footer ops through printpdf.
pub(super) fn render_pdf(doc: &Document) -> Result<Vec<u8>> {
    let layout = doc.layout();
    let (width, height) = (layout.page_width, layout.page_height);

    let (pdf, first_page, first_layer) =
        PdfDocument::new(doc.title(), Mm(width), Mm(height), "Layer 1");
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in doc.pages().iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(Mm(width), Mm(height), "Layer 1")
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);

        for op in page.content.iter().chain(page.footer.iter()) {
            match op {
                DrawOp::Text { x, y, style, text } => {
                    let font = if style.bold { &bold } else { &regular };
                    layer.use_text(text.as_str(), style.size, Mm(*x), Mm(height - *y), font);
                }
                DrawOp::Rule {
                    x1,
                    x2,
                    y,
                    thickness,
                } => {
                    layer.set_outline_thickness(*thickness / crate::format::PT_TO_MM);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1), Mm(height - *y)), false),
                            (Point::new(Mm(*x2), Mm(height - *y)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    debug!(pages = doc.page_count(), "serializing pdf");
    let mut buf = BufWriter::new(Vec::new());
    pdf.save(&mut buf).map_err(pdf_error)?;
    buf.into_inner().map_err(|e| ReportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportLayoutConfig;
    use crate::format::Align;
    use crate::layout::{Canvas, TextStyle, PDF_MAGIC};

    #[test]
    fn output_starts_with_pdf_magic() {
        let mut canvas = Canvas::new("Smoke", ReportLayoutConfig::default());
        canvas.line("Hello", TextStyle::bold(12.0), Align::Center);
        canvas.rule();
        canvas.new_page();
        canvas.line("Second page", TextStyle::regular(10.0), Align::Left);
        let bytes = canvas.into_document().to_pdf_bytes().unwrap();
        assert!(bytes.starts_with(PDF_MAGIC));
    }
}
