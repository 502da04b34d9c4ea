use chrono::NaiveDate;
use ledgerlift_ingest::{LocalPipeline, extract_page_texts};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Build a PDF with one Helvetica font; an empty operation list makes a page
/// with no content stream.
fn build_pdf(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica"
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id }
    });

    let mut kids = Vec::new();
    for operations in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id
        };
        if !operations.is_empty() {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", content_id);
        }
        kids.push(Object::from(doc.add_object(page)));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()]
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// One text object, one `Td` move per line.
fn text_block(lines: &[&str]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("Td", vec![50.into(), 750.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.push(Operation::new("Td", vec![0.into(), Object::Integer(-14)]));
        }
        ops.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

fn statement_pdf() -> Vec<u8> {
    build_pdf(vec![
        text_block(&[
            "Account Summary",
            "Transaction History",
            "2024-01-Store Purchase AB1234 -$12.50 $987.50",
        ]),
        vec![],
        text_block(&["15"]),
    ])
}

#[test]
fn test_pdf_pages_keep_their_lines() {
    let pages = extract_page_texts(&statement_pdf()).unwrap();
    assert_eq!(
        pages,
        vec![
            Some(
                "Account Summary\nTransaction History\n2024-01-Store Purchase AB1234 -$12.50 $987.50\n"
                    .to_string()
            ),
            None,
            Some("15\n".to_string()),
        ]
    );
}

#[test]
fn test_convert_pdf_across_blank_page() {
    let records = LocalPipeline::new()
        .unwrap()
        .convert_pdf_bytes(&statement_pdf())
        .unwrap();

    assert_eq!(records.len(), 1, "got {records:#?}");
    let r = &records[0];
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(r.description, "Store Purchase");
    assert_eq!(r.reference.as_deref(), Some("AB1234"));
    assert_eq!(r.amount, Some(-12.5));
    assert_eq!(r.balance, Some(987.5));
}

#[test]
fn test_unreadable_page_fails_the_document() {
    let broken = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![12.into()]),
        Operation::new("Tj", vec![Object::string_literal("15")]),
        Operation::new("ET", vec![]),
    ];
    let pdf = build_pdf(vec![text_block(&["Transaction History"]), broken]);

    let err = extract_page_texts(&pdf).unwrap_err();
    assert_eq!(err.to_string(), "extract text from page 2");
    assert!(LocalPipeline::new().unwrap().convert_pdf_bytes(&pdf).is_err());
}
