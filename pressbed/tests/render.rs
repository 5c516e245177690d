use std::io::Write;

use pressbed::{
    filters::FLATE_DECODE,
    pdf::{dictionary, Dictionary, Name, Object, PdfString, Reference, Stream},
    render_to_vec, DocumentInfo, DocumentOptions, DocumentState, EncryptionKey, ObjectStore,
    PbError, StoredObject,
};

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Offsets of the used entries of the xref table, by object number.
fn xref_offsets(pdf: &[u8]) -> Vec<(usize, usize)> {
    let marker = pdf.windows(10).rposition(|w| w == b"startxref\n").unwrap();
    let tail = std::str::from_utf8(&pdf[marker + 10..]).unwrap();
    let start: usize = tail.lines().next().unwrap().parse().unwrap();

    let table = std::str::from_utf8(&pdf[start..]).unwrap();
    assert!(table.starts_with("xref\n"));
    let mut lines = table.lines().skip(1);
    let size: usize = lines.next().unwrap().split(' ').nth(1).unwrap().parse().unwrap();
    lines
        .take(size)
        .enumerate()
        .filter(|(_, line)| line.trim_end().ends_with(" n"))
        .map(|(number, line)| (number, line[..10].parse().unwrap()))
        .collect()
}

fn sample_document(options: DocumentOptions) -> DocumentState {
    let mut doc = DocumentState::new(options.info(DocumentInfo {
        title: Some("Offsets".into()),
        ..Default::default()
    }));
    let content = doc.store_mut().push_object(Object::Stream(Stream::new(
        Dictionary::default(),
        b"BT /F1 12 Tf 72 712 Td (first page) Tj ET\n".repeat(8),
    )));
    doc.start_new_page(dictionary([(b"Contents".as_slice(), Object::Reference(content))]))
        .unwrap();
    doc.start_new_page(Dictionary::default()).unwrap();
    doc
}

#[test]
fn xref_points_at_objects() {
    let mut doc = sample_document(DocumentOptions::default());
    let pdf = render_to_vec(&mut doc).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.3\n%\xFF\xFF\xFF\xFF\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    let offsets = xref_offsets(&pdf);
    assert_eq!(offsets.len(), doc.store().len());
    for (number, offset) in &offsets {
        let head = format!("{} 0 obj\n", number);
        assert!(pdf[*offset..].starts_with(head.as_bytes()), "object {}", number);
    }
    let from_store: Vec<_> = doc.store().objects().map(|o| o.offset().unwrap()).collect();
    let from_xref: Vec<_> = offsets.iter().map(|(_, o)| *o).collect();
    assert_eq!(from_store, from_xref);
    assert!(from_store.windows(2).all(|w| w[0] < w[1]));

    assert!(find(&pdf, b"/Title (Offsets)").is_some());
    assert!(find(&pdf, b"/Kids [5 0 R 6 0 R] /Count 2").is_some());
    assert!(find(&pdf, b"trailer\n<</Size 7 /Root 3 0 R /Info 1 0 R>>").is_some());
}

#[test]
fn compressed_document() {
    let mut doc = sample_document(DocumentOptions::default().compress(true));
    let pdf = render_to_vec(&mut doc).unwrap();

    assert!(find(&pdf, b"/Filter /FlateDecode").is_some());
    assert!(find(&pdf, b"first page").is_none());

    let content = doc.store().get(Reference::new(4, 0)).and_then(Object::stream).unwrap();
    assert_eq!(content.filters()[0].name, FLATE_DECODE);
    let decoded = content.decoded_data(doc.filters()).unwrap();
    assert!(decoded.starts_with(b"BT /F1 12 Tf"));
}

#[test]
fn encrypted_document() {
    let key = EncryptionKey::new(b"0123456789".to_vec()).unwrap();
    let mut plain = sample_document(DocumentOptions::default());
    let mut encrypted = sample_document(DocumentOptions::default().encryption_key(key));
    assert!(encrypted.encrypt());

    let plain_pdf = render_to_vec(&mut plain).unwrap();
    let encrypted_pdf = render_to_vec(&mut encrypted).unwrap();

    assert!(find(&encrypted_pdf, b"(Offsets)").is_none());
    assert!(find(&encrypted_pdf, b"first page").is_none());
    // names and numbers are not encrypted
    assert!(find(&encrypted_pdf, b"/Type /Catalog").is_some());

    for (number, offset) in xref_offsets(&encrypted_pdf) {
        let head = format!("{} 0 obj\n", number);
        assert!(encrypted_pdf[offset..].starts_with(head.as_bytes()));
    }
    assert_ne!(plain_pdf, encrypted_pdf);
}

#[test]
fn external_stream_is_streamed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let jpeg: Vec<u8> = (0..30_000u32).map(|i| (i % 256) as u8).collect();
    file.write_all(&jpeg).unwrap();

    let mut doc = DocumentState::new(DocumentOptions::default().compress(true));
    let image = Stream::from_file(
        dictionary([(b"Filter".as_slice(), Object::Name(Name::from("DCTDecode")))]),
        file.path(),
    )
    .unwrap();
    let image = doc.store_mut().push_object(Object::Stream(image));
    let pdf = render_to_vec(&mut doc).unwrap();

    let head = format!("{} 0 obj\n<</Filter /DCTDecode /Length 30000>> stream\n", image.index);
    let start = find(&pdf, head.as_bytes()).unwrap() + head.len();
    assert_eq!(&pdf[start..start + jpeg.len()], &jpeg[..]);
    assert!(pdf[start + jpeg.len()..].starts_with(b"\nendstream\nendobj\n"));
}

#[test]
fn missing_external_stream_fails_render() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let stream = Stream::from_file(Dictionary::default(), file.path()).unwrap();
    drop(file);

    let mut doc = DocumentState::new(DocumentOptions::default());
    let missing = doc.store_mut().push_object(Object::Stream(stream));
    let after = doc
        .store_mut()
        .push_object(Object::String(PdfString::from("after")));

    let mut out = Vec::new();
    match doc.render_body(&mut out) {
        Err(PbError::ResourceUnavailable { reference, .. }) => assert_eq!(reference, missing),
        other => panic!("unexpected result {:?}", other),
    }

    let offset_of = |r: Reference| {
        doc.store()
            .objects()
            .find(|o| o.reference() == r)
            .and_then(|o| o.offset())
    };
    assert_eq!(offset_of(Reference::new(1, 0)), Some(0));
    assert_eq!(offset_of(missing), None);
    assert_eq!(offset_of(after), None);
}

#[test]
fn external_stream_changed_after_creation() {
    let mut grown = tempfile::NamedTempFile::new().unwrap();
    grown.write_all(b"AAAAAAAAAA").unwrap();
    let shrunk = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(shrunk.path(), b"AAAAAAAAAA").unwrap();

    let grown_stream = Stream::from_file(Dictionary::default(), grown.path()).unwrap();
    let shrunk_stream = Stream::from_file(Dictionary::default(), shrunk.path()).unwrap();
    grown.write_all(b"BBBBB").unwrap();
    std::fs::write(shrunk.path(), b"AAAA").unwrap();

    for (stream, kind) in [
        (grown_stream, std::io::ErrorKind::InvalidData),
        (shrunk_stream, std::io::ErrorKind::UnexpectedEof),
    ] {
        let mut doc = DocumentState::new(DocumentOptions::default());
        let changed = doc.store_mut().push_object(Object::Stream(stream));

        let mut out = Vec::new();
        match doc.render(&mut out) {
            Err(PbError::ResourceUnavailable { reference, source, .. }) => {
                assert_eq!(reference, changed);
                assert_eq!(source.kind(), kind);
            }
            other => panic!("unexpected result {:?}", other),
        }
        let offset = doc
            .store()
            .objects()
            .find(|o| o.reference() == changed)
            .and_then(|o| o.offset());
        assert_eq!(offset, None);
    }
}

#[test]
fn hydrate_pages_from_existing_store() {
    let mut source = sample_document(DocumentOptions::default());
    source.start_new_page(Dictionary::default()).unwrap();
    let store = source.store().clone();

    let mut doc = DocumentState::with_store(DocumentOptions::default(), store);
    assert_eq!(doc.page_count(), 0);
    assert_eq!(doc.populate_pages_from_store().unwrap(), 3);
    assert_eq!(doc.populate_pages_from_store().unwrap(), 0);

    let hydrated: Vec<_> = doc.pages().iter().map(|p| p.dictionary()).collect();
    let expected: Vec<_> = (1..=3).map(|i| doc.store().object_id_for_page(i).unwrap()).collect();
    assert_eq!(hydrated, expected);
    assert_eq!(doc.page().map(|p| p.dictionary()), expected.last().copied());

    let page = doc.start_new_page(Dictionary::default()).unwrap();
    assert_eq!(doc.store().object_id_for_page(4), Some(page.dictionary()));
}

#[test]
fn render_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = sample_document(DocumentOptions::default().print_scaling(true));
    doc.render_file(&path).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, render_to_vec(&mut doc).unwrap());
    assert!(find(&written, b"/ViewerPreferences <</PrintScaling /None>>").is_some());
}
