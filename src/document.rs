use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document, Encoding, Object};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("file read error: {0}")]
    Read(#[from] gloo::file::FileReadError),
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("encrypted PDFs are not supported")]
    EncryptedUnsupported,
    #[error("page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}

/// Reads the whole file into memory, then extracts its pages.
pub async fn read_pdf(file: gloo::file::File) -> Result<Vec<String>, DocumentError> {
    log::info!("reading {} ({} bytes)", file.name(), file.size());
    let bytes = gloo::file::futures::read_as_bytes(&file).await?;
    extract_pages(&bytes)
}

/// Text of every page in document order, one string per page.
///
/// Encrypted files are opened with the empty user password, which covers
/// the common "owner password only" case. Anything else is rejected.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        if let Err(err) = doc.decrypt("") {
            log::warn!("cannot open encrypted PDF: {err}");
            return Err(DocumentError::EncryptedUnsupported);
        }
        log::debug!("decrypted PDF with the empty password");
    }
    let pages = doc.get_pages();
    log::debug!("parsed PDF with {} pages", pages.len());
    let mut out = Vec::with_capacity(pages.len());
    for (number, page_id) in pages {
        let text = page_text(&doc, page_id).map_err(|source| DocumentError::Page { page: number, source })?;
        out.push(text);
    }
    Ok(out)
}

fn page_text(doc: &Document, page_id: lopdf::ObjectId) -> Result<String, lopdf::Error> {
    let encodings = font_encodings(doc, page_id);
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;
    let mut font: Option<&Encoding> = None;
    let mut runs: Vec<String> = Vec::new();
    for op in &content.operations {
        let run = match op.operator.as_str() {
            "Tf" => {
                font = op
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| encodings.get(name));
                None
            }
            "Tj" | "'" => op.operands.first().and_then(|o| string_operand(font, o)),
            "\"" => op.operands.get(2).and_then(|o| string_operand(font, o)),
            "TJ" => match op.operands.first() {
                Some(Object::Array(items)) => {
                    let joined: String = items.iter().filter_map(|o| string_operand(font, o)).collect();
                    Some(joined)
                }
                _ => None,
            },
            _ => None,
        };
        if let Some(run) = run {
            if !run.is_empty() {
                runs.push(run);
            }
        }
    }
    Ok(runs.join(" "))
}

/// Encoding of every font resource on the page, keyed by resource name.
fn font_encodings(doc: &Document, page_id: lopdf::ObjectId) -> BTreeMap<Vec<u8>, Encoding<'_>> {
    let fonts = match doc.get_page_fonts(page_id) {
        Ok(fonts) => fonts,
        Err(err) => {
            log::warn!("page fonts unavailable: {err}");
            return BTreeMap::new();
        }
    };
    fonts
        .into_iter()
        .filter(|(_, font)| font.type_is(b"Font"))
        .filter_map(|(name, font)| match font.get_font_encoding(doc) {
            Ok(encoding) => Some((name, encoding)),
            Err(err) => {
                log::warn!("font {}: {err}", String::from_utf8_lossy(&name));
                None
            }
        })
        .collect()
}

fn string_operand(font: Option<&Encoding>, obj: &Object) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };
    let decoded = font.and_then(|encoding| Document::decode_text(encoding, bytes).ok());
    Some(decoded.unwrap_or_else(|| decode_pdf_string(bytes)))
}

/// Fallback for runs without a usable font encoding: UTF-16BE when the
/// string starts with a BOM, otherwise one char per byte.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{courier, document_with_fonts, helvetica_win_ansi, pdf_with_pages, save, simple_pdf, tj};
    use super::*;
    use lopdf::content::Operation;
    use lopdf::encryption::{decrypt_object, get_encryption_key};
    use lopdf::{StringFormat, dictionary};

    fn select_font(name: &str) -> Operation {
        Operation::new("Tf", vec![name.into(), Object::Integer(24)])
    }

    fn raw_tj(bytes: Vec<u8>) -> Operation {
        Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)])
    }

    /// RC4 40-bit standard security with an empty user password. RC4 is
    /// symmetric, so the decrypt primitive also seals the streams.
    fn encrypt_with_empty_password(doc: &mut Document) {
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => Object::Integer(1),
            "R" => Object::Integer(2),
            "Length" => Object::Integer(40),
            "O" => Object::String(vec![0x5A; 32], StringFormat::Hexadecimal),
            "P" => Object::Integer(-4),
        });
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            vec![
                Object::String(vec![0x11; 16], StringFormat::Hexadecimal),
                Object::String(vec![0x22; 16], StringFormat::Hexadecimal),
            ],
        );
        let key = get_encryption_key(doc, "", false).unwrap();
        for (&id, obj) in doc.objects.iter_mut() {
            if id == encrypt_id {
                continue;
            }
            let Ok(sealed) = decrypt_object(&key, id, obj) else {
                continue;
            };
            if let Object::Stream(stream) = obj {
                stream.set_content(sealed);
            }
        }
    }

    #[test]
    fn extracts_one_string_per_page_in_order() {
        let pages = extract_pages(&simple_pdf(&["A", "B", "C"])).expect("extract should succeed");
        assert_eq!(pages, vec!["A", "B", "C"]);
    }

    #[test]
    fn joins_runs_with_single_spaces() {
        let bytes = pdf_with_pages(&[vec![
            tj("Hello"),
            Operation::new("TJ", vec![Object::Array(vec![
                Object::string_literal("wor"),
                Object::Integer(-120),
                Object::string_literal("ld"),
            ])]),
            Operation::new("'", vec![Object::string_literal("again")]),
            Operation::new(
                "\"",
                vec![Object::Integer(0), Object::Integer(0), Object::string_literal("end")],
            ),
        ]]);
        let pages = extract_pages(&bytes).expect("extract should succeed");
        assert_eq!(pages, vec!["Hello world again end"]);
    }

    #[test]
    fn page_without_text_is_empty_string() {
        let bytes = pdf_with_pages(&[vec![], vec![tj("only")]]);
        let pages = extract_pages(&bytes).expect("extract should succeed");
        assert_eq!(pages, vec!["".to_string(), "only".to_string()]);
    }

    #[test]
    fn win_ansi_font_bytes_decode_through_the_font_encoding() {
        let doc = document_with_fonts(
            vec![helvetica_win_ansi()],
            &[vec![raw_tj(vec![0x93, b'H', b'i', 0x94, b' ', 0x80])]],
        );
        assert_eq!(extract_pages(&save(doc)).unwrap(), vec!["\u{201c}Hi\u{201d} \u{20ac}"]);
    }

    #[test]
    fn switching_fonts_mid_page_switches_encoding() {
        let doc = document_with_fonts(
            vec![courier(), helvetica_win_ansi()],
            &[vec![tj("price"), select_font("F2"), raw_tj(vec![0x80, b'5'])]],
        );
        assert_eq!(extract_pages(&save(doc)).unwrap(), vec!["price \u{20ac}5"]);
    }

    #[test]
    fn unknown_font_falls_back_to_utf16_bom_strings() {
        let mut raw = vec![0xFE, 0xFF];
        for unit in "Zoë".encode_utf16() {
            raw.extend_from_slice(&unit.to_be_bytes());
        }
        let bytes = pdf_with_pages(&[vec![
            select_font("F9"),
            Operation::new("Tj", vec![Object::String(raw, StringFormat::Hexadecimal)]),
        ]]);
        assert_eq!(extract_pages(&bytes).unwrap(), vec!["Zoë"]);
    }

    #[test]
    fn latin1_bytes_map_to_chars() {
        assert_eq!(decode_pdf_string(b"caf\xe9"), "café");
    }

    #[test]
    fn empty_user_password_pdf_is_decrypted() {
        let mut doc = document_with_fonts(vec![courier()], &[vec![tj("secret")], vec![tj("notes")]]);
        encrypt_with_empty_password(&mut doc);
        let bytes = save(doc);
        assert!(Document::load_mem(&bytes).unwrap().is_encrypted());
        assert_eq!(extract_pages(&bytes).unwrap(), vec!["secret", "notes"]);
    }

    #[test]
    fn unsupported_encryption_is_rejected() {
        let mut doc = document_with_fonts(vec![courier()], &[vec![tj("locked")]]);
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => Object::Integer(4),
            "R" => Object::Integer(4),
            "Length" => Object::Integer(128),
            "O" => Object::String(vec![0x5A; 32], StringFormat::Hexadecimal),
            "P" => Object::Integer(-4),
        });
        doc.trailer.set("Encrypt", encrypt_id);
        let err = extract_pages(&save(doc)).expect_err("should refuse");
        assert!(matches!(err, DocumentError::EncryptedUnsupported));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = extract_pages(b"definitely not a pdf").expect_err("should fail");
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}
