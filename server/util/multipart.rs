/// One uploaded file from a multipart/form-data body.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// The form field name, if the part declared one.
    pub field_name: Option<String>,
    /// Client-supplied file name; may be empty when the browser sent no file.
    pub filename: String,
    pub data: Vec<u8>,
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .filter_map(|s| s.split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("boundary"))
        .map(|(_, v)| v.trim().trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Splits Content-Disposition parameters into `(key, value)` pairs.
///
/// A `;` inside a quoted value does not end the parameter, and `\"` / `\\`
/// inside quotes are unescaped. The leading disposition type (`form-data`) is
/// skipped.
fn disposition_params(disposition: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = disposition.chars().peekable();

    // Skip the disposition type.
    for c in chars.by_ref() {
        if c == ';' {
            break;
        }
    }

    loop {
        // Bare tokens without `=` are ignored.
        let mut key = String::new();
        let mut has_value = false;
        for c in chars.by_ref() {
            match c {
                '=' => {
                    has_value = true;
                    break;
                }
                ';' => key.clear(),
                _ => key.push(c),
            }
        }
        if !has_value {
            break;
        }
        let key = key.trim().to_owned();

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => match chars.next() {
                        Some(escaped @ ('"' | '\\')) => value.push(escaped),
                        Some(other) => {
                            value.push('\\');
                            value.push(other);
                        }
                        None => value.push('\\'),
                    },
                    '"' => break,
                    _ => value.push(c),
                }
            }
            // Drop anything between the closing quote and the next `;`.
            for c in chars.by_ref() {
                if c == ';' {
                    break;
                }
            }
        } else {
            for c in chars.by_ref() {
                if c == ';' {
                    break;
                }
                value.push(c);
            }
            value = value.trim().to_owned();
        }

        if !key.is_empty() {
            params.push((key, value));
        }
    }
    params
}

/// Reads a `key="value"` (or bare `key=value`) parameter out of a
/// Content-Disposition header line. Keys match case-insensitively and exactly,
/// so `name` never matches inside `filename`.
fn disposition_param(disposition: &str, key: &str) -> Option<String> {
    disposition_params(disposition)
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

/// Finds the Content-Disposition line in a part's header block.
fn content_disposition(headers: &str) -> Option<&str> {
    headers
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-disposition"))
        .map(|(_, v)| v.trim())
}

/// Extracts the first part carrying a `filename` parameter.
///
/// Returns `None` if the body holds no file part.
pub fn extract_file_part(body: &[u8], boundary: &str) -> Option<FilePart> {
    let delimiter = format!("--{}", boundary);
    let parts = split_on(body, delimiter.as_bytes());

    // The first piece is the preamble before any delimiter.
    for part in parts.into_iter().skip(1) {
        let sep = b"\r\n\r\n";
        let Some(sep_pos) = find_subsequence(part, sep) else {
            continue;
        };
        let header_section = String::from_utf8_lossy(&part[..sep_pos]);
        let Some(disposition) = content_disposition(&header_section) else {
            continue;
        };
        let Some(filename) = disposition_param(disposition, "filename") else {
            continue;
        };

        let raw = &part[sep_pos + sep.len()..];
        let data = raw.strip_suffix(b"\r\n").unwrap_or(raw);
        return Some(FilePart {
            field_name: disposition_param(disposition, "name"),
            filename,
            data: data.to_vec(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(parts: &[(&str, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (disposition, data) in parts {
            out.extend_from_slice(b"--XyZ\r\n");
            out.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
            out.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            out.extend_from_slice(data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"--XyZ--\r\n");
        out
    }

    #[test]
    fn boundary_is_read_from_content_type() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=----WebKitFormBoundaryAbc"),
            Some("----WebKitFormBoundaryAbc".to_owned())
        );
        assert_eq!(extract_boundary("multipart/form-data; boundary=\"q\""), Some("q".to_owned()));
        assert_eq!(extract_boundary("application/json"), None);
        assert_eq!(extract_boundary("multipart/form-data; boundary="), None);
    }

    #[test]
    fn first_file_part_is_returned() {
        let data = body(&[
            ("form-data; name=\"note\"", &b"hello"[..]),
            ("form-data; name=\"file\"; filename=\"soil.PNG\"", &b"\x89PNG\r\n\x1a\nrest"[..]),
            ("form-data; name=\"other\"; filename=\"second.jpg\"", &b"jpeg"[..]),
        ]);
        let part = extract_file_part(&data, "XyZ").unwrap();
        assert_eq!(part.field_name.as_deref(), Some("file"));
        assert_eq!(part.filename, "soil.PNG");
        assert_eq!(part.data, b"\x89PNG\r\n\x1a\nrest");
    }

    #[test]
    fn binary_payload_with_crlf_is_preserved() {
        let payload: &[u8] = b"\r\n\r\nab\r\ncd";
        let data = body(&[("form-data; name=\"file\"; filename=\"a.jpg\"", payload)]);
        assert_eq!(extract_file_part(&data, "XyZ").unwrap().data, payload);
    }

    #[test]
    fn text_only_body_has_no_file() {
        let data = body(&[("form-data; name=\"filename\"", &b"soil.png"[..])]);
        assert_eq!(extract_file_part(&data, "XyZ"), None);
    }

    #[test]
    fn empty_filename_is_still_a_file_part() {
        let data = body(&[("form-data; name=\"file\"; filename=\"\"", &b""[..])]);
        let part = extract_file_part(&data, "XyZ").unwrap();
        assert_eq!(part.filename, "");
        assert!(part.data.is_empty());
    }

    #[test]
    fn semicolon_inside_quoted_filename_is_kept() {
        let data = body(&[("form-data; name=\"file\"; filename=\"soil;1.png\"", &b"img"[..])]);
        let part = extract_file_part(&data, "XyZ").unwrap();
        assert_eq!(part.filename, "soil;1.png");
        assert_eq!(part.field_name.as_deref(), Some("file"));
    }

    #[test]
    fn escaped_quote_in_filename_is_unescaped() {
        let data = body(&[(r#"form-data; name="file"; filename="my \"best\" field.jpg""#, &b"img"[..])]);
        let part = extract_file_part(&data, "XyZ").unwrap();
        assert_eq!(part.filename, "my \"best\" field.jpg");
    }

    #[test]
    fn unquoted_parameters_are_read() {
        let params = disposition_params("form-data; name=file; filename=a.png");
        assert_eq!(
            params,
            vec![("name".to_owned(), "file".to_owned()), ("filename".to_owned(), "a.png".to_owned())]
        );
    }

    #[test]
    fn wrong_boundary_finds_nothing() {
        let data = body(&[("form-data; name=\"file\"; filename=\"a.png\"", &b"x"[..])]);
        assert_eq!(extract_file_part(&data, "nope"), None);
    }
}
