//! Minimal multipart/form-data reader for the upload form.

/// One uploaded file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Client-supplied filename; may be empty when the browser sent no file.
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
/// Returns `None` for any other content type.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    let mut params = content_type.split(';').map(|s| s.trim());
    let mime = params.next()?;
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    params
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Finds the file part whose form field is `field_name`.
///
/// Only parts carrying a `filename` parameter count as files, matching how
/// browsers submit `<input type="file">`. A text field with the same name is
/// ignored.
pub fn extract_file_part(body: &[u8], boundary: &str, field_name: &str) -> Option<FilePart> {
    let delimiter = format!("--{}", boundary);
    let parts = split_on(body, delimiter.as_bytes());

    for part in parts {
        let sep = b"\r\n\r\n";
        let Some(sep_pos) = find_subsequence(part, sep) else { continue };
        let headers = String::from_utf8_lossy(&part[..sep_pos]);
        let Some((name, filename)) = parse_disposition(&headers) else { continue };
        if name != field_name {
            continue;
        }
        if let Some(filename) = filename {
            let raw = &part[sep_pos + sep.len()..];
            let data = raw.strip_suffix(b"\r\n").unwrap_or(raw);
            return Some(FilePart { filename, data: data.to_vec() });
        }
    }
    None
}

/// Reads `name` and optional `filename` from the part's Content-Disposition
/// header.
fn parse_disposition(headers: &str) -> Option<(String, Option<String>)> {
    let line = headers.lines().find(|l| {
        l.split_once(':')
            .map_or(false, |(k, _)| k.trim().eq_ignore_ascii_case("content-disposition"))
    })?;
    let (_, value) = line.split_once(':')?;

    let mut name = None;
    let mut filename = None;
    for param in split_params(value) {
        let Some((key, val)) = param.split_once('=') else { continue };
        let val = unquote(val);
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(val),
            "filename" => filename = Some(val),
            _ => {}
        }
    }
    name.map(|n| (n, filename))
}

/// Splits a header value on `;`, except inside double-quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut chars = value.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if in_quotes && matches!(chars.peek(), Some((_, '"' | '\\'))) => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// Strips surrounding quotes and resolves the `\"` and `\\` escapes.
/// Any other backslash is kept, so Windows paths survive.
fn unquote(value: &str) -> String {
    let value = value.trim();
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_owned();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
