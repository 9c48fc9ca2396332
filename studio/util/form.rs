/// Decodes a percent-encoded string (`%XX`) and converts `+` to space.
/// Malformed escapes are kept verbatim.
pub fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match std::str::from_utf8(&bytes[i + 1..i + 3]).ok().and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parses `key=value&key2=value2` into a `Vec` of `(key, value)` pairs.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (url_decode(k), url_decode(v))
        })
        .collect()
}

/// Looks up a key in parsed form pairs, returning the value if found.
pub fn form_get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Reads `row` and `col` from a form body and checks them against a grid of
/// side `size`.
pub fn parse_cell(body: &str, size: usize) -> Result<(usize, usize), String> {
    let pairs = parse_form(body);
    let coord = |key: &str| -> Result<usize, String> {
        let raw = form_get(&pairs, key).ok_or_else(|| format!("missing `{}`", key))?;
        let v: usize = raw.trim().parse().map_err(|_| format!("`{}` is not a cell index: {:?}", key, raw))?;
        if v >= size {
            return Err(format!("`{}` = {} is outside the {}x{} grid", key, v, size, size));
        }
        Ok(v)
    };
    Ok((coord("row")?, coord("col")?))
}
