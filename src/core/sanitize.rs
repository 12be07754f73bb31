// src/core/sanitize.rs

/// Decode HTML character references. Unknown names are left as written.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| entity(&after[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "hellip" => '…',
        "para" => '¶',
        _ => return None,
    })
}

/// Runs of two or three spaces between non-space characters become one space.
pub fn collapse_inner_spaces(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != ' ' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let run_end = chars[i..].iter().position(|&c| c != ' ').map_or(chars.len(), |p| i + p);
        let run = run_end - i;
        let bounded = i > 0 && run_end < chars.len();
        if bounded && (2..=3).contains(&run) {
            out.push(' ');
        } else {
            out.extend(&chars[i..run_end]);
        }
        i = run_end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities() {
        assert_eq!(decode_entities("a&nbsp;b &amp; c"), "a\u{a0}b & c");
        assert_eq!(decode_entities("&#8220;hi&#x201D;"), "“hi”");
        assert_eq!(decode_entities("AT&T &bogus; x"), "AT&T &bogus; x");
    }

    #[test]
    fn inner_spaces() {
        assert_eq!(collapse_inner_spaces("a  b   c    d"), "a b c    d");
        assert_eq!(collapse_inner_spaces("  lead"), "  lead");
    }
}
