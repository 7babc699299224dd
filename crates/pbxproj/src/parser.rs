use crate::value::{Array, Dict, Entry, Scalar, Span, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// 1-based line and column of byte `offset`.
#[must_use]
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(offset, |pos| offset - pos - 1) + 1;
    (line, column)
}

/// Parse a whole pbxproj document: an optional `// !$*UTF8*$!` header and one root dictionary.
///
/// # Errors
/// Returns error with the failing byte offset when the text is not a property list.
pub fn parse(source: &str) -> Result<Dict, SyntaxError> {
    let mut parser = Parser::new(source);
    parser.skip_trivia()?;
    let root = match parser.peek() {
        Some(b'{') => parser.parse_dict()?,
        Some(_) => return Err(SyntaxError::new(parser.pos, "expected '{' at top level")),
        None => return Err(SyntaxError::new(parser.pos, "empty document")),
    };
    parser.skip_trivia()?;
    if parser.pos < source.len() {
        return Err(SyntaxError::new(
            parser.pos,
            "unexpected content after root dictionary",
        ));
    }
    Ok(root)
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

fn is_structural(b: u8) -> bool {
    matches!(b, b'{' | b'}' | b'(' | b')' | b';' | b',' | b'=' | b'"')
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.bytes[self.pos..].starts_with(pattern.as_bytes())
    }

    fn expect(&mut self, expected: u8) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(SyntaxError::new(
                self.pos,
                format!("expected '{}', found '{}'", expected as char, b as char),
            )),
            None => Err(SyntaxError::new(
                self.pos,
                format!("expected '{}', found end of input", expected as char),
            )),
        }
    }

    /// Skips whitespace and comments, returning the text of the last block comment seen.
    fn skip_trivia(&mut self) -> Result<Option<String>, SyntaxError> {
        let mut annotation = None;
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.starts_with("//") {
                self.pos = self.source[self.pos..]
                    .find('\n')
                    .map_or(self.source.len(), |end| self.pos + end + 1);
            } else if self.starts_with("/*") {
                let body_start = self.pos + 2;
                let Some(end) = self.source[body_start..].find("*/") else {
                    return Err(SyntaxError::new(self.pos, "unterminated comment"));
                };
                annotation = Some(self.source[body_start..body_start + end].trim().to_string());
                self.pos = body_start + end + 2;
            } else {
                return Ok(annotation);
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        match self.peek() {
            Some(b'{') => Ok(Value::Dict(self.parse_dict()?)),
            Some(b'(') => Ok(Value::Array(self.parse_array()?)),
            Some(_) => Ok(Value::String(self.parse_string()?)),
            None => Err(SyntaxError::new(self.pos, "expected value, found end of input")),
        }
    }

    fn parse_dict(&mut self) -> Result<Dict, SyntaxError> {
        let start = self.pos;
        self.expect(b'{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(SyntaxError::new(start, "unterminated dictionary")),
                Some(_) => {}
            }
            let key = self.parse_string()?.text;
            let annotation = self.skip_trivia()?;
            self.expect(b'=')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            self.skip_trivia()?;
            self.expect(b';')?;
            entries.push(Entry {
                key,
                annotation,
                value,
            });
        }
        Ok(Dict {
            entries,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_array(&mut self) -> Result<Array, SyntaxError> {
        let start = self.pos;
        self.expect(b'(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(SyntaxError::new(start, "unterminated array")),
                Some(_) => {}
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {}
                _ => return Err(SyntaxError::new(self.pos, "expected ',' or ')'")),
            }
        }
        Ok(Array {
            items,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_string(&mut self) -> Result<Scalar, SyntaxError> {
        if self.peek() == Some(b'"') {
            return self.parse_quoted();
        }
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace()
                || is_structural(b)
                || self.starts_with("/*")
                || self.starts_with("//")
            {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            let found = self.peek().map_or('?', |b| b as char);
            return Err(SyntaxError::new(
                start,
                format!("expected string, found '{found}'"),
            ));
        }
        Ok(Scalar {
            text: self.source[start..self.pos].to_string(),
            span: Span::new(start, self.pos),
        })
    }

    fn parse_quoted(&mut self) -> Result<Scalar, SyntaxError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        let mut chunk_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(SyntaxError::new(start, "unterminated string")),
                Some(b'"') => {
                    text.push_str(&self.source[chunk_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    text.push_str(&self.source[chunk_start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut text)?;
                    chunk_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(Scalar {
            text,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_escape(&mut self, text: &mut String) -> Result<(), SyntaxError> {
        let Some(escaped) = self.source[self.pos..].chars().next() else {
            return Err(SyntaxError::new(self.pos, "unterminated escape"));
        };
        self.pos += escaped.len_utf8();
        match escaped {
            'n' => text.push('\n'),
            't' => text.push('\t'),
            'r' => text.push('\r'),
            'U' => match self.hex_unit(self.pos) {
                Some(unit) => {
                    self.pos += 4;
                    let mut units = vec![unit];
                    // a high surrogate pairs with an immediately following \U low surrogate
                    if (0xD800..0xDC00).contains(&unit)
                        && self.starts_with("\\U")
                        && let Some(low) = self.hex_unit(self.pos + 2)
                        && (0xDC00..0xE000).contains(&low)
                    {
                        units.push(low);
                        self.pos += 6;
                    }
                    text.extend(
                        char::decode_utf16(units)
                            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
                    );
                }
                None => text.push('U'),
            },
            other => text.push(other),
        }
        Ok(())
    }

    /// UTF-16 code unit written as four hex digits at `at`.
    fn hex_unit(&self, at: usize) -> Option<u16> {
        let hex = self.source.get(at..at + 4)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u16::from_str_radix(hex, 16).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_header_and_nested_values() {
        let source = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objects = {
		ABC /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				LD_RUNPATH_SEARCH_PATHS = (
					"$(inherited)",
					"@executable_path/Frameworks",
				);
				PRODUCT_NAME = "My App";
			};
			name = Debug;
		};
	};
	rootObject = XYZ /* Project object */;
}
"#;
        let root = parse(source).unwrap();
        assert_eq!(root.get_str("archiveVersion"), Some("1"));
        assert!(root.get_dict("classes").unwrap().entries.is_empty());
        assert_eq!(root.get_str("rootObject"), Some("XYZ"));

        let objects = root.get_dict("objects").unwrap();
        let entry = objects.entry("ABC").unwrap();
        assert_eq!(entry.annotation.as_deref(), Some("Debug"));

        let object = entry.value.as_dict().unwrap();
        assert_eq!(object.get_str("isa"), Some("XCBuildConfiguration"));
        let settings = object.get_dict("buildSettings").unwrap();
        assert_eq!(settings.get_str("PRODUCT_NAME"), Some("My App"));
        match settings.get("LD_RUNPATH_SEARCH_PATHS").unwrap() {
            Value::Array(array) => {
                assert_eq!(array.items.len(), 2);
                assert_eq!(array.items[0].as_str(), Some("$(inherited)"));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_spans_point_at_raw_tokens() {
        let source = "{ a = \"1.0\"; b = {}; }";
        let root = parse(source).unwrap();
        assert_eq!(root.span, Span::new(0, source.len()));
        let a = root.get("a").unwrap().span();
        assert_eq!(&source[a.start..a.end], "\"1.0\"");
        let b = root.get_dict("b").unwrap();
        assert_eq!(&source[b.span.start..b.span.end], "{}");
        assert_eq!(&source[b.close_offset()..b.span.end], "}");
    }

    #[rstest]
    #[case(r#"{ a = "x\"y"; }"#, "x\"y")]
    #[case(r#"{ a = "line\nbreak"; }"#, "line\nbreak")]
    #[case(r#"{ a = "back\\slash"; }"#, "back\\slash")]
    #[case(r#"{ a = "\U00e9t\U00e9"; }"#, "été")]
    #[case(r#"{ a = "\UD83D\UDE00 smile"; }"#, "\u{1F600} smile")]
    #[case(r#"{ a = "\UD83Dx"; }"#, "\u{FFFD}x")]
    #[case(r#"{ a = "\Uzz"; }"#, "Uzz")]
    #[case(r#"{ a = ""; }"#, "")]
    #[case("{ a = \"unicode ✓\"; }", "unicode ✓")]
    #[case("{ a = path/to/file.m; }", "path/to/file.m")]
    fn test_parse_string_forms(#[case] source: &str, #[case] expected: &str) {
        let root = parse(source).unwrap();
        assert_eq!(root.get_str("a"), Some(expected));
    }

    #[test]
    fn test_parse_inline_object_and_trailing_comment() {
        let source = "{\n\tobjects = {\n\t\tF1 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = F2 /* main.m */; };\n\t};\n}\n";
        let root = parse(source).unwrap();
        let objects = root.get_dict("objects").unwrap();
        let entry = objects.entry("F1").unwrap();
        assert_eq!(entry.annotation.as_deref(), Some("main.m in Sources"));
        assert_eq!(
            entry.value.as_dict().unwrap().get_str("fileRef"),
            Some("F2")
        );
    }

    #[rstest]
    #[case("", "empty document")]
    #[case("( a )", "expected '{' at top level")]
    #[case("{ a = 1 }", "expected ';'")]
    #[case("{ a = 1;", "unterminated dictionary")]
    #[case("{ a = \"open; }", "unterminated string")]
    #[case("{ a = (1 2); }", "expected ',' or ')'")]
    #[case("{ a /* open = 1; }", "unterminated comment")]
    #[case("{ a = 1; } extra", "unexpected content")]
    #[case("{ = 1; }", "expected string")]
    fn test_parse_errors(#[case] source: &str, #[case] message: &str) {
        let err = parse(source).unwrap_err();
        assert!(
            err.message.contains(message),
            "{:?} does not contain {message}",
            err.message
        );
    }

    #[rstest]
    #[case("abc", 0, (1, 1))]
    #[case("abc", 2, (1, 3))]
    #[case("a\nbc", 3, (2, 2))]
    #[case("a\n\nb", 3, (3, 1))]
    fn test_line_column(#[case] source: &str, #[case] offset: usize, #[case] expected: (usize, usize)) {
        assert_eq!(line_column(source, offset), expected);
    }
}
