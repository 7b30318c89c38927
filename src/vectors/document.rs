use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{KatError, KatResult};

/// One child element of a vector record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue {
    /// Text content, `None` for an empty element
    pub text: Option<String>,
    /// Declared `format` attribute, if any
    pub format: Option<String>,
}

impl FieldValue {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            format: None,
        }
    }

    pub fn with_format(text: &str, format: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            format: Some(format.to_string()),
        }
    }
}

/// A single vector record: a named element whose children are its fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    name: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field insertion, mostly useful for tests
    pub fn field(mut self, tag: &str, value: FieldValue) -> Self {
        self.push_field(tag, value);
        self
    }

    pub fn push_field(&mut self, tag: &str, value: FieldValue) {
        self.fields.push((tag.to_string(), value));
    }

    /// The record's `name` attribute, e.g. `"AES:GCM test 3"`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First field with the given tag. Later duplicates are ignored.
    pub fn find(&self, tag: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_tag, _)| field_tag == tag)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(tag, _)| tag.as_str())
    }
}

/// Read and parse a vector document from disk
pub fn load_document<P: AsRef<Path>>(path: P) -> KatResult<Vec<Record>> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let records = parse_document(&xml)?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a vector document.
///
/// The root element holds one child per record; each record carries a `name`
/// attribute and one child element per field. Records are returned in
/// document order.
pub fn parse_document(xml: &str) -> KatResult<Vec<Record>> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut record: Option<Record> = None;
    let mut field: Option<(String, FieldValue)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                match depth {
                    1 => {}
                    2 => record = Some(record_from_start(&start)?),
                    3 => field = Some(field_from_start(&start)?),
                    _ => {
                        return Err(KatError::DocumentError(format!(
                            "unexpected nested element <{}> at position {}",
                            element_name(&start)?,
                            reader.buffer_position()
                        )))
                    }
                }
            }
            Event::Empty(start) => match depth + 1 {
                1 => {}
                2 => records.push(record_from_start(&start)?),
                3 => {
                    let (tag, value) = field_from_start(&start)?;
                    if let Some(record) = record.as_mut() {
                        record.push_field(&tag, value);
                    }
                }
                _ => {
                    return Err(KatError::DocumentError(format!(
                        "unexpected nested element <{}> at position {}",
                        element_name(&start)?,
                        reader.buffer_position()
                    )))
                }
            },
            Event::Text(text) => {
                if let Some((_, value)) = field.as_mut() {
                    let unescaped = text.unescape()?;
                    value
                        .text
                        .get_or_insert_with(String::new)
                        .push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some((_, value)) = field.as_mut() {
                    let raw = data.into_inner();
                    value
                        .text
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::End(_) => {
                match depth {
                    3 => {
                        if let (Some((tag, value)), Some(record)) = (field.take(), record.as_mut())
                        {
                            record.push_field(&tag, value);
                        }
                    }
                    2 => {
                        if let Some(record) = record.take() {
                            records.push(record);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

fn element_name(start: &BytesStart<'_>) -> KatResult<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| KatError::DocumentError(format!("element name is not UTF-8: {}", e)))
}

fn attribute(start: &BytesStart<'_>, name: &str) -> KatResult<Option<String>> {
    let attr = start
        .try_get_attribute(name)
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn record_from_start(start: &BytesStart<'_>) -> KatResult<Record> {
    match attribute(start, "name")? {
        Some(name) => Ok(Record::new(&name)),
        None => Err(KatError::DocumentError(format!(
            "record element <{}> has no name attribute",
            element_name(start)?
        ))),
    }
}

fn field_from_start(start: &BytesStart<'_>) -> KatResult<(String, FieldValue)> {
    let tag = element_name(start)?;
    let format = attribute(start, "format")?;
    Ok((tag, FieldValue { text: None, format }))
}
