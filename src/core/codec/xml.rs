use quick_xml::{
    events::{
        BytesStart,
        Event,
    },
    Reader,
};

use crate::core::{
    models::{
        CanonicalResult,
        ConsonantCounts,
    },
    AnalyzerError,
};

const SLOW_BIKE_COUNT: &str = "slowBikeCount";
const CONSONANT: &str = "consonant";
const LETTER: &str = "letter";
const COUNT: &str = "count";

/// An open element on the reader's path from the root.
#[derive(Debug)]
struct Frame {
    name: String,
    text: String,
    /// Index into [`Collector::consonants`] when this element is a consonant.
    consonant: Option<usize>,
    /// Set on the first `slowBikeCount` element in document order.
    slow_bike_count: bool,
}

impl Frame {
    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Fields of one `consonant` element. Child elements win over attributes.
#[derive(Debug, Default)]
struct ConsonantFields {
    letter: Option<String>,
    count: Option<String>,
    letter_attribute: Option<String>,
    count_attribute: Option<String>,
}

impl ConsonantFields {
    fn letter(&self) -> Option<&str> {
        self.letter.as_deref().or(self.letter_attribute.as_deref())
    }

    fn count(&self) -> Option<&str> {
        self.count.as_deref().or(self.count_attribute.as_deref())
    }
}

/// Streams reader events and keeps only the fields the result needs. Nothing
/// is retained per element beyond the open path, so nesting depth costs heap,
/// not stack.
#[derive(Debug, Default)]
struct Collector {
    path: Vec<Frame>,
    root_closed: bool,
    slow_bike_count: Option<String>,
    slow_bike_count_claimed: bool,
    consonants: Vec<ConsonantFields>,
}

impl Collector {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), AnalyzerError> {
        if self.root_closed {
            return Err(AnalyzerError::malformed("content after the root element"));
        }

        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let attributes = read_attributes(start)?;
        let mut frame =
            Frame { name, text: String::new(), consonant: None, slow_bike_count: false };

        if frame.is(CONSONANT) {
            let find = |wanted: &str| {
                attributes
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
                    .map(|(_, value)| value.clone())
            };
            self.consonants.push(ConsonantFields {
                letter_attribute: find(LETTER),
                count_attribute: find(COUNT),
                ..Default::default()
            });
            frame.consonant = Some(self.consonants.len() - 1);
        } else if frame.is(SLOW_BIKE_COUNT) && !self.slow_bike_count_claimed {
            self.slow_bike_count_claimed = true;
            frame.slow_bike_count = true;
        }

        self.path.push(frame);
        Ok(())
    }

    fn close(&mut self) -> Result<(), AnalyzerError> {
        let frame =
            self.path.pop().ok_or_else(|| AnalyzerError::malformed("unexpected closing tag"))?;

        if self.path.is_empty() {
            self.root_closed = true;
        }

        if frame.slow_bike_count {
            self.slow_bike_count = Some(frame.text);
            return Ok(());
        }

        let parent = self.path.last().and_then(|parent| parent.consonant);
        if let Some(fields) = parent.and_then(|index| self.consonants.get_mut(index)) {
            let slot = if frame.is(LETTER) {
                Some(&mut fields.letter)
            } else if frame.is(COUNT) {
                Some(&mut fields.count)
            } else {
                None
            };
            if let Some(slot) = slot.filter(|slot| slot.is_none()) {
                *slot = Some(frame.text.trim().to_string());
            }
        }

        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), AnalyzerError> {
        match self.path.last_mut() {
            Some(frame) => {
                frame.text.push_str(content);
                Ok(())
            }
            None if content.trim().is_empty() => Ok(()),
            None => Err(AnalyzerError::malformed("text outside the root element")),
        }
    }

    fn finish(self) -> Result<CanonicalResult, AnalyzerError> {
        if !self.path.is_empty() {
            return Err(AnalyzerError::malformed("unclosed XML element"));
        }
        if !self.root_closed {
            return Err(AnalyzerError::malformed("XML document has no root element"));
        }

        let slow_bike_count = self.slow_bike_count.as_deref().map(parse_count).unwrap_or(0);

        let mut consonant_counts = ConsonantCounts::new();
        for consonant in &self.consonants {
            let Some(letter) = consonant.letter().filter(|letter| !letter.is_empty()) else {
                continue;
            };
            consonant_counts.insert(letter, consonant.count().map(parse_count).unwrap_or(0));
        }

        Ok(CanonicalResult { slow_bike_count, consonant_counts })
    }
}

pub(super) fn decode(text: &str) -> Result<CanonicalResult, AnalyzerError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut collector = Collector::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            AnalyzerError::malformed(format!("XML error at {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(start) => collector.open(&start)?,
            Event::Empty(start) => {
                collector.open(&start)?;
                collector.close()?;
            }
            Event::End(_) => collector.close()?,
            Event::Text(content) => {
                let content =
                    content.unescape().map_err(|e| AnalyzerError::malformed(e.to_string()))?;
                collector.text(&content)?;
            }
            Event::CData(content) => {
                let content = content.into_inner();
                collector.text(&String::from_utf8_lossy(&content))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    collector.finish()
}

fn read_attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, AnalyzerError> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| AnalyzerError::malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| AnalyzerError::malformed(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn parse_count(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}
