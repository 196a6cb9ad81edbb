//! Contact card (VCF) parsing
//!
//! Only the handful of fields a person note needs are extracted: full name,
//! first telephone number, first email address and birthday. Everything
//! between cards, and any card without an `END:VCARD`, is ignored.

use serde::{Deserialize, Serialize};

const BEGIN_MARKER: &str = "BEGIN:VCARD";
const END_MARKER: &str = "END:VCARD";

/// Name used when a card has no `FN:` line
pub const UNKNOWN_NAME: &str = "Unknown";

/// One contact extracted from a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birthday: String,
}

impl Default for ContactRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            phone: String::new(),
            email: String::new(),
            birthday: String::new(),
        }
    }
}

impl ContactRecord {
    /// Extract a record from the text of a single card
    pub fn from_card(card: &str) -> Self {
        let mut name = None;
        let mut phone = None;
        let mut email = None;
        let mut birthday = None;

        for line in card.lines() {
            if name.is_none() {
                name = line.strip_prefix("FN:").map(clean);
            }
            if birthday.is_none() {
                birthday = line.strip_prefix("BDAY:").map(clean);
            }
            if phone.is_none() && line.starts_with("TEL") {
                phone = value_after_last_colon(line);
            }
            if email.is_none() && line.starts_with("EMAIL") {
                email = value_after_last_colon(line);
            }
        }

        let defaults = Self::default();
        Self {
            name: name.filter(|s| !s.is_empty()).unwrap_or(defaults.name),
            phone: phone.unwrap_or(defaults.phone),
            email: email.unwrap_or(defaults.email),
            birthday: birthday.unwrap_or(defaults.birthday),
        }
    }
}

fn clean(value: &str) -> String {
    value.trim().to_string()
}

// `TEL;TYPE=cell:555-1234` and `EMAIL;TYPE=INTERNET:jane@example.com`
fn value_after_last_colon(line: &str) -> Option<String> {
    line.rsplit_once(':').map(|(_, value)| clean(value))
}

/// Lazily parse every complete card in `text`.
///
/// The returned iterator can be cloned to restart from the same position;
/// calling this again on the same text yields the same records.
pub fn parse_records(text: &str) -> ContactRecords<'_> {
    ContactRecords { text, pos: 0 }
}

/// Iterator over the cards of a VCF text
#[derive(Debug, Clone)]
pub struct ContactRecords<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> ContactRecords<'t> {
    /// The next `BEGIN:VCARD ... END:VCARD` region, markers included
    fn next_card(&mut self) -> Option<&'t str> {
        let rest = &self.text[self.pos..];
        let begin = rest.find(BEGIN_MARKER)?;
        let body_start = begin + BEGIN_MARKER.len();
        let Some(end) = rest[body_start..].find(END_MARKER) else {
            self.pos = self.text.len();
            return None;
        };
        let card_end = body_start + end + END_MARKER.len();
        self.pos += card_end;
        Some(&rest[begin..card_end])
    }
}

impl Iterator for ContactRecords<'_> {
    type Item = ContactRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_card().map(ContactRecord::from_card)
    }
}

impl std::iter::FusedIterator for ContactRecords<'_> {}
