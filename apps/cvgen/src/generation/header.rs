//! Header block: photo, name, tagline, address, contact line, languages, and the
//! optional executive summary.
//!
//! Everything except the tagline and the summary is the same for every version,
//! so it is computed once into a `PersonalHeader` and reused across builds.

use crate::generation::content_selector::select_variant;
use crate::generation::markdown::{join_inline, Block, MarkdownDoc};
use crate::models::{Contact, PersonalInfo};
use crate::versions::VersionProfile;

pub const PHONE_GLYPH: &str = "📞";
pub const EMAIL_GLYPH: &str = "✉️";
pub const CODE_HOST_GLYPH: &str = "🔗";
pub const NETWORK_GLYPH: &str = "💼";

const CONTACT_SEPARATOR: &str = " | ";

/// Version-independent part of the header.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalHeader {
    pub name: String,
    pub photo: Option<String>,
    pub address: Option<String>,
    pub contact_line: Option<String>,
    pub languages_line: Option<String>,
}

impl PersonalHeader {
    pub fn from_personal(personal: &PersonalInfo) -> Self {
        let languages: Vec<String> = personal
            .languages
            .iter()
            .map(|l| format!("{} ({})", l.language, l.proficiency))
            .collect();

        Self {
            name: personal.name.full.clone(),
            photo: non_empty(personal.profile_photo.as_deref()),
            address: non_empty(personal.contact.address.as_deref()),
            contact_line: contact_line(&personal.contact, &personal.name.full),
            languages_line: (!languages.is_empty()).then(|| join_inline(&languages)),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `📞 phone | ✉️ [email](mailto:email) | 🔗 [handle](…) | 💼 [Name](…)`, skipping absent channels.
fn contact_line(contact: &Contact, display_name: &str) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(phone) = non_empty(contact.phone.as_deref()) {
        parts.push(format!("{PHONE_GLYPH} {phone}"));
    }
    if let Some(email) = non_empty(contact.email.as_deref()) {
        parts.push(format!("{EMAIL_GLYPH} [{email}](mailto:{email})"));
    }
    if let Some(handle) = non_empty(contact.github.as_deref()) {
        parts.push(format!(
            "{CODE_HOST_GLYPH} [{handle}](https://github.com/{handle})"
        ));
    }
    if let Some(handle) = non_empty(contact.linkedin.as_deref()) {
        let label = if display_name.trim().is_empty() {
            handle.as_str()
        } else {
            display_name
        };
        parts.push(format!(
            "{NETWORK_GLYPH} [{label}](https://linkedin.com/in/{handle})"
        ));
    }
    (!parts.is_empty()).then(|| parts.join(CONTACT_SEPARATOR))
}

/// Per-version tagline, falling back to the profile's default.
pub fn resolve_tagline(personal: &PersonalInfo, profile: &VersionProfile) -> String {
    let tagline = select_variant(&personal.taglines, &profile.name);
    if tagline.trim().is_empty() {
        profile.tagline.clone()
    } else {
        tagline
    }
}

pub fn generate_header(
    header: &PersonalHeader,
    personal: &PersonalInfo,
    profile: &VersionProfile,
) -> String {
    let mut doc = MarkdownDoc::new();

    if let Some(photo) = &header.photo {
        doc.paragraph(Block::Image {
            alt: header.name.clone(),
            src: photo.clone(),
        });
    }
    doc.push(Block::Name(header.name.clone()));

    let tagline = resolve_tagline(personal, profile);
    if !tagline.is_empty() {
        doc.push(Block::Title(tagline));
    }
    doc.blank();

    if let Some(address) = &header.address {
        doc.paragraph(Block::Italic(address.clone()));
    }
    if let Some(contact) = &header.contact_line {
        doc.paragraph(Block::Text(contact.clone()));
    }
    if let Some(languages) = &header.languages_line {
        doc.paragraph(Block::Bold {
            text: languages.clone(),
            suffix: String::new(),
        });
    }

    doc.render()
}

/// Summary paragraph, marked with `> ` so the enricher can recognize it without guessing.
/// Empty when the profile hides it or no variant exists for the version.
pub fn generate_executive_summary(personal: &PersonalInfo, profile: &VersionProfile) -> String {
    if !profile.show_executive_summary {
        return String::new();
    }
    let summary = select_variant(&personal.executive_summary, &profile.name);
    let summary = summary.trim();
    if summary.is_empty() {
        return String::new();
    }
    let mut doc = MarkdownDoc::new();
    doc.push(Block::Quote(summary.split_whitespace().collect::<Vec<_>>().join(" ")));
    doc.render()
}
