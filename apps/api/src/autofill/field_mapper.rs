//! Field mapper — assigns profile values to form controls by keyword matching.
//!
//! Each control's name, id, placeholder and label are joined and tested against
//! keyword sets in a fixed priority order. The first set that matches decides
//! the profile attribute; a control never maps to more than one attribute.

use serde::{Deserialize, Serialize};

use crate::models::page::{FieldDescriptor, FieldKind};
use crate::models::profile::ProfileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileAttribute {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    AddressLine2,
    AddressLine1,
    City,
    State,
    PostalCode,
    Country,
    GithubUrl,
    LinkedinUrl,
    PortfolioUrl,
    FullName,
}

impl ProfileAttribute {
    pub fn value_from(&self, profile: &ProfileRecord) -> String {
        match self {
            ProfileAttribute::FirstName => profile.first_name.clone(),
            ProfileAttribute::LastName => profile.last_name.clone(),
            ProfileAttribute::Email => profile.email.clone(),
            ProfileAttribute::PhoneNumber => profile.phone_number.clone(),
            ProfileAttribute::AddressLine2 => profile.address_line2.clone(),
            ProfileAttribute::AddressLine1 => profile.address_line1.clone(),
            ProfileAttribute::City => profile.city.clone(),
            ProfileAttribute::State => profile.state.clone(),
            ProfileAttribute::PostalCode => profile.postal_code.clone(),
            ProfileAttribute::Country => profile.country.clone(),
            ProfileAttribute::GithubUrl => profile.github_url.clone(),
            ProfileAttribute::LinkedinUrl => profile.linkedin_url.clone(),
            ProfileAttribute::PortfolioUrl => profile.portfolio_url.clone(),
            ProfileAttribute::FullName => profile.full_name(),
        }
    }
}

/// Keyword sets in priority order. Address line 2 precedes line 1 because
/// "address2" also contains "address".
pub const KEYWORD_SETS: &[(ProfileAttribute, &[&str])] = &[
    (ProfileAttribute::FirstName, &["first", "fname", "given"]),
    (ProfileAttribute::LastName, &["last", "surname", "lname", "family"]),
    (ProfileAttribute::Email, &["email", "mail"]),
    (ProfileAttribute::PhoneNumber, &["phone", "tel", "mobile"]),
    (
        ProfileAttribute::AddressLine2,
        &["address2", "address line 2", "apt", "suite"],
    ),
    (
        ProfileAttribute::AddressLine1,
        &["address", "street", "address1", "addr"],
    ),
    (ProfileAttribute::City, &["city", "town"]),
    (ProfileAttribute::State, &["state", "province", "region"]),
    (ProfileAttribute::PostalCode, &["zip", "postal", "postcode"]),
    (ProfileAttribute::Country, &["country", "nation"]),
    (ProfileAttribute::GithubUrl, &["github"]),
    (ProfileAttribute::LinkedinUrl, &["linkedin"]),
    (
        ProfileAttribute::PortfolioUrl,
        &["portfolio", "website", "personal"],
    ),
    (
        ProfileAttribute::FullName,
        &["fullname", "full name", "full_name", "legal name", "your name"],
    ),
];

/// Input types that never receive a typed value.
const UNFILLABLE_INPUT_TYPES: &[&str] = &[
    "file", "submit", "button", "hidden", "checkbox", "radio", "image", "reset",
];

/// Notifications the host dispatches on a control after assigning its value,
/// so page listeners (React, Angular, ...) observe the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticEvent {
    Input,
    Change,
    Blur,
}

pub const DISPATCHED_EVENTS: [SyntheticEvent; 3] = [
    SyntheticEvent::Input,
    SyntheticEvent::Change,
    SyntheticEvent::Blur,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAssignment {
    /// Position of the control in the submitted field list.
    pub field_index: usize,
    pub attribute: ProfileAttribute,
    pub value: String,
    pub events: Vec<SyntheticEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillPlan {
    pub assignments: Vec<FieldAssignment>,
    pub filled_count: usize,
    /// Transient confirmation text; absent when nothing was filled.
    pub notification: Option<String>,
}

#[cfg(test)]
impl FillPlan {
    /// Writes the planned values into `fields`, as the host would on the live DOM.
    pub fn apply(&self, fields: &mut [FieldDescriptor]) {
        for assignment in &self.assignments {
            if let Some(field) = fields.get_mut(assignment.field_index) {
                field.value = assignment.value.clone();
            }
        }
    }
}

/// The attribute whose keyword set first matches `identifier`.
pub fn match_attribute(identifier: &str) -> Option<ProfileAttribute> {
    KEYWORD_SETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| identifier.contains(k)))
        .map(|(attribute, _)| *attribute)
}

/// Value of the first option whose text or value contains `value`, case-insensitively.
pub fn match_option(field: &FieldDescriptor, value: &str) -> Option<String> {
    let needle = value.to_lowercase();
    field
        .options
        .iter()
        .find(|opt| {
            opt.text.to_lowercase().contains(&needle) || opt.value.to_lowercase().contains(&needle)
        })
        .map(|opt| opt.value.clone())
}

/// A control labelled just "name" asks for the whole name.
fn is_bare_name(field: &FieldDescriptor) -> bool {
    [&field.name, &field.id, &field.placeholder, &field.label]
        .iter()
        .any(|text| text.trim().eq_ignore_ascii_case("name"))
}

/// Keyword match on the control's identifier, falling back to the full name
/// for a bare "name" control.
pub fn match_field(field: &FieldDescriptor) -> Option<ProfileAttribute> {
    match_attribute(&field.identifier())
        .or_else(|| is_bare_name(field).then_some(ProfileAttribute::FullName))
}

fn is_fillable(field: &FieldDescriptor) -> bool {
    field.kind != FieldKind::Input
        || !UNFILLABLE_INPUT_TYPES
            .iter()
            .any(|t| field.input_type.eq_ignore_ascii_case(t))
}

/// Plans the autofill of `fields` from `profile`. Controls with no matching
/// keyword set, an empty profile value, or no matching select option are
/// skipped and not counted.
pub fn map_fields(fields: &[FieldDescriptor], profile: &ProfileRecord) -> FillPlan {
    let mut assignments = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        if !is_fillable(field) {
            continue;
        }
        let Some(attribute) = match_field(field) else {
            continue;
        };
        let value = attribute.value_from(profile);
        if value.is_empty() {
            continue;
        }
        let value = match field.kind {
            FieldKind::Select => match match_option(field, &value) {
                Some(option_value) => option_value,
                None => continue,
            },
            FieldKind::Input | FieldKind::Textarea => value,
        };

        assignments.push(FieldAssignment {
            field_index: index,
            attribute,
            value,
            events: DISPATCHED_EVENTS.to_vec(),
        });
    }

    let filled_count = assignments.len();
    FillPlan {
        assignments,
        filled_count,
        notification: fill_notification(filled_count),
    }
}

fn fill_notification(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("✓ Autofilled 1 field".to_string()),
        n => Some(format!("✓ Autofilled {n} fields")),
    }
}
