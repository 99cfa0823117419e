use chrono::{DateTime, Utc};

use crate::models::detection::CapturedFormData;
use crate::models::page::PageSnapshot;

/// Reads the values already typed into a form. Only named controls are read;
/// for each, the first applicable rule wins and later controls overwrite
/// earlier ones for the same slot.
pub fn capture_form_data(page: &PageSnapshot, now: DateTime<Utc>) -> CapturedFormData {
    let mut data = CapturedFormData {
        timestamp: now,
        ..Default::default()
    };

    for field in page.fields.iter().filter(|f| !f.name.is_empty()) {
        let name = field.name.to_lowercase();
        let placeholder = field.placeholder.to_lowercase();
        let identifier = format!("{name} {placeholder}");
        let value = field.value.trim().to_string();

        if field.is_input_of_type("email") || identifier.contains("email") {
            data.email = value;
        } else if name.contains("first") && (name.contains("name") || placeholder.contains("first"))
        {
            data.first_name = value;
        } else if name.contains("last") && (name.contains("name") || placeholder.contains("last")) {
            data.last_name = value;
        } else if field.is_input_of_type("tel")
            || identifier.contains("phone")
            || identifier.contains("mobile")
        {
            data.phone_number = value;
        }
    }

    data
}
