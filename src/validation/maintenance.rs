//! Maintenance record rules

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::{coerce, FieldErrors};
use crate::models::{CompletionStatus, MaintenanceType, NewMaintenance, Priority};

pub const SELECT_EQUIPMENT: &str = "Please select equipment";

/// Raw maintenance form, every field still text
#[derive(Debug, Default, Validate)]
struct MaintenanceForm {
    #[validate(length(min = 1, message = "Please select equipment"))]
    equipment: String,
    #[validate(length(min = 2, message = "Tech must be at least 2 characters long"))]
    technician: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    description: String,
    maintenance_type: Option<String>,
    priority: String,
    completion_status: String,
}

pub fn validate_maintenance(
    input: &Value,
    today: NaiveDate,
) -> Result<NewMaintenance, FieldErrors> {
    let map = coerce::fields(input);
    let mut errors = FieldErrors::default();

    let mut text = |key: &str| match coerce::text(&map, key) {
        Ok(value) => value,
        Err(message) => {
            errors.add(key, message);
            String::new()
        }
    };
    let mut form = MaintenanceForm {
        equipment: text("equipment"),
        technician: text("technician"),
        description: text("description"),
        maintenance_type: None,
        priority: text("priority"),
        completion_status: text("completionStatus"),
    };
    match coerce::optional_text(&map, "type") {
        Ok(value) => form.maintenance_type = value,
        Err(message) => errors.add("type", message),
    }

    // Equipment is referenced by id.
    if !form.equipment.is_empty() && Uuid::parse_str(&form.equipment).is_err() {
        errors.add("equipment", SELECT_EQUIPMENT);
    }

    let date = coerce::date(&map, "date");
    match date {
        None => errors.add("date", coerce::INVALID_DATE),
        Some(date) if date > today => errors.add("date", "Date must be today or earlier"),
        _ => {}
    }

    let maintenance_type = match form.maintenance_type.as_deref() {
        None => None,
        Some(label) => {
            let parsed = MaintenanceType::from_label(label);
            if parsed.is_none() {
                errors.add("type", "Please select a maintenance type");
            }
            parsed
        }
    };

    let hours_spent = coerce::number(&map, "hoursSpent");
    match hours_spent {
        None => errors.add("hoursSpent", "Hours must be a number"),
        Some(hours) if hours < 1.0 => errors.add("hoursSpent", "Hours must be at least 1"),
        Some(hours) if hours > 24.0 => errors.add("hoursSpent", "Hours must be 24 or less"),
        _ => {}
    }

    let parts_replaced = coerce::part_list(&map, "partsReplaced").unwrap_or_else(|_| {
        errors.add("partsReplaced", "Parts must be a list of part names");
        Vec::new()
    });

    let priority = Priority::from_label(&form.priority);
    if priority.is_none() && !errors.contains("priority") {
        errors.add("priority", "Please select a priority");
    }

    let completion_status = CompletionStatus::from_label(&form.completion_status);
    if completion_status.is_none() && !errors.contains("completionStatus") {
        errors.add("completionStatus", "Please select a completion status");
    }

    if let Err(derived) = form.validate() {
        errors.absorb(derived);
    }

    match (date, hours_spent, priority, completion_status) {
        (Some(date), Some(hours_spent), Some(priority), Some(completion_status))
            if errors.is_empty() =>
        {
            Ok(NewMaintenance {
                equipment: form.equipment,
                date,
                maintenance_type,
                technician: form.technician,
                hours_spent,
                description: form.description,
                parts_replaced,
                priority,
                completion_status,
            })
        }
        _ => Err(errors),
    }
}
