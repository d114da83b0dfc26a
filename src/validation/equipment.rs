//! Equipment record rules

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use validator::Validate;

use super::{coerce, FieldErrors};
use crate::models::{Department, EquipmentStatus, NewEquipment};

static SERIAL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Raw equipment form, every field still text
#[derive(Debug, Default, Validate)]
struct EquipmentForm {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    name: String,
    location: String,
    department: String,
    model: String,
    #[validate(regex(path = *SERIAL_NUMBER, message = "Serial must be alphanumeric"))]
    serial_number: String,
    install_date: String,
    status: String,
}

pub fn validate_equipment(input: &Value, today: NaiveDate) -> Result<NewEquipment, FieldErrors> {
    let map = coerce::fields(input);
    let mut errors = FieldErrors::default();

    let mut text = |key: &str| match coerce::text(&map, key) {
        Ok(value) => value,
        Err(message) => {
            errors.add(key, message);
            String::new()
        }
    };
    let form = EquipmentForm {
        name: text("name"),
        location: text("location"),
        department: text("department"),
        model: text("model"),
        serial_number: text("serialNumber"),
        install_date: text("installDate"),
        status: text("status"),
    };

    let department = Department::from_label(&form.department);
    if department.is_none() && !errors.contains("department") {
        errors.add("department", "Please select a department");
    }

    let status = EquipmentStatus::from_label(&form.status);
    if status.is_none() && !errors.contains("status") {
        errors.add("status", "Please select a status");
    }

    let install_date = coerce::date(&map, "installDate");
    match install_date {
        None if !errors.contains("installDate") => {
            errors.add("installDate", coerce::INVALID_DATE)
        }
        Some(date) if date >= today => {
            errors.add("installDate", "Date must be yesterday or earlier")
        }
        _ => {}
    }

    if let Err(derived) = form.validate() {
        errors.absorb(derived);
    }

    match (department, status, install_date) {
        (Some(department), Some(status), Some(install_date)) if errors.is_empty() => {
            Ok(NewEquipment {
                name: form.name,
                location: form.location,
                department,
                model: form.model,
                serial_number: form.serial_number,
                install_date,
                status,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid() -> Value {
        json!({
            "name": "Press A",
            "location": "Bay 3",
            "department": "Machining",
            "model": "HX-200",
            "serialNumber": "SN12345",
            "installDate": "2021-04-01",
            "status": "Operational"
        })
    }

    fn only_field(input: Value, field: &str) {
        let errors = validate_equipment(&input, today()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field], "{}", errors);
    }

    #[test]
    fn accepts_a_complete_record() {
        let equipment = validate_equipment(&valid(), today()).unwrap();
        assert_eq!(
            equipment,
            NewEquipment {
                name: "Press A".into(),
                location: "Bay 3".into(),
                department: Department::Machining,
                model: "HX-200".into(),
                serial_number: "SN12345".into(),
                install_date: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
                status: EquipmentStatus::Operational,
            }
        );
    }

    #[test]
    fn short_name_names_only_name() {
        let mut input = valid();
        input["name"] = json!("Pr");
        only_field(input, "name");
    }

    #[test]
    fn serial_must_be_alphanumeric() {
        let mut input = valid();
        input["serialNumber"] = json!("SN-123");
        only_field(input.clone(), "serialNumber");
        input["serialNumber"] = json!("");
        only_field(input, "serialNumber");
    }

    #[test]
    fn numeric_serial_is_accepted() {
        let mut input = valid();
        input["serialNumber"] = json!(123456);
        assert_eq!(validate_equipment(&input, today()).unwrap().serial_number, "123456");
    }

    #[test]
    fn department_must_be_in_the_set() {
        let mut input = valid();
        input["department"] = json!("Department A");
        only_field(input, "department");
    }

    #[test]
    fn status_must_be_in_the_set() {
        let mut input = valid();
        input["status"] = json!("operational");
        let errors = validate_equipment(&input, today()).unwrap_err();
        assert_eq!(errors.messages("status"), ["Please select a status"]);
    }

    #[test]
    fn install_date_must_be_before_today() {
        let mut input = valid();
        input["installDate"] = json!("2024-06-15");
        only_field(input.clone(), "installDate");
        input["installDate"] = json!("2024-06-14");
        assert!(validate_equipment(&input, today()).is_ok());
    }

    #[test]
    fn unparseable_install_date_is_a_field_error() {
        let mut input = valid();
        input["installDate"] = json!("last tuesday");
        let errors = validate_equipment(&input, today()).unwrap_err();
        assert_eq!(errors.messages("installDate"), [coerce::INVALID_DATE]);
    }

    #[test]
    fn empty_form_flags_every_constrained_field() {
        let errors = validate_equipment(&json!({}), today()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec!["department", "installDate", "name", "serialNumber", "status"]
        );
    }

    #[test]
    fn structured_text_is_rejected_once() {
        let mut input = valid();
        input["name"] = json!(["Press", "A"]);
        let errors = validate_equipment(&input, today()).unwrap_err();
        assert_eq!(errors.messages("name"), [coerce::EXPECTED_TEXT]);
    }
}
