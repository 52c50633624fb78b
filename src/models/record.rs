//! The extracted-fields record shared by the OCR engine, the merge engine
//! and the review form.

use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{Gender, InvalidEnumValue, RecordField};

/// Personal data read off one or more identity documents.
///
/// Every field is independently optional. Deserialization is lenient because
/// the OCR model is: numbers are accepted for string fields, unknown gender
/// values are dropped, and confidence is clamped to [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub aadhaar_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub pan_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub voter_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub driving_license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_confidence")]
    pub confidence: Option<f64>,
}

impl ExtractedRecord {
    /// Value of a field, `None` when absent or blank.
    pub fn get(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::Name => self.name.as_deref(),
            RecordField::FatherName => self.father_name.as_deref(),
            RecordField::DateOfBirth => self.date_of_birth.as_deref(),
            RecordField::Gender => self.gender.as_ref().map(Gender::as_str),
            RecordField::Address => self.address.as_deref(),
            RecordField::District => self.district.as_deref(),
            RecordField::State => self.state.as_deref(),
            RecordField::Pincode => self.pincode.as_deref(),
            RecordField::AadhaarNumber => self.aadhaar_number.as_deref(),
            RecordField::PanNumber => self.pan_number.as_deref(),
            RecordField::VoterIdNumber => self.voter_id_number.as_deref(),
            RecordField::DrivingLicenseNumber => self.driving_license_number.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Whether the field holds a non-blank value.
    pub fn has(&self, field: RecordField) -> bool {
        self.get(field).is_some()
    }

    /// Set a field. Blank values clear it; gender must name a known variant.
    pub fn set(&mut self, field: RecordField, value: Option<String>) -> Result<(), InvalidEnumValue> {
        let value = value.filter(|v| !v.trim().is_empty());
        let slot = match field {
            RecordField::Gender => {
                self.gender = match value {
                    Some(v) => Some(Gender::parse_lenient(&v).ok_or(InvalidEnumValue {
                        field: "Gender".into(),
                        value: v,
                    })?),
                    None => None,
                };
                return Ok(());
            }
            RecordField::Name => &mut self.name,
            RecordField::FatherName => &mut self.father_name,
            RecordField::DateOfBirth => &mut self.date_of_birth,
            RecordField::Address => &mut self.address,
            RecordField::District => &mut self.district,
            RecordField::State => &mut self.state,
            RecordField::Pincode => &mut self.pincode,
            RecordField::AadhaarNumber => &mut self.aadhaar_number,
            RecordField::PanNumber => &mut self.pan_number,
            RecordField::VoterIdNumber => &mut self.voter_id_number,
            RecordField::DrivingLicenseNumber => &mut self.driving_license_number,
        };
        *slot = value;
        Ok(())
    }

    /// Copy `field` from `other` verbatim, including absence.
    pub fn copy_field_from(&mut self, other: &ExtractedRecord, field: RecordField) {
        if field == RecordField::Gender {
            self.gender = other.gender;
            return;
        }
        // Non-gender fields accept any string, so this cannot fail.
        let _ = self.set(field, other.get(field).map(str::to_string));
    }

    /// Confidence, treating zero as "not reported".
    pub fn reported_confidence(&self) -> Option<f64> {
        self.confidence.filter(|c| *c > 0.0)
    }

    /// True when no text field holds a value. Confidence alone does not count.
    pub fn is_empty(&self) -> bool {
        RecordField::ALL.iter().all(|f| !self.has(*f))
    }

    /// Names of the fields that hold a value, for logging.
    pub fn present_fields(&self) -> Vec<&'static str> {
        RecordField::ALL
            .iter()
            .filter(|f| self.has(**f))
            .map(|f| f.as_str())
            .collect()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(Gender::parse_lenient))
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let raw = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw.filter(|c| c.is_finite()).map(|c| c.clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let record: ExtractedRecord = serde_json::from_str(
            r#"{"name":"Asha Devi","fatherName":"Ram Prasad","aadhaarNumber":"1234 5678 9012","confidence":0.92}"#,
        )
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("Asha Devi"));
        assert_eq!(record.father_name.as_deref(), Some("Ram Prasad"));
        assert_eq!(record.aadhaar_number.as_deref(), Some("1234 5678 9012"));
        assert_eq!(record.confidence, Some(0.92));
    }

    #[test]
    fn numbers_accepted_for_string_fields() {
        let record: ExtractedRecord =
            serde_json::from_str(r#"{"pincode":411001,"aadhaarNumber":123456789012}"#).unwrap();
        assert_eq!(record.pincode.as_deref(), Some("411001"));
        assert_eq!(record.aadhaar_number.as_deref(), Some("123456789012"));
    }

    #[test]
    fn unknown_gender_and_nulls_dropped() {
        let record: ExtractedRecord =
            serde_json::from_str(r#"{"gender":"M/F","name":null,"state":"  "}"#).unwrap();
        assert!(record.gender.is_none());
        assert!(record.name.is_none());
        assert!(record.state.is_none());
    }

    #[test]
    fn gender_case_insensitive() {
        let record: ExtractedRecord = serde_json::from_str(r#"{"gender":"Female"}"#).unwrap();
        assert_eq!(record.gender, Some(Gender::Female));
    }

    #[test]
    fn confidence_clamped_and_string_tolerated() {
        let high: ExtractedRecord = serde_json::from_str(r#"{"confidence":1.7}"#).unwrap();
        assert_eq!(high.confidence, Some(1.0));
        let text: ExtractedRecord = serde_json::from_str(r#"{"confidence":"0.5"}"#).unwrap();
        assert_eq!(text.confidence, Some(0.5));
    }

    #[test]
    fn serializes_without_absent_fields() {
        let record = ExtractedRecord {
            pan_number: Some("ABCDE1234F".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"panNumber":"ABCDE1234F"}"#);
    }

    #[test]
    fn blank_values_count_as_absent() {
        let record = ExtractedRecord {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert!(!record.has(RecordField::Name));
        assert!(record.is_empty());
    }

    #[test]
    fn set_clears_on_blank_and_validates_gender() {
        let mut record = ExtractedRecord::default();
        record.set(RecordField::District, Some("Pune".into())).unwrap();
        assert_eq!(record.get(RecordField::District), Some("Pune"));
        record.set(RecordField::District, Some(String::new())).unwrap();
        assert!(record.district.is_none());

        record.set(RecordField::Gender, Some("male".into())).unwrap();
        assert_eq!(record.gender, Some(Gender::Male));
        assert!(record.set(RecordField::Gender, Some("x".into())).is_err());
    }

    #[test]
    fn zero_confidence_not_reported() {
        let record = ExtractedRecord {
            confidence: Some(0.0),
            ..Default::default()
        };
        assert_eq!(record.reported_confidence(), None);
    }

    #[test]
    fn confidence_alone_is_empty() {
        let record = ExtractedRecord {
            confidence: Some(0.8),
            ..Default::default()
        };
        assert!(record.is_empty());
        assert!(record.present_fields().is_empty());
    }
}
