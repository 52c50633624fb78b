use serde::{Deserialize, Serialize};

/// Returned when a wire string does not name any variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnumValue {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentClass {
    Aadhaar => "aadhaar",
    Pan => "pan",
    VoterId => "voterId",
    DrivingLicense => "drivingLicense",
    Other => "other",
});

str_enum!(ExtractionMode {
    Full => "full",
    PanOnly => "pan_only",
    VoterOnly => "voter_only",
    DlOnly => "dl_only",
});

str_enum!(DocumentStatus {
    Uploading => "uploading",
    Processing => "processing",
    Completed => "completed",
    Error => "error",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(RecordField {
    Name => "name",
    FatherName => "fatherName",
    DateOfBirth => "dateOfBirth",
    Gender => "gender",
    Address => "address",
    District => "district",
    State => "state",
    Pincode => "pincode",
    AadhaarNumber => "aadhaarNumber",
    PanNumber => "panNumber",
    VoterIdNumber => "voterIdNumber",
    DrivingLicenseNumber => "drivingLicenseNumber",
});

impl RecordField {
    /// Every text field of a record, in display order.
    pub const ALL: [RecordField; 12] = [
        Self::Name,
        Self::FatherName,
        Self::DateOfBirth,
        Self::Gender,
        Self::Address,
        Self::District,
        Self::State,
        Self::Pincode,
        Self::AadhaarNumber,
        Self::PanNumber,
        Self::VoterIdNumber,
        Self::DrivingLicenseNumber,
    ];

    /// Personal and address fields an Aadhaar card carries (front and back).
    pub const PERSONAL: [RecordField; 9] = [
        Self::Name,
        Self::FatherName,
        Self::DateOfBirth,
        Self::Gender,
        Self::Address,
        Self::District,
        Self::State,
        Self::Pincode,
        Self::AadhaarNumber,
    ];
}

impl Default for ExtractionMode {
    fn default() -> Self {
        Self::Full
    }
}

impl Gender {
    /// Lenient parse used for model output and form input ("Male", " FEMALE ").
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.trim().to_ascii_lowercase().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_class_round_trips_through_str() {
        for class in [
            DocumentClass::Aadhaar,
            DocumentClass::Pan,
            DocumentClass::VoterId,
            DocumentClass::DrivingLicense,
            DocumentClass::Other,
        ] {
            assert_eq!(class.as_str().parse::<DocumentClass>().unwrap(), class);
        }
    }

    #[test]
    fn extraction_mode_serializes_snake_case() {
        let json = serde_json::to_string(&ExtractionMode::PanOnly).unwrap();
        assert_eq!(json, "\"pan_only\"");
        let mode: ExtractionMode = serde_json::from_str("\"dl_only\"").unwrap();
        assert_eq!(mode, ExtractionMode::DlOnly);
    }

    #[test]
    fn document_class_serializes_camel_case() {
        let json = serde_json::to_string(&DocumentClass::DrivingLicense).unwrap();
        assert_eq!(json, "\"drivingLicense\"");
    }

    #[test]
    fn unknown_value_reports_enum_name() {
        let err = "passport".parse::<DocumentClass>().unwrap_err();
        assert_eq!(err.field, "DocumentClass");
        assert_eq!(err.value, "passport");
    }

    #[test]
    fn gender_lenient_parse() {
        assert_eq!(Gender::parse_lenient(" Male "), Some(Gender::Male));
        assert_eq!(Gender::parse_lenient("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::parse_lenient("unknown"), None);
    }

    #[test]
    fn default_mode_is_full() {
        assert_eq!(ExtractionMode::default(), ExtractionMode::Full);
    }
}
