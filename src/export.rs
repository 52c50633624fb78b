//! Printable HTML rendering of a reviewed record.
//!
//! The output is a static page meant for the browser's print dialog
//! ("Save as PDF"). Every value is escaped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ExtractedRecord, Gender, RecordField};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
    Mr,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::En => "Extracted Document Information",
            Self::Hi => "निकाली गई दस्तावेज़ जानकारी",
            Self::Mr => "काढलेली दस्तऐवज माहिती",
        }
    }

    fn generated_on(self) -> &'static str {
        match self {
            Self::En => "Generated on",
            Self::Hi => "तैयार करने की तिथि",
            Self::Mr => "तयार केल्याची तारीख",
        }
    }

    /// Display label of a record field.
    pub fn label(self, field: RecordField) -> &'static str {
        use RecordField as F;
        match (self, field) {
            (Self::En, F::Name) => "Full Name",
            (Self::En, F::FatherName) => "Father's Name",
            (Self::En, F::DateOfBirth) => "Date of Birth",
            (Self::En, F::Gender) => "Gender",
            (Self::En, F::Address) => "Address",
            (Self::En, F::District) => "District",
            (Self::En, F::State) => "State",
            (Self::En, F::Pincode) => "PIN Code",
            (Self::En, F::AadhaarNumber) => "Aadhaar Number",
            (Self::En, F::PanNumber) => "PAN Number",
            (Self::En, F::VoterIdNumber) => "Voter ID Number",
            (Self::En, F::DrivingLicenseNumber) => "Driving License Number",

            (Self::Hi, F::Name) => "पूरा नाम",
            (Self::Hi, F::FatherName) => "पिता का नाम",
            (Self::Hi, F::DateOfBirth) => "जन्म तिथि",
            (Self::Hi, F::Gender) => "लिंग",
            (Self::Hi, F::Address) => "पता",
            (Self::Hi, F::District) => "जिला",
            (Self::Hi, F::State) => "राज्य",
            (Self::Hi, F::Pincode) => "पिन कोड",
            (Self::Hi, F::AadhaarNumber) => "आधार नंबर",
            (Self::Hi, F::PanNumber) => "पैन नंबर",
            (Self::Hi, F::VoterIdNumber) => "वोटर आईडी नंबर",
            (Self::Hi, F::DrivingLicenseNumber) => "ड्राइविंग लाइसेंस नंबर",

            (Self::Mr, F::Name) => "पूर्ण नाव",
            (Self::Mr, F::FatherName) => "वडिलांचे नाव",
            (Self::Mr, F::DateOfBirth) => "जन्मतारीख",
            (Self::Mr, F::Gender) => "लिंग",
            (Self::Mr, F::Address) => "पत्ता",
            (Self::Mr, F::District) => "जिल्हा",
            (Self::Mr, F::State) => "राज्य",
            (Self::Mr, F::Pincode) => "पिन कोड",
            (Self::Mr, F::AadhaarNumber) => "आधार क्रमांक",
            (Self::Mr, F::PanNumber) => "पॅन क्रमांक",
            (Self::Mr, F::VoterIdNumber) => "मतदार ओळखपत्र क्रमांक",
            (Self::Mr, F::DrivingLicenseNumber) => "वाहन चालक परवाना क्रमांक",
        }
    }

    pub fn gender(self, gender: Gender) -> &'static str {
        match (self, gender) {
            (Self::En, Gender::Male) => "Male",
            (Self::En, Gender::Female) => "Female",
            (Self::En, Gender::Other) => "Other",
            (Self::Hi, Gender::Male) => "पुरुष",
            (Self::Hi, Gender::Female) => "महिला",
            (Self::Hi, Gender::Other) => "अन्य",
            (Self::Mr, Gender::Male) => "पुरुष",
            (Self::Mr, Gender::Female) => "स्त्री",
            (Self::Mr, Gender::Other) => "इतर",
        }
    }
}

const FOOTER: &str = "This document was generated by AI-Powered Form Filling Assistant";

/// Render `record` as a print-ready HTML page. Absent fields get no row.
pub fn render_print_html(record: &ExtractedRecord, locale: Locale, generated: NaiveDate) -> String {
    let rows = RecordField::ALL
        .iter()
        .filter_map(|&field| {
            let value = match field {
                RecordField::Gender => record.gender.map(|g| locale.gender(g))?,
                _ => record.get(field)?,
            };
            Some(format!(
                r#"<div class="field"><span class="label">{label}</span><span class="value">{value}</span></div>"#,
                label = html_escape(locale.label(field)),
                value = html_escape(value),
            ))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; padding: 40px; max-width: 800px; margin: 0 auto; }}
h1 {{ color: #333; border-bottom: 2px solid #4f46e5; padding-bottom: 10px; }}
.field {{ display: flex; justify-content: space-between; padding: 12px 0; border-bottom: 1px solid #eee; }}
.label {{ color: #666; font-weight: 500; }}
.value {{ color: #333; font-weight: 600; text-align: right; max-width: 60%; }}
.header {{ text-align: center; margin-bottom: 30px; }}
.date {{ color: #888; font-size: 12px; margin-top: 5px; }}
.footer {{ margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; text-align: center; color: #888; font-size: 12px; }}
</style>
</head>
<body>
<div class="header">
<h1>{title}</h1>
<p class="date">{generated_label}: {date}</p>
</div>
{rows}
<div class="footer">
<p>{footer}</p>
</div>
</body>
</html>"#,
        lang = locale.code(),
        title = html_escape(locale.title()),
        generated_label = html_escape(locale.generated_on()),
        date = generated.format("%A, %-d %B %Y"),
        rows = rows,
        footer = FOOTER,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn renders_present_fields_only() {
        let record = ExtractedRecord {
            name: Some("Asha Verma".into()),
            pan_number: Some("ABCDE1234F".into()),
            driving_license_number: Some("MH1220110012345".into()),
            ..Default::default()
        };
        let html = render_print_html(&record, Locale::En, date());

        assert!(html.contains("<span class=\"label\">Full Name</span><span class=\"value\">Asha Verma</span>"));
        assert!(html.contains("PAN Number"));
        assert!(html.contains("Driving License Number"));
        assert!(!html.contains("Father's Name"));
        assert!(html.contains("Friday, 15 March 2024"));
        assert!(html.contains(FOOTER));
    }

    #[test]
    fn escapes_values() {
        let record = ExtractedRecord {
            address: Some("<script>alert('x')</script> & Co".into()),
            ..Default::default()
        };
        let html = render_print_html(&record, Locale::En, date());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; Co"));
    }

    #[test]
    fn localizes_labels_and_gender() {
        let record = ExtractedRecord {
            name: Some("Sunil".into()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let hi = render_print_html(&record, Locale::Hi, date());
        assert!(hi.contains("पूरा नाम"));
        assert!(hi.contains("महिला"));
        assert!(hi.contains("lang=\"hi\""));

        let mr = render_print_html(&record, Locale::Mr, date());
        assert!(mr.contains("पूर्ण नाव"));
        assert!(mr.contains("स्त्री"));
    }

    #[test]
    fn locale_deserializes_from_code() {
        let locale: Locale = serde_json::from_str("\"mr\"").unwrap();
        assert_eq!(locale, Locale::Mr);
        assert_eq!(Locale::default(), Locale::En);
    }
}
