//! Fixed demonstration case: one employee, one flagged passport.
//!
//! Values are input data, not generated. The comparison logic is the only
//! behaviour here: a field mismatches when both sides carry a value and the
//! values differ, and is unverified when either side is missing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity fields as extracted from a document or held by HR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Full legal name
    pub full_name: String,
    /// Date of birth, display form
    pub date_of_birth: String,
    /// Document number, if known
    pub document_number: Option<String>,
    /// Document expiry, if known
    pub expiry_date: Option<String>,
    /// Nationality
    pub nationality: String,
}

impl IdentityRecord {
    fn value(&self, field: IdentityField) -> Option<&str> {
        match field {
            IdentityField::FullName => Some(self.full_name.as_str()),
            IdentityField::DateOfBirth => Some(self.date_of_birth.as_str()),
            IdentityField::DocumentNumber => self.document_number.as_deref(),
            IdentityField::ExpiryDate => self.expiry_date.as_deref(),
            IdentityField::Nationality => Some(self.nationality.as_str()),
        }
    }
}

/// Compared fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    /// "Full Name"
    FullName,
    /// "Date of birth"
    DateOfBirth,
    /// "Document number"
    DocumentNumber,
    /// "Expiry date"
    ExpiryDate,
    /// "Nationality"
    Nationality,
}

impl IdentityField {
    /// All fields in display order.
    pub const ALL: [IdentityField; 5] = [
        IdentityField::FullName,
        IdentityField::DateOfBirth,
        IdentityField::DocumentNumber,
        IdentityField::ExpiryDate,
        IdentityField::Nationality,
    ];

    /// Row label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            IdentityField::FullName => "Full Name",
            IdentityField::DateOfBirth => "Date of birth",
            IdentityField::DocumentNumber => "Document number",
            IdentityField::ExpiryDate => "Expiry date",
            IdentityField::Nationality => "Nationality",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparison result for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Same value on both sides
    Match,
    /// Different values
    Mismatch,
    /// Missing on at least one side
    Unverified,
}

/// One row of the data comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldComparison {
    /// Compared field
    pub field: IdentityField,
    /// Value extracted from the document
    pub extracted: Option<String>,
    /// Value held by HR
    pub hr_record: Option<String>,
    /// Outcome
    pub verdict: Verdict,
}

/// Kind of uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Passport
    Passport,
}

/// Uploaded document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Uploaded file name
    pub file_name: String,
    /// Document type
    pub kind: DocumentKind,
    /// Extraction confidence, percent
    pub confidence_pct: u8,
    /// Why verification flagged it
    pub flag_reason: String,
}

/// Everything the review page shows about the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    /// Employee under review
    pub employee_name: String,
    /// Flagged document
    pub document: DocumentInfo,
    /// Data read from the document
    pub extracted: IdentityRecord,
    /// Data held by HR
    pub hr_record: IdentityRecord,
    /// Reference shown once an override completes
    pub override_reference: String,
}

impl CaseFile {
    /// The demo case.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            employee_name: "Angela Zoe Test".to_string(),
            document: DocumentInfo {
                file_name: "passport_scan.pdf".to_string(),
                kind: DocumentKind::Passport,
                confidence_pct: 75,
                flag_reason: "Name does not match HR record".to_string(),
            },
            extracted: IdentityRecord {
                full_name: "Angela Zoe Test".to_string(),
                date_of_birth: "14 March 1988".to_string(),
                document_number: Some("1234567890".to_string()),
                expiry_date: Some("13 April 2028".to_string()),
                nationality: "United Kingdom".to_string(),
            },
            hr_record: IdentityRecord {
                full_name: "Angela Z. Smith".to_string(),
                date_of_birth: "14 March 1988".to_string(),
                document_number: None,
                expiry_date: None,
                nationality: "United Kingdom".to_string(),
            },
            override_reference: "VER-2026-1847".to_string(),
        }
    }

    /// Field-by-field comparison in display order.
    #[must_use]
    pub fn compare(&self) -> Vec<FieldComparison> {
        IdentityField::ALL
            .iter()
            .map(|&field| {
                let extracted = self.extracted.value(field);
                let hr = self.hr_record.value(field);
                let verdict = match (extracted, hr) {
                    (Some(a), Some(b)) if a == b => Verdict::Match,
                    (Some(_), Some(_)) => Verdict::Mismatch,
                    _ => Verdict::Unverified,
                };
                FieldComparison {
                    field,
                    extracted: extracted.map(str::to_string),
                    hr_record: hr.map(str::to_string),
                    verdict,
                }
            })
            .collect()
    }

    /// Only the mismatching rows.
    #[must_use]
    pub fn mismatches(&self) -> Vec<FieldComparison> {
        self.compare()
            .into_iter()
            .filter(|row| row.verdict == Verdict::Mismatch)
            .collect()
    }
}

/// Card shown in the pending task queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Card title
    pub title: String,
    /// Flag chip
    pub flag: String,
    /// One-line summary
    pub summary: String,
    /// Employee concerned
    pub employee_name: String,
}

impl QueueItem {
    /// Queue card for `case`.
    #[must_use]
    pub fn for_case(case: &CaseFile) -> Self {
        Self {
            title: "Passport verification required".to_string(),
            flag: "Mismatch".to_string(),
            summary: "Passport name does not match HR record".to_string(),
            employee_name: case.employee_name.clone(),
        }
    }
}
