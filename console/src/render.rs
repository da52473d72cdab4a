//! Renders contract terms for review and preview.
//!
//! Section visibility is driven solely by the clause flags of the contract
//! being rendered; the same section templates back both the wizard preview
//! and the signing page.

use api::types::Contract;
use chrono::{DateTime, Utc};

pub const ABSENT_DATE: &str = "\u{2014}";

#[derive(Debug, Clone, PartialEq)]
pub struct TermsSection {
    pub heading: String,
    pub body: String,
}

impl TermsSection {
    fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// The full document a reviewing party sees, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsDocument {
    pub title: String,
    pub preamble: String,
    pub sections: Vec<TermsSection>,
}

impl TermsDocument {
    pub fn has_section(&self, heading: &str) -> bool {
        self.sections.iter().any(|section| section.heading == heading)
    }
}

pub fn render_terms(contract: &Contract) -> TermsDocument {
    let mut sections = Vec::new();

    if let Some(description) = &contract.description {
        if !description.is_empty() {
            sections.push(TermsSection::new("Description", description.clone()));
        }
    }

    if contract.clauses.payment {
        sections.push(payment_terms(contract.amount, contract.due_date));
    }
    if contract.clauses.liability {
        sections.push(liability_limitation());
    }
    if contract.clauses.confidentiality {
        sections.push(confidentiality());
    }
    if contract.clauses.termination {
        sections.push(termination());
    }

    sections.push(signature_acknowledgment());

    TermsDocument {
        title: contract.title.clone(),
        preamble: format!(
            "This agreement is entered into as of {}.",
            format_date(contract.created_at)
        ),
        sections,
    }
}

pub fn payment_terms(amount: f64, due_date: Option<DateTime<Utc>>) -> TermsSection {
    TermsSection::new(
        "Payment Terms",
        format!(
            "The total contract value is ${}, due by {}.",
            format_amount(amount),
            format_due(due_date)
        ),
    )
}

pub fn liability_limitation() -> TermsSection {
    TermsSection::new(
        "Limitation of Liability",
        "Neither party shall be liable for any indirect, incidental, or consequential damages arising from this agreement.",
    )
}

pub fn confidentiality() -> TermsSection {
    TermsSection::new(
        "Confidentiality",
        "Both parties agree to maintain the confidentiality of any proprietary information shared during the course of this engagement.",
    )
}

pub fn termination() -> TermsSection {
    TermsSection::new(
        "Termination",
        "Either party may terminate this agreement with written notice. All outstanding obligations must be fulfilled prior to termination.",
    )
}

pub fn signature_acknowledgment() -> TermsSection {
    TermsSection::new(
        "Signature",
        "By signing below, each party acknowledges that they have read and agree to all terms and conditions.",
    )
}

/// Group a non-negative amount with thousands separators, keeping cents only
/// when present.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.max(0.0) * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        grouped
    } else {
        format!("{}.{:02}", grouped, fraction)
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn format_due(due_date: Option<DateTime<Utc>>) -> String {
    due_date.map(format_date).unwrap_or_else(|| ABSENT_DATE.to_string())
}
