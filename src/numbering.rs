use crate::error::{ReconcilerError, Result};
use crate::schema::InvoiceCategory;

/// Derives the next sequential invoice number for a category.
///
/// The first number of a category is `P-INV001` / `S-INV001`. Afterwards the
/// numerically highest existing suffix is incremented by one and reformatted
/// with the category prefix, zero-padded to at least three digits (so `999`
/// rolls over to `1000` rather than truncating). Numbers are never reassigned;
/// deleting an invoice leaves a gap.
///
/// The suffix comparison is numeric, not lexical, so the input may arrive in
/// any order. A number that does not match `<prefix>-INV<digits>` fails with
/// [`ReconcilerError::MalformedInvoiceNumber`] so the creation flow surfaces
/// the problem instead of emitting a bad number.
pub fn next_invoice_number<S: AsRef<str>>(
    category: InvoiceCategory,
    existing: &[S],
) -> Result<String> {
    let prefix = category.number_prefix();

    if existing.is_empty() {
        return Ok(format!("{}001", prefix));
    }

    let mut highest: u64 = 0;
    for number in existing {
        let suffix = parse_suffix(prefix, number.as_ref())?;
        highest = highest.max(suffix);
    }

    Ok(format!("{}{:03}", prefix, highest + 1))
}

fn parse_suffix(prefix: &str, number: &str) -> Result<u64> {
    let digits = number.strip_prefix(prefix).ok_or_else(|| {
        ReconcilerError::MalformedInvoiceNumber {
            number: number.to_string(),
            details: format!("expected prefix '{}'", prefix),
        }
    })?;

    if digits.len() < 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ReconcilerError::MalformedInvoiceNumber {
            number: number.to_string(),
            details: "expected a zero-padded numeric suffix of at least 3 digits".to_string(),
        });
    }

    digits
        .parse::<u64>()
        .map_err(|e| ReconcilerError::MalformedInvoiceNumber {
            number: number.to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_numbers() {
        let none: [&str; 0] = [];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Purchase, &none).unwrap(),
            "P-INV001"
        );
        assert_eq!(
            next_invoice_number(InvoiceCategory::Sale, &none).unwrap(),
            "S-INV001"
        );
    }

    #[test]
    fn test_increments_highest_suffix() {
        let existing = ["P-INV027"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap(),
            "P-INV028"
        );
    }

    #[test]
    fn test_numeric_not_lexical_ordering() {
        // Lexically "P-INV099" sorts above "P-INV100"; numerically it does not.
        let existing = ["P-INV100", "P-INV099", "P-INV002"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap(),
            "P-INV101"
        );
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let sorted = ["S-INV001", "S-INV002", "S-INV003"];
        let shuffled = ["S-INV002", "S-INV003", "S-INV001"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Sale, &sorted).unwrap(),
            next_invoice_number(InvoiceCategory::Sale, &shuffled).unwrap()
        );
    }

    #[test]
    fn test_gaps_are_preserved() {
        // Deleted invoices leave holes; the next number still follows the max.
        let existing = ["S-INV001", "S-INV005"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Sale, &existing).unwrap(),
            "S-INV006"
        );
    }

    #[test]
    fn test_rollover_past_three_digits() {
        let existing = ["P-INV999"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap(),
            "P-INV1000"
        );

        let existing = ["P-INV1000"];
        assert_eq!(
            next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap(),
            "P-INV1001"
        );
    }

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let existing = ["S-INV003"];
        let err = next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap_err();
        assert!(matches!(
            err,
            ReconcilerError::MalformedInvoiceNumber { .. }
        ));
    }

    #[test]
    fn test_malformed_suffix_is_rejected() {
        for bad in ["P-INVabc", "P-INV", "P-INV12", "P-INV0x1"] {
            let existing = [bad];
            let err = next_invoice_number(InvoiceCategory::Purchase, &existing).unwrap_err();
            assert!(
                matches!(err, ReconcilerError::MalformedInvoiceNumber { .. }),
                "'{}' should be rejected",
                bad
            );
        }
    }
}
