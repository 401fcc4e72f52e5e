//! JSON batch description read by the CLI.
//!
//! Every required key is checked before any record is built, so a batch
//! with a missing field fails with [`SalaryFileError::MissingField`] even if
//! an earlier payment would also have failed validation.

use crate::error::{Result, SalaryFileError};
use crate::field::OverflowPolicy;
use crate::money::AmountInput;
use crate::record::PaymentInput;
use crate::salary_file::SalaryFile;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// Raw batch as read from JSON.
///
/// Required keys are `Option`s here so their absence can be reported by
/// name instead of as a generic deserialization error. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchSpec {
    pub creation_date: Option<String>,
    pub sender_customer_number: Option<String>,
    pub sender_bankgiro_number: Option<String>,

    /// Absent or `null` means an empty batch.
    pub payments: Option<Vec<PaymentSpec>>,
}

/// Raw payment entry as read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentSpec {
    pub payment_date: Option<String>,
    pub bank_account: Option<String>,

    /// A JSON number or a decimal string; `null` counts as missing.
    pub amount: Option<Value>,
    pub employment_info: Option<String>,
    pub payment_identification: Option<String>,
}

fn required<T>(value: Option<T>, name: impl Into<String>) -> Result<T> {
    value.ok_or_else(|| SalaryFileError::MissingField(name.into()))
}

impl PaymentSpec {
    fn into_input(self, index: usize) -> Result<PaymentInput> {
        let field = |name: &str| format!("payments[{}].{}", index, name);

        let payment_date = required(self.payment_date, field("payment_date"))?;
        let bank_account = required(self.bank_account, field("bank_account"))?;
        let amount = amount_input(required(self.amount, field("amount"))?);

        Ok(PaymentInput::new(payment_date, bank_account, amount)
            .employment_info(self.employment_info.unwrap_or_default())
            .payment_identification(self.payment_identification.unwrap_or_default()))
    }
}

/// Maps a JSON amount onto the numeric representations the encoder accepts.
///
/// Non-numeric JSON values are passed through as text and rejected later as
/// invalid amounts.
fn amount_input(value: Value) -> AmountInput {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => AmountInput::Integer(i),
            (None, Some(f)) if !n.is_u64() => AmountInput::Float(f),
            _ => AmountInput::Text(n.to_string()),
        },
        Value::String(s) => AmountInput::Text(s),
        other => AmountInput::Text(other.to_string()),
    }
}

impl BatchSpec {
    /// Parses a batch description from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parses a batch description from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds and finalizes the salary file.
    ///
    /// All required keys are checked first; record construction then stops
    /// at the first invalid payment, whose index is attached to the error.
    pub fn into_salary_file(self, policy: OverflowPolicy) -> Result<SalaryFile> {
        let creation_date = required(self.creation_date, "creation_date")?;
        let customer_number = required(self.sender_customer_number, "sender_customer_number")?;
        let bankgiro_number = required(self.sender_bankgiro_number, "sender_bankgiro_number")?;
        let inputs = self
            .payments
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, spec)| spec.into_input(index))
            .collect::<Result<Vec<_>>>()?;

        debug!("Batch {} has {} payment entries", creation_date, inputs.len());

        let mut file =
            SalaryFile::with_policy(policy, &creation_date, &customer_number, &bankgiro_number)?;
        for (index, input) in inputs.iter().enumerate() {
            file.add_payment(input)
                .map_err(|e| SalaryFileError::in_payment(index, e))?;
        }
        file.finalize()?;
        Ok(file)
    }
}

impl SalaryFile {
    /// Reads a JSON batch description and returns the finalized salary file.
    pub fn from_json<R: Read>(reader: R, policy: OverflowPolicy) -> Result<Self> {
        BatchSpec::from_reader(reader)?.into_salary_file(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#""creation_date": "2024-03-15",
        "sender_customer_number": "123",
        "sender_bankgiro_number": "9999999""#;

    fn build(json: &str) -> Result<SalaryFile> {
        BatchSpec::from_json_str(json)?.into_salary_file(OverflowPolicy::Truncate)
    }

    #[test]
    fn test_builds_and_finalizes() {
        let json = format!(
            r#"{{ {HEADER}, "payments": [
                {{ "payment_date": "2024-03-20", "bank_account": "123456789", "amount": 1500.50 }},
                {{ "payment_date": "2024-03-20", "bank_account": "42", "amount": "99.99",
                   "employment_info": "7", "payment_identification": "MARCH" }}
            ] }}"#
        );
        let file = build(&json).unwrap();

        assert_eq!(file.len(), 2);
        let footer = file.footer().unwrap();
        assert_eq!(footer.total_amount().ore(), 150_050 + 9_999);
        assert_eq!(file.payments()[1].employment_info(), "0000000007");
        assert_eq!(file.payments()[1].payment_identification(), "MARCH       ");
    }

    #[test]
    fn test_payments_key_is_optional() {
        let file = build(&format!("{{ {HEADER} }}")).unwrap();
        assert!(file.is_empty());
        assert!(file.is_finalized());

        let file = build(&format!(r#"{{ {HEADER}, "payments": null }}"#)).unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn test_missing_header_field() {
        let json = r#"{ "creation_date": "2024-03-15", "sender_customer_number": "1" }"#;
        match build(json) {
            Err(SalaryFileError::MissingField(name)) => assert_eq!(name, "sender_bankgiro_number"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_payment_field_reported_before_invalid_records() {
        let json = format!(
            r#"{{ {HEADER}, "payments": [
                {{ "payment_date": "not-a-date", "bank_account": "1", "amount": 1 }},
                {{ "payment_date": "2024-03-20", "amount": 1 }}
            ] }}"#
        );
        match build(&json) {
            Err(SalaryFileError::MissingField(name)) => assert_eq!(name, "payments[1].bank_account"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_null_amount_is_missing() {
        let json = format!(
            r#"{{ {HEADER}, "payments": [
                {{ "payment_date": "2024-03-20", "bank_account": "1", "amount": null }}
            ] }}"#
        );
        match build(&json) {
            Err(SalaryFileError::MissingField(name)) => assert_eq!(name, "payments[0].amount"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_payment_carries_index() {
        let json = format!(
            r#"{{ {HEADER}, "payments": [
                {{ "payment_date": "2024-03-20", "bank_account": "1", "amount": 1 }},
                {{ "payment_date": "2024-03-20", "bank_account": "1", "amount": true }}
            ] }}"#
        );
        match build(&json) {
            Err(SalaryFileError::Payment { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, SalaryFileError::InvalidAmount { .. }));
            }
            other => panic!("expected Payment error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            BatchSpec::from_json_str("{ not json"),
            Err(SalaryFileError::Json(_))
        ));
    }

    #[test]
    fn test_amount_input_mapping() {
        assert_eq!(amount_input(serde_json::json!(12)), AmountInput::Integer(12));
        assert_eq!(amount_input(serde_json::json!(12.5)), AmountInput::Float(12.5));
        assert_eq!(
            amount_input(serde_json::json!("12.50")),
            AmountInput::Text("12.50".into())
        );
        assert_eq!(
            amount_input(serde_json::json!(u64::MAX)),
            AmountInput::Text(u64::MAX.to_string())
        );
    }
}
