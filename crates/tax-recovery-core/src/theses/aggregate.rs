use rust_decimal::Decimal;

use super::ThesisOutcome;
use crate::types::*;

/// Keys that hold a recoverable or questionable amount in some thesis.
///
/// `valor_prescrito` is produced by no current thesis and always adds zero.
pub const RECOVERABLE_KEYS: [&str; 5] = [
    "credito_apuravel",
    "valor_indevido",
    "valor_prescrito",
    "valor_questionavel",
    "credito_estimado",
];

/// Sum the recoverable amounts across thesis results.
///
/// Each result contributes whichever of [`RECOVERABLE_KEYS`] it carries as a
/// money field; missing keys count as zero. The sum is rounded once at the end
/// and saturates at `Decimal::MAX`.
pub fn total_recoverable<T: ThesisOutcome>(results: &[T]) -> Money {
    let total = results
        .iter()
        .flat_map(|result| {
            RECOVERABLE_KEYS
                .iter()
                .map(move |key| result.money(key).unwrap_or(Decimal::ZERO))
        })
        .fold(Decimal::ZERO, Decimal::saturating_add);
    round_money(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theses::tests::sample_inputs;
    use crate::theses::{apply_theses, FieldValue, Thesis, ThesisField, ThesisResult};
    use rust_decimal_macros::dec;

    /// A thesis shape the aggregator has never seen.
    struct Prescribed(Money);

    impl ThesisOutcome for Prescribed {
        fn thesis(&self) -> Thesis {
            Thesis::PisCofinsIss
        }

        fn fields(&self) -> Vec<ThesisField> {
            vec![
                ThesisField::new("valor_prescrito", FieldValue::Money(self.0)),
                ThesisField::new("base_qualquer", FieldValue::Money(dec!(999))),
            ]
        }
    }

    #[test]
    fn test_reference_total() {
        let set = apply_theses(&sample_inputs());
        // 1,095 + 16,000 + 14,400 + 100,000
        assert_eq!(total_recoverable(&set.results()), dec!(131_495.00));
        assert_eq!(set.total_recoverable(), dec!(131_495.00));
    }

    #[test]
    fn test_empty_is_zero() {
        let none: Vec<ThesisResult> = Vec::new();
        assert_eq!(total_recoverable(&none), Decimal::ZERO);
    }

    #[test]
    fn test_fator_r_contributes_nothing() {
        let set = apply_theses(&sample_inputs());
        let only = vec![ThesisResult::FatorR(set.fator_r)];
        assert_eq!(total_recoverable(&only), Decimal::ZERO);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let results = vec![Prescribed(Decimal::MAX), Prescribed(Decimal::MAX)];
        assert_eq!(total_recoverable(&results), Decimal::MAX);
    }

    #[test]
    fn test_unknown_shape_uses_key_set_only() {
        let results = vec![Prescribed(dec!(10.005)), Prescribed(dec!(0.01))];
        // 10.015 rounds once at the end; base_qualquer is ignored
        assert_eq!(total_recoverable(&results), dec!(10.02));
    }
}
