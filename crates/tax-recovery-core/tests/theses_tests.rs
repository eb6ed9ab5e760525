use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_recovery_core::theses::{
    apply_theses, total_recoverable, validate_inputs, FinancialInputs, SimplesAnexo, Thesis,
    ThesisOutcome,
};
use tax_recovery_core::TaxRecoveryError;

// ===========================================================================
// Thesis engine tests
// ===========================================================================

fn clinic_inputs() -> FinancialInputs {
    // The clinic from the intake form defaults
    FinancialInputs {
        receita_bruta: dec!(500_000),
        iss: dec!(30_000),
        verbas_indenizatorias: dec!(80_000),
        folha_12m: dec!(147_500),
        valor_venal: dec!(120_000),
        percentual_ipva: dec!(0.12),
        compras: dec!(250_000),
        percentual_insumos: dec!(0.4),
    }
}

#[test]
fn test_clinic_monetary_fields() {
    let set = apply_theses(&clinic_inputs());

    assert_eq!(set.pis_cofins_iss.credito_apuravel, dec!(1095.00));
    assert_eq!(set.inss_indenizatorio.valor_indevido, dec!(16_000.00));
    assert_eq!(set.ipva_frotistas.valor_questionavel, dec!(14_400.00));
    assert_eq!(set.insumos_necessarios.credito_estimado, dec!(100_000.00));

    // 1095 + 16000 + 14400 + 100000
    assert_eq!(set.total_recoverable(), dec!(131_495.00));
    assert_eq!(total_recoverable(&set.results()), dec!(131_495.00));
}

#[test]
fn test_every_result_carries_a_citation() {
    let set = apply_theses(&clinic_inputs());
    for result in set.results() {
        let last = result.fields().pop().unwrap();
        assert_eq!(last.key, "fundamentacao");
        assert_eq!(last.value.to_string(), result.thesis().citation());
    }
}

#[test]
fn test_identical_inputs_identical_json() {
    let a = serde_json::to_string(&apply_theses(&clinic_inputs())).unwrap();
    let b = serde_json::to_string(&apply_theses(&clinic_inputs())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_iss_monotonicity() {
    let mut previous = apply_theses(&clinic_inputs()).pis_cofins_iss;
    for step in 1..=10 {
        let mut inputs = clinic_inputs();
        inputs.iss = dec!(30_000) + Decimal::from(step * 1_000);
        let current = apply_theses(&inputs).pis_cofins_iss;
        assert!(current.credito_apuravel > previous.credito_apuravel);
        assert!(current.base_corrigida < previous.base_corrigida);
        previous = current;
    }
}

#[test]
fn test_fator_r_boundary() {
    let mut inputs = clinic_inputs();
    inputs.receita_bruta = dec!(1_000_000);

    inputs.folha_12m = dec!(280_000);
    assert_eq!(apply_theses(&inputs).fator_r.regime_recomendado, SimplesAnexo::AnexoIII);

    inputs.folha_12m = dec!(279_999.99);
    assert_eq!(apply_theses(&inputs).fator_r.regime_recomendado, SimplesAnexo::AnexoV);
}

#[test]
fn test_zero_revenue_does_not_panic() {
    let mut inputs = clinic_inputs();
    inputs.receita_bruta = Decimal::ZERO;
    let set = apply_theses(&inputs);
    assert_eq!(set.fator_r.fator_r, Decimal::ZERO);
    assert_eq!(set.fator_r.regime_recomendado, SimplesAnexo::AnexoV);
}

#[test]
fn test_thesis_ids_serialize_as_identifiers() {
    for thesis in Thesis::ALL {
        let json = serde_json::to_string(&thesis).unwrap();
        assert_eq!(json, format!("\"{}\"", thesis.id()));
    }
}

fn with_bad_field(field: &str) -> FinancialInputs {
    let mut inputs = clinic_inputs();
    match field {
        "receita_bruta" => inputs.receita_bruta = dec!(-1),
        "iss" => inputs.iss = dec!(-0.01),
        "verbas_indenizatorias" => inputs.verbas_indenizatorias = dec!(-5),
        "folha_12m" => inputs.folha_12m = dec!(-5),
        "valor_venal" => inputs.valor_venal = dec!(-5),
        "percentual_ipva" => inputs.percentual_ipva = dec!(1.01),
        "percentual_insumos" => inputs.percentual_insumos = dec!(-0.5),
        "compras" => inputs.compras = dec!(-250_000),
        other => panic!("unknown field {other}"),
    }
    inputs
}

#[test]
fn test_validation_rejects_each_bad_field() {
    let fields = [
        "receita_bruta",
        "iss",
        "verbas_indenizatorias",
        "folha_12m",
        "valor_venal",
        "percentual_ipva",
        "percentual_insumos",
        "compras",
    ];
    for expected in fields {
        match validate_inputs(&with_bad_field(expected)) {
            Err(TaxRecoveryError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidInput for {expected}, got {other:?}"),
        }
    }
}
