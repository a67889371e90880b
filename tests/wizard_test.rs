use std::collections::BTreeMap;

use cadastra::fields::{CATALOG, wizard};

fn all_field_names() -> Vec<String> {
    CATALOG.iter().map(|s| s.name.to_string()).collect()
}

fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn full_catalog_groups_into_six_steps() {
    let steps = wizard::steps(&all_field_names());
    let numbers: Vec<u8> = steps.iter().map(|s| s.step).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);

    let step1: Vec<&str> = steps[0].fields.iter().map(|s| s.name).collect();
    assert_eq!(step1[0], "nomeCompleto");
    assert!(step1.contains(&"cpf"));
}

#[test]
fn empty_steps_are_absent() {
    let declared = vec!["nomeCompleto".to_string(), "mensagem".to_string()];
    let steps = wizard::steps(&declared);
    let numbers: Vec<u8> = steps.iter().map(|s| s.step).collect();
    assert_eq!(numbers, vec![1, 6]);
}

#[test]
fn step_validation_flags_missing_required_fields() {
    let steps = wizard::steps(&["nomeCompleto".to_string(), "nomeSocial".to_string()]);
    let errors = wizard::validate_step(&steps[0].fields, &values(&[]));
    assert_eq!(
        errors.get("nomeCompleto").map(String::as_str),
        Some("Campo obrigatório.")
    );
    // nomeSocial is optional
    assert!(!errors.contains_key("nomeSocial"));
}

#[test]
fn at_least_one_phone_when_both_declared() {
    let declared = vec!["telefoneFixo".to_string(), "celular".to_string()];
    let steps = wizard::steps(&declared);

    let errors = wizard::validate_step(&steps[0].fields, &values(&[]));
    let msg = "Pelo menos um telefone (fixo ou celular) é obrigatório.";
    assert_eq!(errors.get("telefoneFixo").map(String::as_str), Some(msg));
    assert_eq!(errors.get("celular").map(String::as_str), Some(msg));

    let errors = wizard::validate_step(
        &steps[0].fields,
        &values(&[("celular", "(61) 99999-8888")]),
    );
    assert!(errors.is_empty());
}

#[test]
fn phone_rule_does_not_apply_with_a_single_phone_field() {
    let steps = wizard::steps(&["celular".to_string()]);
    let errors = wizard::validate_step(&steps[0].fields, &values(&[]));
    assert!(errors.is_empty());
}

#[test]
fn advance_blocks_until_the_step_is_valid() {
    let declared = vec![
        "nomeCompleto".to_string(),
        "setor".to_string(),
        "mensagem".to_string(),
    ];
    let mut state = wizard::WizardState::new(&declared);
    assert_eq!(state.step_count(), 3);
    assert_eq!(state.current_step(), 0);

    assert!(!state.advance(&values(&[])));
    assert_eq!(state.current_step(), 0);
    assert!(state.errors().contains_key("nomeCompleto"));

    assert!(state.advance(&values(&[("nomeCompleto", "Ana Souza")])));
    assert_eq!(state.current_step(), 1);
    // the fixed error was cleared on revalidation
    assert!(!state.errors().contains_key("nomeCompleto"));

    assert!(state.advance(&values(&[("setor", "Financeiro")])));
    // mensagem is optional, the last step passes empty
    assert!(state.advance(&values(&[])));
    assert!(state.is_complete());

    // advancing past the end stays complete
    assert!(state.advance(&values(&[])));
}

#[test]
fn back_steps_without_validation() {
    let declared = vec!["nomeCompleto".to_string(), "mensagem".to_string()];
    let mut state = wizard::WizardState::new(&declared);
    assert!(state.advance(&values(&[("nomeCompleto", "Ana")])));
    state.back();
    assert_eq!(state.current_step(), 0);
    state.back();
    assert_eq!(state.current_step(), 0);
}

#[test]
fn unchecked_terms_block_their_step() {
    let steps = wizard::steps(&["aceitaTermos".to_string()]);
    let errors = wizard::validate_step(&steps[0].fields, &values(&[("aceitaTermos", "false")]));
    assert_eq!(
        errors.get("aceitaTermos").map(String::as_str),
        Some("Você deve aceitar os termos e condições.")
    );

    let errors = wizard::validate_step(&steps[0].fields, &values(&[("aceitaTermos", "true")]));
    assert!(errors.is_empty());
}
