use cadastra::fields::{self, FieldKind, Mask, format, validate};

#[test]
fn catalog_lookup_by_wire_name() {
    let cpf = fields::lookup("cpf").unwrap();
    assert_eq!(cpf.label, "CPF");
    assert_eq!(cpf.kind, FieldKind::MaskedText);
    assert_eq!(cpf.mask, Some(Mask::Cpf));
    assert_eq!(cpf.step, 1);
    assert!(cpf.required);

    assert!(fields::lookup("naoExiste").is_none());
}

#[test]
fn plan_keeps_order_and_skips_unknown_names() {
    let declared = vec![
        "email".to_string(),
        "inventado".to_string(),
        "nomeCompleto".to_string(),
    ];
    let plan = fields::plan(&declared);
    let names: Vec<&str> = plan.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["email", "nomeCompleto"]);
}

#[test]
fn cpf_mask_is_prefix_stable() {
    assert_eq!(format::format_cpf("123"), "123");
    assert_eq!(format::format_cpf("12345"), "123.45");
    assert_eq!(format::format_cpf("12345678"), "123.456.78");
    assert_eq!(format::format_cpf("11144477735"), "111.444.777-35");
    // trailing garbage beyond 11 digits is dropped
    assert_eq!(format::format_cpf("111444777359"), "111.444.777-35");
}

#[test]
fn rg_and_cep_masks() {
    assert_eq!(format::format_rg("123456789"), "12.345.678-9");
    assert_eq!(format::format_rg("1234"), "12.34");
    assert_eq!(format::format_cep("01001000"), "01001-000");
    assert_eq!(format::format_cep("0100"), "0100");
}

#[test]
fn phone_mask_handles_both_lengths() {
    assert_eq!(format::format_phone("6133334444"), "(61) 3333-4444");
    assert_eq!(format::format_phone("61999998888"), "(61) 99999-8888");
    assert_eq!(format::format_phone("61"), "61");
}

#[test]
fn mask_apply_dispatches() {
    assert_eq!(format::apply(Mask::Digits, "a1b2c3"), "123");
    assert_eq!(format::apply(Mask::Cep, "70040010"), "70040-010");
}

#[test]
fn cpf_check_digits() {
    assert!(validate::validate_cpf("111.444.777-35"));
    assert!(validate::validate_cpf("11144477735"));
    // wrong check digit
    assert!(!validate::validate_cpf("111.444.777-36"));
    // repeated digits are rejected even though the checksum holds
    assert!(!validate::validate_cpf("111.111.111-11"));
    assert!(!validate::validate_cpf("123"));
    assert!(!validate::validate_cpf(""));
}

#[test]
fn rg_length_bounds() {
    assert!(validate::validate_rg("1234567"));
    assert!(validate::validate_rg("12.345.678-9"));
    assert!(!validate::validate_rg("123456"));
    assert!(!validate::validate_rg("12345678901"));
}

#[test]
fn cep_shapes() {
    assert!(validate::validate_cep("70040-010"));
    assert!(validate::validate_cep("70040010"));
    assert!(!validate::validate_cep("70040 010"));
    assert!(!validate::validate_cep("7004-0010"));
    assert!(!validate::validate_cep("70040-01"));
}

#[test]
fn email_shape() {
    assert!(validate::validate_email("ana@example.com"));
    assert!(!validate::validate_email("ana@example"));
    assert!(!validate::validate_email("ana example@x.com"));
    assert!(!validate::validate_email("@example.com"));
    assert!(!validate::validate_email("ana@.com"));
}

#[test]
fn value_validation_per_kind() {
    let sexo = fields::lookup("sexo").unwrap();
    assert_eq!(validate::validate_value(sexo, "masculino"), None);
    assert_eq!(
        validate::validate_value(sexo, "qualquer"),
        Some("Opção inválida.".to_string())
    );

    let salario = fields::lookup("salarioBase").unwrap();
    assert_eq!(validate::validate_value(salario, "2500.50"), None);
    assert_eq!(
        validate::validate_value(salario, "-1"),
        Some("Não pode ser negativo.".to_string())
    );
    assert_eq!(
        validate::validate_value(salario, "abc"),
        Some("Deve ser um número.".to_string())
    );

    let nascimento = fields::lookup("dataNascimento").unwrap();
    assert_eq!(validate::validate_value(nascimento, "1990-05-20"), None);
    assert_eq!(
        validate::validate_value(nascimento, "20/05/1990"),
        Some("Data inválida (formato AAAA-MM-DD).".to_string())
    );

    let cpf = fields::lookup("cpf").unwrap();
    assert_eq!(
        validate::validate_value(cpf, "000.000.000-00"),
        Some("CPF inválido.".to_string())
    );

    // empty passes; required-ness is decided by the wizard
    assert_eq!(validate::validate_value(cpf, ""), None);
}

#[test]
fn terms_checkbox_has_its_own_required_message() {
    let termos = fields::lookup("aceitaTermos").unwrap();
    assert_eq!(
        validate::required_message(termos),
        "Você deve aceitar os termos e condições."
    );
    let nome = fields::lookup("nomeCompleto").unwrap();
    assert_eq!(validate::required_message(nome), "Campo obrigatório.");
}
