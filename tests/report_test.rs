use cadastra::errors::AppError;
use cadastra::handlers::report_handlers::{ReportQuery, resolve_period};
use cadastra::models::submission::Submission;
use cadastra::report;
use chrono::{NaiveDate, TimeZone, Utc};

fn sample_submission(id: i64) -> Submission {
    Submission {
        id,
        form_id: 1,
        user_id: None,
        nome_completo: Some("Ana Souza".to_string()),
        nome_social: None,
        sexo: Some("feminino".to_string()),
        situacao_funcional: Some("ativo".to_string()),
        matricula: Some("12345".to_string()),
        nome_mae: Some("Maria Souza".to_string()),
        data_admissao: NaiveDate::from_ymd_opt(2015, 3, 2),
        data_nascimento: NaiveDate::from_ymd_opt(1990, 5, 20),
        rg: Some("12.345.678-9".to_string()),
        cpf: Some("111.444.777-35".to_string()),
        lotacao: Some("sede".to_string()),
        setor: Some("Financeiro".to_string()),
        cargo: Some("Analista".to_string()),
        salario_base: Some(4321.09),
        endereco_residencial: None,
        bairro: None,
        cidade: Some("Brasília".to_string()),
        estado: Some("DF".to_string()),
        cep: Some("70040-010".to_string()),
        telefone_fixo: None,
        celular: Some("(61) 99999-8888".to_string()),
        whatsapp: None,
        email: Some("ana@example.com".to_string()),
        banco_recebimento: Some("Banco do Brasil".to_string()),
        observacoes: None,
        aceita_termos: true,
        mensagem: None,
        submitted_at: Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap(),
        deleted_at: None,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap(),
    }
}

#[test]
fn brazilian_currency_formatting() {
    assert_eq!(report::format_currency(0.0), "R$ 0,00");
    assert_eq!(report::format_currency(5.0), "R$ 5,00");
    assert_eq!(report::format_currency(1234.5), "R$ 1.234,50");
    assert_eq!(report::format_currency(1_000_000.0), "R$ 1.000.000,00");
    assert_eq!(report::format_currency(999.999), "R$ 1.000,00");
    assert_eq!(report::format_currency(-12.3), "-R$ 12,30");
}

#[test]
fn dates_render_as_day_month_year() {
    let d = NaiveDate::from_ymd_opt(1990, 5, 20).unwrap();
    assert_eq!(report::format_date(d), "20/05/1990");

    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap();
    assert_eq!(report::format_datetime(ts), "01/06/2024 14:30");
}

#[test]
fn display_rows_cover_the_whole_catalog_with_fallbacks() {
    let record = sample_submission(7);
    let rows = report::display_rows(&record);
    assert_eq!(rows.len(), 27);

    let find = |label: &str| -> &str {
        rows.iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    };
    assert_eq!(find("Nome Completo"), "Ana Souza");
    assert_eq!(find("Salário Base (R$)"), "R$ 4.321,09");
    assert_eq!(find("Data de Nascimento"), "20/05/1990");
    assert_eq!(find("Eu aceito os termos e condições."), "Sim");
    // absent attributes fall back to N/A
    assert_eq!(find("Nome Social"), "N/A");
    assert_eq!(find("Telefone Fixo"), "N/A");
}

#[test]
fn render_produces_a_pdf() {
    let records = vec![sample_submission(1), sample_submission(2)];
    let bytes = report::render("Recadastramento 2024", &records);
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn render_paginates_many_records() {
    let records: Vec<Submission> = (1..=10).map(sample_submission).collect();
    let bytes = report::render("Recadastramento 2024", &records);
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn empty_selection_is_not_found_instead_of_a_blank_pdf() {
    match report::build("Recadastramento 2024", &[]) {
        Err(AppError::NotFound(msg)) => {
            assert_eq!(msg, "Nenhum cadastro encontrado para os critérios informados.");
        }
        other => panic!("expected not found, got {other:?}"),
    }

    let records = vec![sample_submission(1)];
    let bytes = report::build("Recadastramento 2024", &records).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn period_requires_a_form_or_a_complete_range() {
    let query = ReportQuery::default();
    match resolve_period(&query) {
        Err(AppError::Validation(map)) => {
            assert_eq!(
                map.get("formId").map(String::as_str),
                Some("Informe um formulário ou um período completo (data inicial e final).")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // a form id alone is enough
    let query = ReportQuery {
        form_id: Some(3),
        ..Default::default()
    };
    assert_eq!(resolve_period(&query).unwrap(), (None, None));

    // so is a complete range
    let query = ReportQuery {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-12-31".to_string()),
        ..Default::default()
    };
    let (start, end) = resolve_period(&query).unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31));
}

#[test]
fn period_rejects_malformed_and_inverted_dates() {
    let query = ReportQuery {
        start_date: Some("01/06/2024".to_string()),
        end_date: Some("2024-12-31".to_string()),
        ..Default::default()
    };
    match resolve_period(&query) {
        Err(AppError::Validation(map)) => {
            assert_eq!(
                map.get("startDate").map(String::as_str),
                Some("Data inválida (formato AAAA-MM-DD).")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let query = ReportQuery {
        start_date: Some("2024-12-31".to_string()),
        end_date: Some("2024-01-01".to_string()),
        ..Default::default()
    };
    match resolve_period(&query) {
        Err(AppError::Validation(map)) => {
            assert_eq!(
                map.get("startDate").map(String::as_str),
                Some("Período inválido: data inicial após a final.")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
