use super::format::digits;
use super::{FieldKind, FieldSpec};

/// CPF check-digit validation. Strips non-digits, rejects anything that is
/// not exactly 11 digits or is a single repeated digit, then verifies both
/// check digits with the weighted-sum mod 11 procedure.
pub fn validate_cpf(input: &str) -> bool {
    let d = digits(input);
    if d.len() != 11 {
        return false;
    }
    let n: Vec<u32> = d.chars().filter_map(|c| c.to_digit(10)).collect();
    if n.iter().all(|&x| x == n[0]) {
        return false;
    }

    let check_digit = |len: usize| -> u32 {
        // Weights run (len+1)..2 over the first `len` digits.
        let sum: u32 = n[..len]
            .iter()
            .enumerate()
            .map(|(i, &x)| x * ((len + 1 - i) as u32))
            .sum();
        let remainder = sum % 11;
        if remainder < 2 { 0 } else { 11 - remainder }
    };

    check_digit(9) == n[9] && check_digit(10) == n[10]
}

/// RG: 7 to 10 digits after stripping separators.
pub fn validate_rg(input: &str) -> bool {
    let len = digits(input).len();
    (7..=10).contains(&len)
}

/// CEP: exactly 8 digits, optional dash after the fifth.
pub fn validate_cep(input: &str) -> bool {
    let bytes = input.as_bytes();
    match bytes.len() {
        8 => bytes.iter().all(|b| b.is_ascii_digit()),
        9 => {
            bytes[5] == b'-'
                && bytes[..5].iter().all(|b| b.is_ascii_digit())
                && bytes[6..].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Minimal email shape: non-space local part, '@', domain containing a dot.
pub fn validate_email(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate one submitted value against its field spec. Returns an error
/// message when the value fails, None when it passes. Empty values pass here;
/// required-ness is the caller's concern (it depends on which fields the
/// owning form declares).
pub fn validate_value(spec: &FieldSpec, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match spec.kind {
        FieldKind::Select | FieldKind::Radio => {
            if spec.options.iter().any(|opt| opt.value == trimmed) {
                None
            } else {
                Some("Opção inválida.".to_string())
            }
        }
        FieldKind::Number => match trimmed.parse::<f64>() {
            Ok(v) if v >= 0.0 => None,
            Ok(_) => Some("Não pode ser negativo.".to_string()),
            Err(_) => Some("Deve ser um número.".to_string()),
        },
        FieldKind::Date => {
            if chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
                None
            } else {
                Some("Data inválida (formato AAAA-MM-DD).".to_string())
            }
        }
        FieldKind::Checkbox => match trimmed {
            "true" | "false" => None,
            _ => Some("Deve ser verdadeiro ou falso.".to_string()),
        },
        _ => match spec.name {
            "cpf" => (!validate_cpf(trimmed)).then(|| "CPF inválido.".to_string()),
            "rg" => (!validate_rg(trimmed))
                .then(|| "RG inválido. Deve conter entre 7 e 10 dígitos numéricos.".to_string()),
            "cep" => (!validate_cep(trimmed))
                .then(|| "CEP inválido (formato XXXXX-XXX).".to_string()),
            "email" => (!validate_email(trimmed)).then(|| "Email inválido.".to_string()),
            _ => None,
        },
    }
}

/// Required-field message for a missing value.
pub fn required_message(spec: &FieldSpec) -> String {
    if spec.name == "aceitaTermos" {
        "Você deve aceitar os termos e condições.".to_string()
    } else {
        "Campo obrigatório.".to_string()
    }
}
