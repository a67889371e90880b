use super::Mask;

/// Strip everything but ASCII digits. Raw-value sanitizer for masked inputs.
pub fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CPF mask: ###.###.###-##, prefix-stable for partial input.
pub fn format_cpf(value: &str) -> String {
    let d = digits(value);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..11.min(d.len())]),
    }
}

/// RG mask: ##.###.###-#, prefix-stable for partial input.
pub fn format_rg(value: &str) -> String {
    let d = digits(value);
    match d.len() {
        0..=2 => d,
        3..=5 => format!("{}.{}", &d[..2], &d[2..]),
        6..=8 => format!("{}.{}.{}", &d[..2], &d[2..5], &d[5..]),
        _ => format!("{}.{}.{}-{}", &d[..2], &d[2..5], &d[5..8], &d[8..9]),
    }
}

/// CEP mask: #####-###.
pub fn format_cep(value: &str) -> String {
    let d = digits(value);
    if d.len() <= 5 {
        d
    } else {
        format!("{}-{}", &d[..5], &d[5..8.min(d.len())])
    }
}

/// Phone mask: (##) ####-#### for 10 digits, (##) #####-#### for 11.
pub fn format_phone(value: &str) -> String {
    let d = digits(value);
    match d.len() {
        0..=2 => d,
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..11.min(d.len())]),
    }
}

/// Apply the mask named by a field spec.
pub fn apply(mask: Mask, value: &str) -> String {
    match mask {
        Mask::Cpf => format_cpf(value),
        Mask::Rg => format_rg(value),
        Mask::Cep => format_cep(value),
        Mask::Phone => format_phone(value),
        Mask::Digits => digits(value),
    }
}
