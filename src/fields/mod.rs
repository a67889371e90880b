pub mod format;
pub mod validate;
pub mod wizard;

use serde::Serialize;

/// Input modality for a catalog field.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    MaskedText,
    Date,
    Number,
    Select,
    Radio,
    TextArea,
    Checkbox,
}

/// Fixed digit-mask patterns applied by masked inputs.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mask {
    Cpf,
    Rg,
    Cep,
    Phone,
    Digits,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One entry of the field vocabulary: everything a client needs to render
/// the input and everything the server needs to validate it.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub step: u8,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [SelectOption],
}

const SEXO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "masculino", label: "MASC." },
    SelectOption { value: "feminino", label: "FEM." },
    SelectOption { value: "outros", label: "OUTROS" },
];

const SITUACAO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "ativo", label: "ATIVO" },
    SelectOption { value: "aposentado", label: "APOSENTADO" },
    SelectOption { value: "pensionista", label: "PENSIONISTA" },
];

const LOTACAO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "sede", label: "SEDE" },
    SelectOption { value: "hub", label: "HUB" },
];

const ESTADO_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "DF", label: "Distrito Federal" },
    SelectOption { value: "SP", label: "São Paulo" },
    SelectOption { value: "RJ", label: "Rio de Janeiro" },
];

macro_rules! spec {
    ($name:literal, $label:literal, $kind:ident, $step:literal, $required:literal) => {
        spec!($name, $label, $kind, $step, $required, None, None, &[])
    };
    ($name:literal, $label:literal, $kind:ident, $step:literal, $required:literal,
     $mask:expr, $placeholder:expr, $options:expr) => {
        FieldSpec {
            name: $name,
            label: $label,
            kind: FieldKind::$kind,
            step: $step,
            required: $required,
            mask: $mask,
            placeholder: $placeholder,
            options: $options,
        }
    };
}

/// The full field vocabulary, in canonical order. Step numbers group fields
/// into the wizard pages of the submission flow.
pub const CATALOG: &[FieldSpec] = &[
    spec!("nomeCompleto", "Nome Completo", Text, 1, true),
    spec!("nomeSocial", "Nome Social", Text, 1, false),
    spec!("sexo", "Sexo", Radio, 1, true, None, None, SEXO_OPTIONS),
    spec!("situacaoFuncional", "Situação Funcional", Radio, 1, true, None, None, SITUACAO_OPTIONS),
    spec!("matricula", "Matrícula", MaskedText, 1, true, Some(Mask::Digits), None, &[]),
    spec!("nomeMae", "Nome da Mãe", Text, 1, true),
    spec!("dataAdmissao", "Data de Admissão", Date, 1, true),
    spec!("dataNascimento", "Data de Nascimento", Date, 1, true),
    spec!("rg", "RG", MaskedText, 1, true, Some(Mask::Rg), Some("Ex: XX.XXX.XXX-X"), &[]),
    spec!("cpf", "CPF", MaskedText, 1, true, Some(Mask::Cpf), Some("XXX.XXX.XXX-XX"), &[]),
    spec!("lotacao", "Lotação", Radio, 2, true, None, None, LOTACAO_OPTIONS),
    spec!("setor", "Setor", Text, 2, true),
    spec!("cargo", "Cargo", Text, 2, true),
    spec!("salarioBase", "Salário Base (R$)", Number, 2, true),
    spec!("enderecoResidencial", "Endereço Residencial", Text, 3, true),
    spec!("bairro", "Bairro", Text, 3, true),
    spec!("cidade", "Cidade", Text, 3, true),
    spec!("estado", "Estado", Select, 3, true, None, None, ESTADO_OPTIONS),
    spec!("cep", "CEP", MaskedText, 3, true, Some(Mask::Cep), Some("XXXXX-XXX"), &[]),
    spec!("telefoneFixo", "Telefone Fixo", MaskedText, 4, false, Some(Mask::Phone), Some("(XX) XXXX-XXXX"), &[]),
    spec!("celular", "Celular", MaskedText, 4, false, Some(Mask::Phone), Some("(XX) 9XXXX-XXXX"), &[]),
    spec!("whatsapp", "WhatsApp", MaskedText, 4, false, Some(Mask::Phone), Some("(XX) 9XXXX-XXXX (opcional)"), &[]),
    spec!("email", "Email", Text, 4, true),
    spec!("bancoRecebimento", "Banco de Recebimento", Text, 4, true),
    spec!("observacoes", "Observações", TextArea, 5, false),
    spec!("aceitaTermos", "Eu aceito os termos e condições.", Checkbox, 5, true),
    spec!("mensagem", "Mensagem", TextArea, 6, false),
];

/// Look up a field by its wire name.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Build the ordered render plan for a form definition's field list.
/// Order follows the input; unrecognized names are skipped silently.
pub fn plan(field_names: &[String]) -> Vec<&'static FieldSpec> {
    field_names
        .iter()
        .filter_map(|name| lookup(name))
        .collect()
}
