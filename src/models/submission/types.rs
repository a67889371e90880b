use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::fields::{self, Mask, format, validate, wizard};

/// One stored submission against a form definition. Attribute wire names
/// keep the form vocabulary (Portuguese camelCase).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub form_id: i64,
    pub user_id: Option<i64>,

    pub nome_completo: Option<String>,
    pub nome_social: Option<String>,
    pub sexo: Option<String>,
    pub situacao_funcional: Option<String>,
    pub matricula: Option<String>,
    pub nome_mae: Option<String>,
    pub data_admissao: Option<NaiveDate>,
    pub data_nascimento: Option<NaiveDate>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub lotacao: Option<String>,
    pub setor: Option<String>,
    pub cargo: Option<String>,
    pub salario_base: Option<f64>,
    pub endereco_residencial: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub telefone_fixo: Option<String>,
    pub celular: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub banco_recebimento: Option<String>,
    pub observacoes: Option<String>,
    pub aceita_termos: bool,
    pub mensagem: Option<String>,

    pub submitted_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submit/update payload: the owning form plus the flat attribute set.
/// Keys outside the fixed vocabulary are rejected outright rather than
/// silently dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SubmissionInput {
    pub form_id: Option<i64>,

    pub nome_completo: Option<String>,
    pub nome_social: Option<String>,
    pub sexo: Option<String>,
    pub situacao_funcional: Option<String>,
    pub matricula: Option<String>,
    pub nome_mae: Option<String>,
    pub data_admissao: Option<NaiveDate>,
    pub data_nascimento: Option<NaiveDate>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub lotacao: Option<String>,
    pub setor: Option<String>,
    pub cargo: Option<String>,
    pub salario_base: Option<f64>,
    pub endereco_residencial: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub telefone_fixo: Option<String>,
    pub celular: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub banco_recebimento: Option<String>,
    pub observacoes: Option<String>,
    pub aceita_termos: Option<bool>,
    pub mensagem: Option<String>,
}

impl SubmissionInput {
    /// Trim every textual attribute, drop the ones left empty, rewrite masked
    /// attributes into their canonical masked form, and lowercase the e-mail
    /// address. Canonical masks matter for uniqueness: the partial indexes
    /// compare raw strings, so "111.444.777-35" and "11144477735" must store
    /// identically.
    pub fn normalize(&mut self) {
        let trim = |v: &mut Option<String>| {
            *v = v
                .take()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
        };
        trim(&mut self.nome_completo);
        trim(&mut self.nome_social);
        trim(&mut self.sexo);
        trim(&mut self.situacao_funcional);
        trim(&mut self.matricula);
        trim(&mut self.nome_mae);
        trim(&mut self.rg);
        trim(&mut self.cpf);
        trim(&mut self.lotacao);
        trim(&mut self.setor);
        trim(&mut self.cargo);
        trim(&mut self.endereco_residencial);
        trim(&mut self.bairro);
        trim(&mut self.cidade);
        trim(&mut self.estado);
        trim(&mut self.cep);
        trim(&mut self.telefone_fixo);
        trim(&mut self.celular);
        trim(&mut self.whatsapp);
        trim(&mut self.email);
        trim(&mut self.banco_recebimento);
        trim(&mut self.observacoes);
        trim(&mut self.mensagem);

        // Values without any digits are left alone so validation can still
        // flag them instead of them vanishing into an empty mask.
        let mask = |v: &mut Option<String>, m: Mask| {
            if let Some(s) = v.as_mut() {
                let canonical = format::apply(m, s);
                if !canonical.is_empty() {
                    *s = canonical;
                }
            }
        };
        mask(&mut self.cpf, Mask::Cpf);
        mask(&mut self.rg, Mask::Rg);
        mask(&mut self.cep, Mask::Cep);
        mask(&mut self.telefone_fixo, Mask::Phone);
        mask(&mut self.celular, Mask::Phone);
        mask(&mut self.whatsapp, Mask::Phone);
        mask(&mut self.matricula, Mask::Digits);

        self.email = self.email.take().map(|e| e.to_lowercase());
    }

    /// Textual view of every present attribute, keyed by wire name. Feeds
    /// the shared field validators.
    pub fn value_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let mut put = |name: &str, value: Option<String>| {
            if let Some(v) = value {
                map.insert(name.to_string(), v);
            }
        };
        put("nomeCompleto", self.nome_completo.clone());
        put("nomeSocial", self.nome_social.clone());
        put("sexo", self.sexo.clone());
        put("situacaoFuncional", self.situacao_funcional.clone());
        put("matricula", self.matricula.clone());
        put("nomeMae", self.nome_mae.clone());
        put("dataAdmissao", self.data_admissao.map(|d| d.to_string()));
        put("dataNascimento", self.data_nascimento.map(|d| d.to_string()));
        put("rg", self.rg.clone());
        put("cpf", self.cpf.clone());
        put("lotacao", self.lotacao.clone());
        put("setor", self.setor.clone());
        put("cargo", self.cargo.clone());
        put("salarioBase", self.salario_base.map(|v| v.to_string()));
        put("enderecoResidencial", self.endereco_residencial.clone());
        put("bairro", self.bairro.clone());
        put("cidade", self.cidade.clone());
        put("estado", self.estado.clone());
        put("cep", self.cep.clone());
        put("telefoneFixo", self.telefone_fixo.clone());
        put("celular", self.celular.clone());
        put("whatsapp", self.whatsapp.clone());
        put("email", self.email.clone());
        put("bancoRecebimento", self.banco_recebimento.clone());
        put("observacoes", self.observacoes.clone());
        put("aceitaTermos", self.aceita_termos.map(|v| v.to_string()));
        put("mensagem", self.mensagem.clone());
        map
    }

    /// Validate against the owning definition's declared field list:
    /// required fields (per catalog) must be present and valid; attributes
    /// of the vocabulary that the definition does not declare are accepted
    /// but still format-checked.
    pub fn validate_against(&self, declared: &[String]) -> Result<(), AppError> {
        let values = self.value_map();
        let mut errors = BTreeMap::new();

        for step in wizard::steps(declared) {
            errors.extend(wizard::validate_step(&step.fields, &values));
        }

        for (name, value) in &values {
            if declared.iter().any(|d| d == name) {
                continue;
            }
            if let Some(spec) = fields::lookup(name) {
                if let Some(msg) = validate::validate_value(spec, value) {
                    errors.insert(name.clone(), msg);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// What a soft delete did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyDeleted,
}

/// Soft delete is idempotent: a second delete is not an error, the caller
/// is just told nothing changed.
pub fn delete_transition(deleted_at: Option<DateTime<Utc>>) -> DeleteOutcome {
    if deleted_at.is_some() {
        DeleteOutcome::AlreadyDeleted
    } else {
        DeleteOutcome::Deleted
    }
}

/// Restore only applies to deleted records. A live record cannot be
/// restored.
pub fn restore_transition(deleted_at: Option<DateTime<Utc>>) -> Result<(), AppError> {
    if deleted_at.is_none() {
        return Err(AppError::InvalidState(
            "Cadastro não está deletado.".to_string(),
        ));
    }
    Ok(())
}
