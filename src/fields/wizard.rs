use std::collections::BTreeMap;

use serde::Serialize;

use super::{FieldSpec, plan, validate};

/// One page of the submission wizard: the catalog step number and the
/// declared fields that fall on it, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct StepPlan {
    pub step: u8,
    pub fields: Vec<&'static FieldSpec>,
}

/// Group a form definition's declared fields into ordered wizard steps.
/// Unrecognized names are dropped by `plan`; empty steps do not appear.
pub fn steps(field_names: &[String]) -> Vec<StepPlan> {
    let specs = plan(field_names);
    let mut out: Vec<StepPlan> = Vec::new();
    let mut step_numbers: Vec<u8> = specs.iter().map(|s| s.step).collect();
    step_numbers.sort_unstable();
    step_numbers.dedup();

    for step in step_numbers {
        let fields: Vec<&'static FieldSpec> =
            specs.iter().copied().filter(|s| s.step == step).collect();
        out.push(StepPlan { step, fields });
    }
    out
}

/// Client-side wizard progression expressed as an explicit state machine:
/// a current step index plus the accumulated error map. Advancing requires
/// every required field on the current step to validate; failures surface
/// one message per field and block the transition.
#[derive(Debug, Clone)]
pub struct WizardState {
    steps: Vec<StepPlan>,
    current: usize,
    errors: BTreeMap<String, String>,
}

impl WizardState {
    pub fn new(field_names: &[String]) -> Self {
        WizardState {
            steps: steps(field_names),
            current: 0,
            errors: BTreeMap::new(),
        }
    }

    /// Zero-based index of the current step.
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// True once every step has been passed.
    pub fn is_complete(&self) -> bool {
        self.current >= self.steps.len()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Validate the current step against the supplied values and advance on
    /// success. Clears prior errors only for the fields just revalidated.
    pub fn advance(&mut self, values: &BTreeMap<String, String>) -> bool {
        if self.is_complete() {
            return true;
        }
        let step = &self.steps[self.current];
        let step_errors = validate_step(&step.fields, values);

        for spec in &step.fields {
            self.errors.remove(spec.name);
        }
        if step_errors.is_empty() {
            self.current += 1;
            true
        } else {
            self.errors.extend(step_errors);
            false
        }
    }

    /// Step back without validation.
    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

/// Validate one step's fields: required checks, format checks, and the
/// at-least-one-phone rule when both phone fields sit on the step.
pub fn validate_step(
    fields: &[&'static FieldSpec],
    values: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    let value_of = |name: &str| -> &str {
        values.get(name).map(String::as_str).unwrap_or("").trim()
    };

    let fixo = fields.iter().any(|s| s.name == "telefoneFixo");
    let celular = fields.iter().any(|s| s.name == "celular");
    if fixo && celular && value_of("telefoneFixo").is_empty() && value_of("celular").is_empty() {
        let msg = "Pelo menos um telefone (fixo ou celular) é obrigatório.";
        errors.insert("telefoneFixo".to_string(), msg.to_string());
        errors.insert("celular".to_string(), msg.to_string());
    }

    for spec in fields {
        let value = value_of(spec.name);
        if value.is_empty() || (spec.name == "aceitaTermos" && value == "false") {
            if spec.required {
                errors.insert(spec.name.to_string(), validate::required_message(spec));
            }
            continue;
        }
        if let Some(msg) = validate::validate_value(spec, value) {
            errors.insert(spec.name.to_string(), msg);
        }
    }

    errors
}
